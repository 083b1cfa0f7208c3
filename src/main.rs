mod components;

use components::App;

fn main() {
    dioxus::launch(App);
}
