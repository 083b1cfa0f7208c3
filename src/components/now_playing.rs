use crate::components::{PausedSignal, Remote};
use dioxus::prelude::*;
use stereoremote::model::PlaybackState;
use stereoremote::sync::{NowPlayingSurface, PlaybackSyncLoop};

/// Signal-backed view of the now-playing panel.
#[derive(Clone)]
struct PanelSignals {
    base_url: String,
    html: Signal<String>,
    artwork: Signal<Option<String>>,
    paused: Signal<bool>,
}

impl NowPlayingSurface for PanelSignals {
    fn replace_panel(&self, fragment: &str) {
        let mut html = self.html;
        html.set(fragment.to_string());
    }

    fn set_artwork_src(&self, src: &str) {
        let mut artwork = self.artwork;
        artwork.set(Some(format!("{}{src}", self.base_url)));
    }

    fn show_state(&self, state: &PlaybackState) {
        let Some(is_paused) = state.is_paused else {
            return;
        };
        let mut paused = self.paused;
        if *paused.peek() != is_paused {
            paused.set(is_paused);
        }
    }
}

#[component]
pub fn NowPlaying() -> Element {
    let remote = use_context::<Remote>();
    let paused = use_context::<PausedSignal>().0;
    let html = use_signal(String::new);
    let artwork = use_signal(|| None::<String>);

    use_hook(move || {
        let surface = PanelSignals {
            base_url: remote.transport.base_url().to_string(),
            html,
            artwork,
            paused,
        };
        let sync = PlaybackSyncLoop::new(remote.transport.clone(), surface, remote.spawner());
        spawn(sync.run());
    });

    rsx! {
        section { class: "now-playing",
            if let Some(src) = artwork() {
                img {
                    id: "current-album-cover",
                    class: "now-playing-cover",
                    src: "{src}",
                    alt: "Album artwork",
                }
            }
            div { id: "now-playing-panel", dangerous_inner_html: "{html}" }
        }
    }
}
