use crate::components::{PausedSignal, Remote};
use dioxus::prelude::*;
use stereoremote::remote::{pause_button_label, toggle_pause, Command, SEEK_STEP_SECS};

#[component]
pub fn PlayerControls() -> Element {
    let remote = use_context::<Remote>();
    let mut paused = use_context::<PausedSignal>().0;
    let mut shuffling = use_signal(|| false);
    let dispatcher = use_hook(move || remote.dispatcher());

    let on_command = {
        let dispatcher = dispatcher.clone();
        move |command: Command| {
            let dispatcher = dispatcher.clone();
            move |_: MouseEvent| dispatcher.send(command.clone())
        }
    };

    // The label flips before the server confirms; the next poll corrects it
    // when the panel reports pause state.
    let on_toggle_pause = {
        let dispatcher = dispatcher.clone();
        move |_: MouseEvent| {
            let (command, now_paused) = toggle_pause(paused());
            paused.set(now_paused);
            dispatcher.send(command);
        }
    };

    let on_toggle_shuffle = move |_: MouseEvent| {
        let command = if shuffling() {
            Command::ShuffleEnd
        } else {
            Command::ShuffleBegin { playlist: None }
        };
        shuffling.set(!shuffling());
        dispatcher.send(command);
    };

    let pause_label = pause_button_label(paused());

    rsx! {
        nav { class: "player-controls",
            button {
                id: "rewind-btn",
                onclick: on_command(Command::Rewind { secs: SEEK_STEP_SECS }),
                "-{SEEK_STEP_SECS}s"
            }
            button { id: "play-pause", onclick: on_toggle_pause, "{pause_label}" }
            button {
                id: "forward-btn",
                onclick: on_command(Command::Forward { secs: SEEK_STEP_SECS }),
                "+{SEEK_STEP_SECS}s"
            }
            button { id: "next-btn", onclick: on_command(Command::Next), "NEXT" }
            button { id: "purge-btn", onclick: on_command(Command::Purge), "CLEAR UP NEXT" }
            button { id: "shuffle-btn", onclick: on_toggle_shuffle,
                if shuffling() {
                    "END SHUFFLE"
                } else {
                    "SHUFFLE ALL"
                }
            }
        }
    }
}
