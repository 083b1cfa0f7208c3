//! Gestures on server-rendered markup.
//!
//! Rows and buttons rendered by the server carry a `data-command` attribute
//! naming the intent plus `data-*` arguments, e.g.
//! `<button data-command="play" data-song-id="17">`. A single delegated
//! listener turns the clicked element into a [`Command`].

use crate::remote::Command;

/// Map a `data-command` value and its arguments to a command.
///
/// `arg` looks up an argument by its name without the `data-` prefix
/// (`song-id`, `album-id`, `playlist`, `secs`, `width`). Missing or malformed
/// arguments yield `None`.
pub fn command_from_gesture(action: &str, arg: impl Fn(&str) -> Option<String>) -> Option<Command> {
    let text = |name: &str| arg(name).filter(|value| !value.trim().is_empty());
    let number = |name: &str| arg(name)?.trim().parse::<u32>().ok();

    let command = match action.trim() {
        "play" => Command::Play {
            song_id: text("song-id")?,
        },
        "stop" => Command::Stop,
        "pause" => Command::Pause,
        "resume" => Command::Resume,
        "rewind" => Command::Rewind {
            secs: number("secs")?,
        },
        "forward" => Command::Forward {
            secs: number("secs")?,
        },
        "next" => Command::Next,
        "purge" => Command::Purge,
        "set-columns" => Command::SetColumns {
            width: number("width").filter(|width| *width > 0)?,
        },
        "enqueue-song" => Command::EnqueueSong {
            song_id: text("song-id")?,
        },
        "enqueue-album" => Command::EnqueueAlbum {
            album_id: text("album-id")?,
        },
        "append-to-playlist" => {
            return Command::append_from_picker(&text("playlist")?, text("song-id")?)
        }
        "delete-from-playlist" => Command::DeleteFromPlaylist {
            song_id: text("song-id")?,
            playlist: text("playlist")?,
        },
        "shuffle-begin" => Command::ShuffleBegin {
            playlist: text("playlist"),
        },
        "shuffle-end" => Command::ShuffleEnd,
        _ => return None,
    };
    Some(command)
}
