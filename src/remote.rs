//! Command catalogue and the fire-and-forget dispatcher.
//!
//! Every user intent becomes exactly one request (plus a leading stop for
//! anything that starts a new track). Nothing waits on the response: the next
//! poll tick is what brings the panel back in line with the player.

use crate::error::RemoteError;
use crate::layout::ALBUMS_PATH;
use crate::navigator::Navigator;
use crate::transport::{Request, Spawner, Transport};
use futures_util::poll;
use std::borrow::Cow;
use std::task::Poll;
use tracing::debug;

/// Seconds skipped by the rewind/forward buttons.
pub const SEEK_STEP_SECS: u32 = 10;

const PLAYLIST_PLACEHOLDER: &str = "select playlist";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play { song_id: String },
    Stop,
    Pause,
    Resume,
    Rewind { secs: u32 },
    Forward { secs: u32 },
    Next,
    Purge,
    SetColumns { width: u32 },
    EnqueueSong { song_id: String },
    EnqueueAlbum { album_id: String },
    AppendToPlaylist { playlist: String, song_id: String },
    DeleteFromPlaylist { song_id: String, playlist: String },
    ShuffleBegin { playlist: Option<String> },
    ShuffleEnd,
}

/// What the page does once a command's request has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    None,
    /// The affected listing has no refresh path other than a full reload.
    Reload,
    ShowAlbums,
}

fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

impl Command {
    /// Build an append from a playlist picker; the picker's placeholder entry
    /// produces nothing.
    pub fn append_from_picker(selected: &str, song_id: impl Into<String>) -> Option<Self> {
        let selected = selected.trim();
        if selected.is_empty() || selected.eq_ignore_ascii_case(PLAYLIST_PLACEHOLDER) {
            return None;
        }
        Some(Self::AppendToPlaylist {
            playlist: selected.to_string(),
            song_id: song_id.into(),
        })
    }

    pub fn request(&self) -> Request {
        match self {
            Self::Play { song_id } => Request::post(format!("/play/song/{}", segment(song_id))),
            Self::Stop => Request::get("/stop"),
            Self::Pause => Request::post("/command/pause=0"),
            Self::Resume => Request::post("/command/resume=0"),
            Self::Rewind { secs } => Request::post(format!("/command/rew={secs}")),
            Self::Forward { secs } => Request::post(format!("/command/fwd={secs}")),
            Self::Next => Request::post("/command/next=0"),
            Self::Purge => Request::post("/command/purge=0"),
            Self::SetColumns { width } => Request::post(format!("/command/rw={width}")),
            Self::EnqueueSong { song_id } => {
                Request::post(format!("/up-next/song/{}", segment(song_id)))
            }
            Self::EnqueueAlbum { album_id } => {
                Request::post(format!("/up-next/album/{}", segment(album_id)))
            }
            Self::AppendToPlaylist { playlist, song_id } => Request::post(format!(
                "/playlists/append/{}/{}",
                segment(playlist),
                segment(song_id)
            )),
            Self::DeleteFromPlaylist { song_id, playlist } => Request::post(format!(
                "/playlists/delete/{}/{}",
                segment(song_id),
                segment(playlist)
            )),
            Self::ShuffleBegin { playlist: None } => Request::post("/command/shuffle-begin"),
            Self::ShuffleBegin {
                playlist: Some(playlist),
            } => Request::post(format!("/command/shuffle-begin={}", segment(playlist))),
            Self::ShuffleEnd => Request::post("/command/shuffle-end"),
        }
    }

    pub fn follow_up(&self) -> FollowUp {
        match self {
            Self::SetColumns { .. } => FollowUp::ShowAlbums,
            Self::EnqueueSong { .. }
            | Self::EnqueueAlbum { .. }
            | Self::AppendToPlaylist { .. }
            | Self::DeleteFromPlaylist { .. } => FollowUp::Reload,
            _ => FollowUp::None,
        }
    }

    /// Starting a track while another is live would have both racing on the
    /// backend, so these go out behind a stop.
    fn stops_first(&self) -> bool {
        matches!(self, Self::Play { .. } | Self::Next)
    }
}

/// Optimistic pause flip for the play/pause button: returns the command to
/// send and the new paused flag.
pub fn toggle_pause(paused: bool) -> (Command, bool) {
    if paused {
        (Command::Resume, false)
    } else {
        (Command::Pause, true)
    }
}

pub fn pause_button_label(paused: bool) -> &'static str {
    if paused {
        "PLAY"
    } else {
        "PAUSE"
    }
}

/// Translates commands into requests and hands them to the executor.
///
/// Holds handles only; there is no state that outlives a single `send`.
#[derive(Clone)]
pub struct CommandDispatcher<T, N> {
    transport: T,
    navigator: N,
    spawner: Spawner,
    reload_after_queue_edit: bool,
}

impl<T, N> CommandDispatcher<T, N>
where
    T: Transport + Clone + 'static,
    N: Navigator + Clone + 'static,
{
    pub fn new(transport: T, navigator: N, spawner: Spawner) -> Self {
        Self {
            transport,
            navigator,
            spawner,
            reload_after_queue_edit: true,
        }
    }

    pub fn with_queue_reload(mut self, enabled: bool) -> Self {
        self.reload_after_queue_edit = enabled;
        self
    }

    /// Fire-and-forget. Returns as soon as the work is queued.
    pub fn send(&self, command: Command) {
        let mut requests = Vec::with_capacity(2);
        if command.stops_first() {
            requests.push(Command::Stop.request());
        }
        requests.push(command.request());

        let follow_up = match command.follow_up() {
            FollowUp::Reload if !self.reload_after_queue_edit => FollowUp::None,
            other => other,
        };
        self.dispatch(requests, follow_up);
    }

    // Requests in one batch leave in order: each is polled once, which puts it
    // in flight, before the next one is built. Earlier responses are never
    // waited for; the follow-up runs once the last request settles.
    fn dispatch(&self, mut requests: Vec<Request>, follow_up: FollowUp) {
        let Some(last) = requests.pop() else {
            return;
        };
        let transport = self.transport.clone();
        let navigator = self.navigator.clone();
        let spawner = self.spawner.clone();
        (self.spawner)(Box::pin(async move {
            for request in requests {
                let path = request.path.clone();
                let mut pending = transport.execute(request);
                match poll!(&mut pending) {
                    Poll::Ready(result) => log_outcome(&path, result),
                    Poll::Pending => spawner(Box::pin(async move {
                        log_outcome(&path, pending.await);
                    })),
                }
            }
            let path = last.path.clone();
            log_outcome(&path, transport.execute(last).await);
            match follow_up {
                FollowUp::None => {}
                FollowUp::Reload => navigator.reload(),
                FollowUp::ShowAlbums => navigator.assign(ALBUMS_PATH),
            }
        }));
    }
}

fn log_outcome(path: &str, result: Result<String, RemoteError>) {
    if let Err(err) = result {
        debug!("command {path} dropped: {err}");
    }
}
