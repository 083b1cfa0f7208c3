//! Now-playing poll loop.
//!
//! Fetches the rendered panel once at startup and then every
//! [`POLL_INTERVAL_MS`], without waiting for the previous fetch. Responses can
//! land out of order; a stale one is simply overwritten by the next tick.

use crate::fragment;
use crate::model::PlaybackState;
use crate::transport::{Request, Spawner, Transport};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

pub const POLL_INTERVAL_MS: u64 = 1000;
pub const NOW_PLAYING_PATH: &str = "/nowplaying";

/// Where fetched state is shown.
pub trait NowPlayingSurface {
    /// Replace the panel contents wholesale with a freshly fetched fragment.
    fn replace_panel(&self, fragment: &str);
    fn set_artwork_src(&self, src: &str);
    /// Called after every applied fragment with the snapshot it carried.
    fn show_state(&self, _state: &PlaybackState) {}
}

#[derive(Clone)]
pub struct PlaybackSyncLoop<T, S> {
    transport: T,
    surface: S,
    spawner: Spawner,
    // Written and read only by `apply`.
    last_displayed_album_id: Rc<RefCell<Option<String>>>,
}

impl<T, S> PlaybackSyncLoop<T, S>
where
    T: Transport + Clone + 'static,
    S: NowPlayingSurface + Clone + 'static,
{
    pub fn new(transport: T, surface: S, spawner: Spawner) -> Self {
        Self {
            transport,
            surface,
            spawner,
            last_displayed_album_id: Rc::new(RefCell::new(None)),
        }
    }

    pub fn last_displayed_album_id(&self) -> Option<String> {
        self.last_displayed_album_id.borrow().clone()
    }

    /// Issue one fetch. Its completion is applied whenever it arrives.
    pub fn tick(&self) {
        let this = self.clone();
        let fetch = self.transport.execute(Request::get(NOW_PLAYING_PATH));
        (self.spawner)(Box::pin(async move {
            match fetch.await {
                Ok(body) => this.apply(&body),
                Err(err) => debug!("now-playing poll skipped: {err}"),
            }
        }));
    }

    /// Show a fetched fragment. The artwork is only touched when the album
    /// changed; rewriting an identical `src` makes the image flash.
    pub fn apply(&self, body: &str) {
        self.surface.replace_panel(body);

        let state = fragment::playback_state(body);
        if let Some(album_id) = state.now_playing_album_id.as_deref() {
            let changed = self.last_displayed_album_id.borrow().as_deref() != Some(album_id);
            if changed {
                self.surface
                    .set_artwork_src(&fragment::artwork_path(album_id));
                *self.last_displayed_album_id.borrow_mut() = Some(album_id.to_string());
            }
        }
        self.surface.show_state(&state);
    }

    /// Poll forever. Only page teardown stops it.
    pub async fn run(self) {
        loop {
            self.tick();
            sleep_ms(POLL_INTERVAL_MS).await;
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep_ms(ms: u64) {
    gloo_timers::future::TimeoutFuture::new(ms as u32).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep_ms(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}
