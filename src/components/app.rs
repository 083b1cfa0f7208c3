use crate::components::{NowPlaying, PlayerControls};
use dioxus::core::{spawn_forever, Runtime, RuntimeGuard};
use dioxus::prelude::*;
use futures_util::future::LocalBoxFuture;
use std::rc::Rc;
use stereoremote::config::{load_settings, RemoteSettings};
use stereoremote::remote::CommandDispatcher;
use stereoremote::transport::{HttpTransport, Spawner};

#[cfg(not(target_arch = "wasm32"))]
pub type PageNavigator = stereoremote::navigator::LogNavigator;
#[cfg(target_arch = "wasm32")]
pub type PageNavigator = stereoremote::web::BrowserNavigator;

/// Paused flag shared by the play/pause button and the poll loop.
#[derive(Clone, Copy)]
pub struct PausedSignal(pub Signal<bool>);

/// Handles for talking to the player server, provided as context.
#[derive(Clone)]
pub struct Remote {
    pub settings: RemoteSettings,
    pub transport: HttpTransport,
    spawner: Spawner,
}

impl Remote {
    fn new(settings: RemoteSettings, spawner: Spawner) -> Self {
        let transport = HttpTransport::new(settings.base_url());
        Self {
            settings,
            transport,
            spawner,
        }
    }

    pub fn spawner(&self) -> Spawner {
        self.spawner.clone()
    }

    pub fn dispatcher(&self) -> CommandDispatcher<HttpTransport, PageNavigator> {
        CommandDispatcher::new(
            self.transport.clone(),
            PageNavigator::default(),
            self.spawner(),
        )
        .with_queue_reload(self.settings.reload_after_queue_edit)
    }
}

// Tasks are parked on the root scope so work handed over from plain DOM
// listeners (outside any component) still reaches the executor.
fn runtime_spawner() -> Spawner {
    let runtime = Runtime::current();
    Rc::new(move |task: LocalBoxFuture<'static, ()>| {
        let _guard = RuntimeGuard::new(runtime.clone());
        let _ = spawn_forever(task);
    })
}

#[component]
pub fn App() -> Element {
    let remote = use_hook(|| Remote::new(load_settings(), runtime_spawner()));
    let paused = use_signal(|| false);
    use_context_provider(|| remote.clone());
    use_context_provider(|| PausedSignal(paused));

    #[cfg(target_arch = "wasm32")]
    {
        let remote = remote.clone();
        use_hook(move || {
            stereoremote::web::install_grid_layout(remote.settings.tile_padding_px);
            stereoremote::web::install_gesture_delegation(remote.dispatcher());
        });
    }

    rsx! {
        div { class: "stereo-remote",
            NowPlaying {}
            PlayerControls {}
        }
    }
}
