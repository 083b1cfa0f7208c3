//! Components mounted into the server-rendered page.

mod app;
mod controls;
mod now_playing;

pub use app::*;
pub use controls::*;
pub use now_playing::*;
