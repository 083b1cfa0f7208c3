use tracing::info;

/// Page-level navigation the control surface can request.
pub trait Navigator {
    /// Navigate without leaving a history entry behind.
    fn replace(&self, path: &str);
    /// Navigate and push a history entry.
    fn assign(&self, path: &str);
    fn reload(&self);
}

/// Navigator for targets with no server-rendered page to move between.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn replace(&self, path: &str) {
        info!("navigation to {path} requested (no page to replace)");
    }

    fn assign(&self, path: &str) {
        info!("navigation to {path} requested (no page to load)");
    }

    fn reload(&self) {
        info!("page reload requested (no page to reload)");
    }
}
