//! Bindings between the core and the server-rendered page.

use crate::error::LayoutError;
use crate::gestures::command_from_gesture;
use crate::layout::{GridLayoutResolver, GridSurface};
use crate::model::{GridConfiguration, ViewportMetrics};
use crate::navigator::Navigator;
use crate::remote::CommandDispatcher;
use crate::transport::Transport;
use tracing::{debug, warn};
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, Document, Element, HtmlSelectElement};

const COLUMNS_ID: &str = "albums-row-width-container";
const ALBUM_COUNT_ID: &str = "retrieve-album-size";
const COVER_CLASS: &str = "album-cover-display";
const GESTURE_SELECTOR: &str = "[data-command]";

fn document() -> Option<Document> {
    window()?.document()
}

fn element_text(id: &str) -> Option<String> {
    document()?.get_element_by_id(id)?.text_content()
}

/// `window.location` based navigation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn replace(&self, path: &str) {
        let Some(win) = window() else {
            return;
        };
        if let Err(err) = win.location().replace(path) {
            warn!("could not replace location with {path}: {err:?}");
        }
    }

    fn assign(&self, path: &str) {
        let Some(win) = window() else {
            return;
        };
        if let Err(err) = win.location().assign(path) {
            warn!("could not navigate to {path}: {err:?}");
        }
    }

    fn reload(&self) {
        let Some(win) = window() else {
            return;
        };
        if let Err(err) = win.location().reload() {
            warn!("could not reload the page: {err:?}");
        }
    }
}

/// The album grid page as rendered by the server.
struct BrowserGrid;

impl GridSurface for BrowserGrid {
    fn viewport(&self) -> Result<ViewportMetrics, LayoutError> {
        let width = document()
            .and_then(|doc| doc.document_element())
            .map(|root| root.client_width())
            .ok_or(LayoutError::MissingInput("clientWidth"))?;
        Ok(ViewportMetrics {
            client_width_px: u32::try_from(width).unwrap_or(0),
        })
    }

    fn grid_configuration(&self) -> Result<GridConfiguration, LayoutError> {
        GridConfiguration::parse(
            element_text(COLUMNS_ID).as_deref(),
            element_text(ALBUM_COUNT_ID).as_deref(),
        )
    }

    fn apply_tile_side(&self, side_px: u32) {
        let Some(doc) = document() else {
            return;
        };
        let side = side_px.to_string();
        let tiles = doc.get_elements_by_class_name(COVER_CLASS);
        for index in 0..tiles.length() {
            let Some(tile) = tiles.item(index) else {
                continue;
            };
            for attribute in ["width", "height"] {
                if let Err(err) = tile.set_attribute(attribute, &side) {
                    debug!("album tile {attribute} not set: {err:?}");
                }
            }
        }
    }
}

fn run_layout_pass(resolver: &GridLayoutResolver<BrowserNavigator>) {
    if let Err(err) = resolver.run_pass(&BrowserGrid) {
        warn!("album grid layout skipped: {err}");
    }
}

/// Size the album grid now and on every resize. Returns `false` on pages that
/// carry no grid.
pub fn install_grid_layout(padding_px: u32) -> bool {
    if element_text(COLUMNS_ID).is_none() {
        return false;
    }
    let Some(win) = window() else {
        return false;
    };

    let resolver = GridLayoutResolver::new(BrowserNavigator, padding_px);
    run_layout_pass(&resolver);

    let on_resize = Closure::wrap(
        Box::new(move || run_layout_pass(&resolver)) as Box<dyn FnMut()>
    );
    let _ = win.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
    on_resize.forget();
    true
}

// `data-playlist` wins; otherwise `data-picker` names a <select> whose
// selected option text is the playlist.
fn gesture_argument(source: &Element, name: &str) -> Option<String> {
    if let Some(value) = source.get_attribute(&format!("data-{name}")) {
        return Some(value);
    }
    if name != "playlist" {
        return None;
    }
    let picker_id = source.get_attribute("data-picker")?;
    let picker: HtmlSelectElement = document()?
        .get_element_by_id(&picker_id)?
        .dyn_into()
        .ok()?;
    let selected = u32::try_from(picker.selected_index()).ok()?;
    picker.item(selected)?.text_content()
}

/// One document-level click listener for every `data-command` element the
/// server renders.
pub fn install_gesture_delegation<T>(dispatcher: CommandDispatcher<T, BrowserNavigator>)
where
    T: Transport + Clone + 'static,
{
    let Some(doc) = document() else {
        return;
    };

    let on_click = Closure::wrap(Box::new(move |event: web_sys::Event| {
        let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        let Ok(Some(source)) = target.closest(GESTURE_SELECTOR) else {
            return;
        };
        let Some(action) = source.get_attribute("data-command") else {
            return;
        };
        match command_from_gesture(&action, |name| gesture_argument(&source, name)) {
            Some(command) => {
                event.prevent_default();
                dispatcher.send(command);
            }
            None => debug!("ignored `{action}` gesture"),
        }
    }) as Box<dyn FnMut(web_sys::Event)>);

    let _ = doc.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref());
    on_click.forget();
}
