use crate::error::LayoutError;

/// Width of the layout viewport. Read fresh on every layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportMetrics {
    pub client_width_px: u32,
}

/// Grid inputs rendered into the page by the server.
///
/// `columns_requested` reflects the URL the page was fetched with and is
/// always at least 1 once constructed through [`GridConfiguration::new`] or
/// [`GridConfiguration::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridConfiguration {
    pub columns_requested: u32,
    pub total_album_count: u32,
}

impl GridConfiguration {
    pub fn new(columns_requested: u32, total_album_count: u32) -> Result<Self, LayoutError> {
        if columns_requested == 0 {
            return Err(LayoutError::ZeroColumns);
        }
        Ok(Self {
            columns_requested,
            total_album_count,
        })
    }

    /// Build from the raw text the page carries for each input.
    pub fn parse(columns: Option<&str>, album_count: Option<&str>) -> Result<Self, LayoutError> {
        let columns = parse_count("columnsRequested", columns)?;
        let album_count = parse_count("totalAlbumCount", album_count)?;
        Self::new(columns, album_count)
    }
}

fn parse_count(field: &'static str, raw: Option<&str>) -> Result<u32, LayoutError> {
    let raw = raw.ok_or(LayoutError::MissingInput(field))?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(LayoutError::MissingInput(field));
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| LayoutError::InvalidNumber {
            field,
            value: trimmed.to_string(),
        })
}

/// Last playback snapshot observed by polling.
///
/// Replaced wholesale on every successful poll, never merged. `is_paused` is
/// `None` when the fragment does not report pause state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub now_playing_album_id: Option<String>,
    pub is_paused: Option<bool>,
}
