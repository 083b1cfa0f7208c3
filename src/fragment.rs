//! Reading the now-playing fragment the server renders.
//!
//! The fragment is treated as opaque markup except for two marker elements:
//! `#nowplaying-album-notify` (album identifier as text) and the optional
//! `#nowplaying-paused-notify` (`true`/`false`).

use crate::model::PlaybackState;
use once_cell::sync::Lazy;
use regex::Regex;

const ALBUM_MARKER: &str = "nowplaying-album-notify";
const PAUSED_MARKER: &str = "nowplaying-paused-notify";

static ALBUM_TEXT: Lazy<Regex> = Lazy::new(|| marker_pattern(ALBUM_MARKER));
static PAUSED_TEXT: Lazy<Regex> = Lazy::new(|| marker_pattern(PAUSED_MARKER));

fn marker_pattern(id: &str) -> Regex {
    let pattern = format!(r#"(?s)(?:^|\s)id\s*=\s*["']{id}["'][^>]*>([^<]*)<"#);
    Regex::new(&pattern).expect("marker pattern is a valid regex")
}

fn marker_text(pattern: &Regex, fragment: &str) -> Option<String> {
    let raw = pattern.captures(fragment)?.get(1)?.as_str();
    let text = decode_entities(raw.trim());
    (!text.is_empty()).then_some(text)
}

// Only what an autoescaping template engine emits.
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#34;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

pub fn album_id(fragment: &str) -> Option<String> {
    marker_text(&ALBUM_TEXT, fragment)
}

pub fn paused(fragment: &str) -> Option<bool> {
    match marker_text(&PAUSED_TEXT, fragment)?.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Snapshot of everything the fragment reports, built fresh each time.
pub fn playback_state(fragment: &str) -> PlaybackState {
    PlaybackState {
        now_playing_album_id: album_id(fragment),
        is_paused: paused(fragment),
    }
}

/// Artwork URL for an album identifier, relative to the server root.
pub fn artwork_path(album_id: &str) -> String {
    format!("/artwork/{}", urlencoding::encode(album_id))
}
