//! Wire models for the Qobuz catalog API
//!
//! Upstream payloads are deserialized leniently: every field the
//! adapter does not strictly need is optional, so a partial or
//! evolving upstream schema never fails the whole search. Raw entries
//! are normalized into [`NormalizedTrack`] before leaving this crate.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fallback title when the upstream omits one
pub const UNKNOWN_TITLE: &str = "Unknown title";

/// Fallback artist when the upstream omits one
pub const UNKNOWN_ARTIST: &str = "Unknown artist";

/// Top-level envelope of `GET /search/getResults`
#[derive(Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub tracks: TrackPage,
}

/// Paged list of raw track entries
#[derive(Debug, Default, Deserialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<RawTrack>,
    /// Total hits; falls back to the page size when the upstream
    /// omits it
    #[serde(default)]
    pub total: Option<u64>,
}

/// A track entry as the upstream ships it (everything optional)
#[derive(Debug, Default, Deserialize)]
pub struct RawTrack {
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<Performer>,
    #[serde(default)]
    pub performer: Option<Performer>,
    #[serde(default)]
    pub album: Option<RawAlbum>,
    #[serde(default)]
    pub image: Option<ImageSet>,
    #[serde(default)]
    pub cover_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Performer {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawAlbum {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub image: Option<ImageSet>,
    #[serde(default)]
    pub cover: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ImageSet {
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub large: Option<String>,
}

/// A search hit after normalization
///
/// `title` and `artist` are always filled (fallback values if the
/// upstream omitted them), `id` is the catalog id or a synthesized
/// UUID. This is the shape the queue API accepts verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NormalizedTrack {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

/// Normalize a raw upstream entry
///
/// Cover resolution order: album small image, album cover, track
/// small image, track cover URL. A missing catalog id gets a random
/// UUID so queue deduplication by id still behaves.
pub fn normalize_track(raw: RawTrack) -> NormalizedTrack {
    let id = match raw.id {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => uuid::Uuid::new_v4().to_string(),
    };

    let title = non_blank(raw.title).unwrap_or_else(|| UNKNOWN_TITLE.to_string());
    // The dedicated artist object wins over the performer credit
    let artist = raw
        .artist
        .and_then(|a| non_blank(a.name))
        .or_else(|| raw.performer.and_then(|p| non_blank(p.name)))
        .unwrap_or_else(|| UNKNOWN_ARTIST.to_string());

    let (album_title, album_image, album_cover) = match raw.album {
        Some(album) => (non_blank(album.title), album.image, non_blank(album.cover)),
        None => (None, None, None),
    };

    let cover = album_image
        .and_then(|i| non_blank(i.small))
        .or(album_cover)
        .or_else(|| raw.image.and_then(|i| non_blank(i.small)))
        .or_else(|| non_blank(raw.cover_url));

    NormalizedTrack {
        id,
        title,
        artist,
        album: album_title,
        cover,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_complete_entry() {
        let raw: RawTrack = serde_json::from_value(serde_json::json!({
            "id": 12345,
            "title": "Song A",
            "performer": {"name": "Artist X"},
            "album": {
                "title": "Album Y",
                "image": {"small": "https://img/album-small.jpg"}
            },
            "image": {"small": "https://img/track-small.jpg"}
        }))
        .unwrap();

        let track = normalize_track(raw);
        assert_eq!(track.id, "12345");
        assert_eq!(track.title, "Song A");
        assert_eq!(track.artist, "Artist X");
        assert_eq!(track.album.as_deref(), Some("Album Y"));
        // Album image wins over the track-level image
        assert_eq!(track.cover.as_deref(), Some("https://img/album-small.jpg"));
    }

    #[test]
    fn test_normalize_fills_fallbacks() {
        let track = normalize_track(RawTrack::default());
        assert_eq!(track.title, UNKNOWN_TITLE);
        assert_eq!(track.artist, UNKNOWN_ARTIST);
        assert!(track.album.is_none());
        assert!(track.cover.is_none());
        // Synthesized id parses as a UUID
        assert!(uuid::Uuid::parse_str(&track.id).is_ok());
    }

    #[test]
    fn test_cover_fallback_chain() {
        let raw: RawTrack = serde_json::from_value(serde_json::json!({
            "id": "t1",
            "title": "Song",
            "album": {"cover": "https://img/album-cover.jpg"},
            "cover_url": "https://img/legacy.jpg"
        }))
        .unwrap();
        assert_eq!(
            normalize_track(raw).cover.as_deref(),
            Some("https://img/album-cover.jpg")
        );

        let raw: RawTrack = serde_json::from_value(serde_json::json!({
            "id": "t2",
            "title": "Song",
            "cover_url": "https://img/legacy.jpg"
        }))
        .unwrap();
        assert_eq!(
            normalize_track(raw).cover.as_deref(),
            Some("https://img/legacy.jpg")
        );
    }

    #[test]
    fn test_artist_object_wins_over_performer() {
        let raw: RawTrack = serde_json::from_value(serde_json::json!({
            "id": "t3",
            "title": "Song",
            "artist": {"name": "Main Artist"},
            "performer": {"name": "Credited Performer"}
        }))
        .unwrap();
        assert_eq!(normalize_track(raw).artist, "Main Artist");
    }

    #[test]
    fn test_blank_strings_are_treated_as_missing() {
        let raw: RawTrack = serde_json::from_value(serde_json::json!({
            "id": "  ",
            "title": "   ",
            "performer": {"name": ""}
        }))
        .unwrap();

        let track = normalize_track(raw);
        assert_eq!(track.title, UNKNOWN_TITLE);
        assert_eq!(track.artist, UNKNOWN_ARTIST);
        assert!(uuid::Uuid::parse_str(&track.id).is_ok());
    }
}
