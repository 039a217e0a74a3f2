//! Tag-to-track mapping
//!
//! Immutable exact-match lookup from tag identifier to track URI, built once
//! from the `[tracks]` table of the config file. An unmapped tag is an
//! expected condition, not an error.

use std::collections::HashMap;
use tracing::warn;

/// Immutable mapping from tag identifier to track URI
#[derive(Debug, Clone)]
pub struct TrackMap {
    tracks: HashMap<String, String>,
}

impl TrackMap {
    /// Build the mapping. Warns when empty: the daemon still runs, but every
    /// tag will be unrecognized until the config gains a `[tracks]` table.
    pub fn new(tracks: HashMap<String, String>) -> Self {
        if tracks.is_empty() {
            warn!("Track mapping is empty; all tags will be unrecognized");
        }
        Self { tracks }
    }

    /// Look up the track URI for a tag identifier
    pub fn resolve(&self, tag_id: &str) -> Option<&str> {
        self.tracks.get(tag_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_map() -> TrackMap {
        let mut tracks = HashMap::new();
        tracks.insert(
            "12345890".to_string(),
            "NAS/TRX-FLAC/YES/The Yes Album/01 Yours Is No Disgrace.flac".to_string(),
        );
        TrackMap::new(tracks)
    }

    #[test]
    fn test_resolve_known_tag() {
        let map = sample_map();
        assert_eq!(
            map.resolve("12345890"),
            Some("NAS/TRX-FLAC/YES/The Yes Album/01 Yours Is No Disgrace.flac")
        );
    }

    #[test]
    fn test_resolve_unknown_tag() {
        let map = sample_map();
        assert_eq!(map.resolve("99999999"), None);
    }

    #[test]
    fn test_empty_map_resolves_nothing() {
        let map = TrackMap::new(HashMap::new());
        assert!(map.is_empty());
        assert_eq!(map.resolve("12345890"), None);
    }
}
