//! Tag field extraction with per-field defaults.
//!
//! Every extractor is total. Missing text is `""`, a missing disc number
//! is 1. Numeric fields other than the disc number come straight from the
//! container's structured surface.

use crate::container::Container;

/// Delimiter for every multi-valued text field.
pub const MULTI_VALUE_DELIMITER: &str = ";";

pub const TITLE: &str = "TITLE";
pub const ARTIST: &str = "ARTIST";
pub const ALBUM: &str = "ALBUM";
pub const ALBUM_ARTIST: &str = "ALBUMARTIST";
pub const DISC_NUMBER: &str = "DISCNUMBER";
pub const MUSICBRAINZ_TRACK_ID: &str = "MUSICBRAINZ_TRACKID";

const DEFAULT_DISC_NUMBER: u32 = 1;

pub fn title(container: &dyn Container) -> String {
    first_or_empty(container, TITLE)
}

pub fn artist(container: &dyn Container) -> String {
    first_or_empty(container, ARTIST)
}

pub fn album(container: &dyn Container) -> String {
    first_or_empty(container, ALBUM)
}

/// All album artists joined with [`MULTI_VALUE_DELIMITER`].
pub fn album_artists(container: &dyn Container) -> String {
    container.tags().get(ALBUM_ARTIST).join(MULTI_VALUE_DELIMITER)
}

pub fn musicbrainz_track_id(container: &dyn Container) -> String {
    first_or_empty(container, MUSICBRAINZ_TRACK_ID)
}

pub fn disc_number(container: &dyn Container) -> u32 {
    container
        .tags()
        .first(DISC_NUMBER)
        .and_then(parse_leading_number)
        .unwrap_or(DEFAULT_DISC_NUMBER)
}

/// Inverse of [`album_artists`].
pub fn split_album_artists(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined
        .split(MULTI_VALUE_DELIMITER)
        .map(str::to_string)
        .collect()
}

fn first_or_empty(container: &dyn Container, key: &str) -> String {
    container.tags().first(key).unwrap_or_default().to_string()
}

/// Parse the leading run of digits, so `"2/3"` is 2. Leading whitespace is
/// skipped. No digits, or a value that overflows, is `None`.
fn parse_leading_number(value: &str) -> Option<u32> {
    let trimmed = value.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{ContainerKind, ContainerSnapshot, TagMap};

    fn with_tags(tags: TagMap) -> ContainerSnapshot {
        ContainerSnapshot::new(ContainerKind::Flac).with_tags(tags)
    }

    #[test]
    fn disc_number_parses() {
        let container = with_tags(TagMap::new().with(DISC_NUMBER, ["3"]));
        assert_eq!(disc_number(&container), 3);
    }

    #[test]
    fn disc_number_defaults_to_one() {
        assert_eq!(disc_number(&with_tags(TagMap::new())), 1);
        assert_eq!(disc_number(&with_tags(TagMap::new().with(DISC_NUMBER, [""]))), 1);
        assert_eq!(disc_number(&with_tags(TagMap::new().with(DISC_NUMBER, ["abc"]))), 1);
        assert_eq!(disc_number(&with_tags(TagMap::new().with(DISC_NUMBER, ["/2"]))), 1);
        assert_eq!(
            disc_number(&with_tags(TagMap::new().with(DISC_NUMBER, ["99999999999"]))),
            1
        );
    }

    #[test]
    fn disc_number_reads_leading_digits() {
        assert_eq!(disc_number(&with_tags(TagMap::new().with(DISC_NUMBER, ["2/3"]))), 2);
        assert_eq!(disc_number(&with_tags(TagMap::new().with(DISC_NUMBER, [" 4"]))), 4);
        assert_eq!(disc_number(&with_tags(TagMap::new().with(DISC_NUMBER, ["0"]))), 0);
    }

    #[test]
    fn disc_number_uses_first_value() {
        let container = with_tags(TagMap::new().with(DISC_NUMBER, ["5", "6"]));
        assert_eq!(disc_number(&container), 5);
    }

    #[test]
    fn album_artists_join_with_semicolon() {
        let container = with_tags(TagMap::new().with(ALBUM_ARTIST, ["Alice", "Bob"]));
        assert_eq!(album_artists(&container), "Alice;Bob");
        assert_eq!(album_artists(&with_tags(TagMap::new())), "");
    }

    #[test]
    fn split_reverses_join() {
        assert_eq!(split_album_artists("Alice;Bob"), vec!["Alice", "Bob"]);
        assert!(split_album_artists("").is_empty());
    }

    #[test]
    fn text_fields_default_to_empty() {
        let empty = with_tags(TagMap::new());
        assert_eq!(title(&empty), "");
        assert_eq!(artist(&empty), "");
        assert_eq!(album(&empty), "");
        assert_eq!(musicbrainz_track_id(&empty), "");
    }

    #[test]
    fn text_fields_take_first_value() {
        let container = with_tags(
            TagMap::new()
                .with(TITLE, ["Song", "Alternate"])
                .with(ARTIST, ["Artist"])
                .with(ALBUM, ["Album"])
                .with(MUSICBRAINZ_TRACK_ID, ["a1b2", "c3d4"]),
        );
        assert_eq!(title(&container), "Song");
        assert_eq!(artist(&container), "Artist");
        assert_eq!(album(&container), "Album");
        assert_eq!(musicbrainz_track_id(&container), "a1b2");
    }
}
