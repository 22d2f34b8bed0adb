//! katatsuki-core — audio file classification and metadata extraction.
//!
//! Three independent, total components over a read-only [`Container`]:
//!
//! ```text
//! classify           container kind + bit depth / VBR marker → TrackFileType
//! resolve_cover_art  native picture list, then generic picture map
//! fields             tag lookups with per-field defaults
//! ```
//!
//! [`TrackMetadata::from_container`] runs all three. The `probe` feature
//! (on by default) provides a lofty-backed [`probe::open`] that turns a
//! path into a [`ContainerSnapshot`].

pub mod classify;
pub mod config;
pub mod container;
pub mod cover;
pub mod error;
pub mod fields;
pub mod models;
#[cfg(feature = "probe")]
pub mod probe;

pub use classify::classify;
pub use config::{ParsingMode, ReadOptions};
pub use container::{AudioProperties, Container, ContainerKind, ContainerSnapshot, Mp4Codec, TagMap};
pub use cover::{has_cover_art, resolve_cover_art};
pub use error::{Error, Result};
pub use models::*;

/// Open `path` and extract its metadata.
///
/// A file that opens but classifies as `Unknown` is still returned; callers
/// decide whether that counts as unsupported.
#[cfg(feature = "probe")]
pub fn read_track(path: impl AsRef<std::path::Path>, options: &ReadOptions) -> Result<TrackMetadata> {
    let container = probe::open(path, options)?;
    Ok(TrackMetadata::from_container(&container))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::{ALBUM_ARTIST, DISC_NUMBER};

    fn flac24_with_other_picture() -> ContainerSnapshot {
        ContainerSnapshot::new(ContainerKind::Flac)
            .with_properties(AudioProperties {
                bit_depth: 24,
                bitrate: 2116,
                sample_rate: 96_000,
                duration_ms: 241_500,
            })
            .with_tags(
                TagMap::new()
                    .with("TITLE", ["Opening"])
                    .with("ARTIST", ["X"])
                    .with(ALBUM_ARTIST, ["X"]),
            )
            .with_native_picture(Picture::new(PictureRole::Other, vec![0xFF, 0xD8, 0x00, 0x01]))
    }

    #[test]
    fn flac24_scenario() {
        let metadata = TrackMetadata::from_container(&flac24_with_other_picture());

        assert_eq!(metadata.file_type, TrackFileType::FLAC24);
        assert_eq!(metadata.cover_art.as_ref().unwrap().data, vec![0xFF, 0xD8, 0x00, 0x01]);
        assert_eq!(metadata.album_artists, "X");
        assert_eq!(metadata.disc_number, 1);
        assert_eq!(metadata.title, "Opening");
        assert_eq!(metadata.album, "");
        assert_eq!(metadata.musicbrainz_track_id, "");
        assert_eq!(metadata.sample_rate, 96_000);
        assert_eq!(metadata.duration_ms, 241_500);
        assert_eq!((metadata.front_cover_width, metadata.front_cover_height), (0, 0));
    }

    #[test]
    fn front_cover_size_survives_stripping() {
        let mut png = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR".to_vec();
        png.extend_from_slice(&640u32.to_be_bytes());
        png.extend_from_slice(&480u32.to_be_bytes());
        png.extend_from_slice(&[8, 2, 0, 0, 0, 0, 0, 0, 0]);
        let container = ContainerSnapshot::new(ContainerKind::Flac)
            .with_native_picture(Picture::new(PictureRole::CoverFront, png).with_mime_type("image/png"));

        let metadata = TrackMetadata::from_container(&container);
        assert_eq!(metadata.cover_art.as_ref().unwrap().dimensions(), (640, 480));

        let stripped = metadata.without_cover_art();
        assert_eq!(stripped.front_cover_width, 640);
        assert_eq!(stripped.front_cover_height, 480);
        assert!(!stripped.has_cover_art());
    }

    #[test]
    fn structured_fields_pass_through() {
        let mut container = ContainerSnapshot::new(ContainerKind::Mpeg { has_vbr_header: true })
            .with_tags(TagMap::new().with(DISC_NUMBER, ["2"]));
        container.year = 1999;
        container.track_number = 7;
        container.properties.bitrate = 245;
        container.properties.sample_rate = 44_100;

        let metadata = TrackMetadata::from_container(&container);
        assert_eq!(metadata.file_type, TrackFileType::MP3VBR);
        assert_eq!(metadata.year, 1999);
        assert_eq!(metadata.track_number, 7);
        assert_eq!(metadata.disc_number, 2);
        assert_eq!(metadata.bitrate, 245);
        assert!(!metadata.has_cover_art());
    }

    #[test]
    fn empty_container_uses_defaults() {
        let metadata = TrackMetadata::from_container(&ContainerSnapshot::new(ContainerKind::Other));
        assert_eq!(metadata.file_type, TrackFileType::Unknown);
        assert_eq!(metadata.title, "");
        assert_eq!(metadata.album_artists, "");
        assert_eq!(metadata.disc_number, 1);
        assert_eq!(metadata.year, 0);
        assert_eq!(metadata.cover_art, None);
    }

    #[test]
    fn metadata_json_shape() {
        let metadata = TrackMetadata::from_container(&flac24_with_other_picture());
        let json = serde_json::to_value(&metadata).unwrap();

        assert_eq!(json["file_type"], 4);
        assert_eq!(json["album_artists"], "X");
        assert_eq!(json["disc_number"], 1);
        assert_eq!(json["cover_art"]["role"], "other");
        assert_eq!(json["cover_art"]["data"], "/9gAAQ==");

        let stripped = serde_json::to_value(metadata.clone().without_cover_art()).unwrap();
        assert!(stripped.get("cover_art").is_none());

        let back: TrackMetadata = serde_json::from_value(json).unwrap();
        assert_eq!(back, metadata);
    }

    #[test]
    fn album_artist_list_splits() {
        let container = ContainerSnapshot::new(ContainerKind::Vorbis)
            .with_tags(TagMap::new().with(ALBUM_ARTIST, ["Alice", "Bob"]));
        let metadata = TrackMetadata::from_container(&container);
        assert_eq!(metadata.album_artists, "Alice;Bob");
        assert_eq!(metadata.album_artist_list(), vec!["Alice", "Bob"]);
    }

    #[cfg(feature = "probe")]
    #[test]
    fn read_track_missing_file() {
        let result = read_track("/nonexistent/song.mp3", &ReadOptions::default());
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
