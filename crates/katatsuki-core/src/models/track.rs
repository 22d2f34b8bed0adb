//! Flat per-track metadata record.

use serde::{Deserialize, Serialize};

use crate::classify::classify;
use crate::container::Container;
use crate::cover::resolve_cover_art;
use crate::fields;
use crate::models::file_type::TrackFileType;
use crate::models::picture::CoverArt;

/// Everything a media library needs to know about one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// `;`-joined when there are several.
    pub album_artists: String,
    pub musicbrainz_track_id: String,
    pub year: u32,
    pub track_number: u32,
    pub disc_number: u32,
    /// Kilobits per second.
    pub bitrate: u32,
    pub sample_rate: u32,
    pub duration_ms: u64,
    pub file_type: TrackFileType,
    /// Cover image size in pixels, zero when absent or unreadable. Kept by
    /// [`TrackMetadata::without_cover_art`].
    pub front_cover_width: u32,
    pub front_cover_height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_art: Option<CoverArt>,
}

impl TrackMetadata {
    pub fn from_container(container: &dyn Container) -> Self {
        let properties = container.properties();
        let cover_art = resolve_cover_art(container);
        let (front_cover_width, front_cover_height) =
            cover_art.as_ref().map(CoverArt::dimensions).unwrap_or((0, 0));
        Self {
            title: fields::title(container),
            artist: fields::artist(container),
            album: fields::album(container),
            album_artists: fields::album_artists(container),
            musicbrainz_track_id: fields::musicbrainz_track_id(container),
            year: container.year(),
            track_number: container.track_number(),
            disc_number: fields::disc_number(container),
            bitrate: properties.bitrate,
            sample_rate: properties.sample_rate,
            duration_ms: properties.duration_ms,
            file_type: classify(container),
            front_cover_width,
            front_cover_height,
            cover_art,
        }
    }

    pub fn has_cover_art(&self) -> bool {
        self.cover_art.is_some()
    }

    pub fn album_artist_list(&self) -> Vec<String> {
        fields::split_album_artists(&self.album_artists)
    }

    /// Drop the cover bytes, e.g. before printing.
    pub fn without_cover_art(mut self) -> Self {
        self.cover_art = None;
        self
    }
}
