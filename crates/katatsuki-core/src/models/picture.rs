//! Embedded picture types.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// Role of an embedded picture, using the ID3v2 APIC numbering shared by
/// FLAC picture blocks and Xiph comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PictureRole {
    Other,
    Icon,
    OtherIcon,
    CoverFront,
    CoverBack,
    Leaflet,
    Media,
    LeadArtist,
    Artist,
    Conductor,
    Band,
    Composer,
    Lyricist,
    RecordingLocation,
    DuringRecording,
    DuringPerformance,
    ScreenCapture,
    BrightFish,
    Illustration,
    BandLogo,
    PublisherLogo,
    Undefined(u8),
}

impl PictureRole {
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => PictureRole::Other,
            1 => PictureRole::Icon,
            2 => PictureRole::OtherIcon,
            3 => PictureRole::CoverFront,
            4 => PictureRole::CoverBack,
            5 => PictureRole::Leaflet,
            6 => PictureRole::Media,
            7 => PictureRole::LeadArtist,
            8 => PictureRole::Artist,
            9 => PictureRole::Conductor,
            10 => PictureRole::Band,
            11 => PictureRole::Composer,
            12 => PictureRole::Lyricist,
            13 => PictureRole::RecordingLocation,
            14 => PictureRole::DuringRecording,
            15 => PictureRole::DuringPerformance,
            16 => PictureRole::ScreenCapture,
            17 => PictureRole::BrightFish,
            18 => PictureRole::Illustration,
            19 => PictureRole::BandLogo,
            20 => PictureRole::PublisherLogo,
            other => PictureRole::Undefined(other),
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            PictureRole::Other => 0,
            PictureRole::Icon => 1,
            PictureRole::OtherIcon => 2,
            PictureRole::CoverFront => 3,
            PictureRole::CoverBack => 4,
            PictureRole::Leaflet => 5,
            PictureRole::Media => 6,
            PictureRole::LeadArtist => 7,
            PictureRole::Artist => 8,
            PictureRole::Conductor => 9,
            PictureRole::Band => 10,
            PictureRole::Composer => 11,
            PictureRole::Lyricist => 12,
            PictureRole::RecordingLocation => 13,
            PictureRole::DuringRecording => 14,
            PictureRole::DuringPerformance => 15,
            PictureRole::ScreenCapture => 16,
            PictureRole::BrightFish => 17,
            PictureRole::Illustration => 18,
            PictureRole::BandLogo => 19,
            PictureRole::PublisherLogo => 20,
            PictureRole::Undefined(n) => n,
        }
    }
}

/// A picture as enumerated by the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub role: PictureRole,
    pub mime_type: Option<String>,
    pub data: Vec<u8>,
}

impl Picture {
    pub fn new(role: PictureRole, data: impl Into<Vec<u8>>) -> Self {
        Self {
            role,
            mime_type: None,
            data: data.into(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Role-keyed pictures. Each role keeps its entries in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PictureMap {
    entries: Vec<(PictureRole, Vec<Picture>)>,
}

impl PictureMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `picture` under its own role.
    pub fn insert(&mut self, picture: Picture) {
        match self.entries.iter_mut().find(|(role, _)| *role == picture.role) {
            Some((_, pictures)) => pictures.push(picture),
            None => self.entries.push((picture.role, vec![picture])),
        }
    }

    /// Pictures under `role`, in insertion order.
    pub fn get(&self, role: PictureRole) -> &[Picture] {
        self.entries
            .iter()
            .find(|(r, _)| *r == role)
            .map(|(_, pictures)| pictures.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, role: PictureRole) -> bool {
        !self.get(role).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.iter().all(|(_, pictures)| pictures.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, pictures)| pictures.len()).sum()
    }
}

impl FromIterator<Picture> for PictureMap {
    fn from_iter<I: IntoIterator<Item = Picture>>(iter: I) -> Self {
        let mut map = PictureMap::new();
        for picture in iter {
            map.insert(picture);
        }
        map
    }
}

/// The resolved cover image of a track.
///
/// Image data may contain zero bytes; always use `data.len()`.
/// `width` and `height` come from the image header and are zero when the
/// bytes are not a recognised image format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverArt {
    pub role: PictureRole,
    pub mime_type: Option<String>,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
}

impl CoverArt {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

impl From<&Picture> for CoverArt {
    fn from(picture: &Picture) -> Self {
        let (width, height) = image_dimensions(&picture.data);
        Self {
            role: picture.role,
            mime_type: picture.mime_type.clone(),
            width,
            height,
            data: picture.data.clone(),
        }
    }
}

/// Width and height read from an image header, `(0, 0)` if unreadable.
pub fn image_dimensions(data: &[u8]) -> (u32, u32) {
    match imagesize::blob_size(data) {
        Ok(size) => (
            u32::try_from(size.width).unwrap_or(0),
            u32::try_from(size.height).unwrap_or(0),
        ),
        Err(e) => {
            log::debug!("katatsuki: cover art size unreadable: {}", e);
            (0, 0)
        }
    }
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
