//! Read-only view of a parsed audio container.
//!
//! The classifier, cover art resolver and field normalizer only ever see a
//! [`Container`]. Parsing is someone else's job: the `probe` backend builds a
//! [`ContainerSnapshot`] from lofty, and tests build one by hand.

use std::collections::BTreeMap;

use crate::models::picture::{Picture, PictureMap};

/// Codec carried inside an MP4 container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mp4Codec {
    Aac,
    Alac,
    Unknown,
}

/// Concrete container family, with the per-family data the classifier needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    /// MPEG layer audio. `has_vbr_header` is set when the first frame
    /// carries a Xing, Info or VBRI header.
    Mpeg { has_vbr_header: bool },
    Mp4 { codec: Mp4Codec },
    Flac,
    OggFlac,
    Aiff,
    Ape,
    Vorbis,
    Opus,
    Other,
}

impl ContainerKind {
    /// Whether the container keeps a format-native picture list
    /// (FLAC picture blocks or Xiph comment pictures).
    pub fn has_native_pictures(self) -> bool {
        matches!(
            self,
            ContainerKind::Flac | ContainerKind::OggFlac | ContainerKind::Vorbis | ContainerKind::Opus
        )
    }
}

/// Structured audio properties. Unknown values are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AudioProperties {
    pub bit_depth: u32,
    /// Kilobits per second.
    pub bitrate: u32,
    /// Hertz.
    pub sample_rate: u32,
    /// Milliseconds.
    pub duration_ms: u64,
}

/// Generic tag property map: upper-cased key to an ordered list of values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
    items: BTreeMap<String, Vec<String>>,
}

impl TagMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value under `key`.
    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        self.items
            .entry(key.to_ascii_uppercase())
            .or_default()
            .push(value.into());
    }

    /// Builder form of [`TagMap::push`] for every value in `values`.
    pub fn with<I, S>(mut self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for value in values {
            self.push(key, value);
        }
        self
    }

    /// All values under `key`, possibly empty.
    pub fn get(&self, key: &str) -> &[String] {
        self.items
            .get(&key.to_ascii_uppercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.get(key).first().map(String::as_str)
    }

    /// Merge `other` into `self`, keeping existing keys untouched.
    pub fn merge_missing(&mut self, other: TagMap) {
        for (key, values) in other.items {
            self.items.entry(key).or_insert(values);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Query surface of a parsed audio file.
pub trait Container {
    fn kind(&self) -> ContainerKind;
    fn properties(&self) -> &AudioProperties;
    fn year(&self) -> u32;
    fn track_number(&self) -> u32;
    fn tags(&self) -> &TagMap;
    /// Format-native picture list. Empty for kinds without one.
    fn native_pictures(&self) -> &[Picture];
    /// Generic role-keyed pictures.
    fn pictures(&self) -> &PictureMap;
}

/// Owned, plain-data [`Container`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSnapshot {
    pub kind: ContainerKind,
    pub properties: AudioProperties,
    pub year: u32,
    pub track_number: u32,
    pub tags: TagMap,
    pub native_pictures: Vec<Picture>,
    pub pictures: PictureMap,
}

impl ContainerSnapshot {
    pub fn new(kind: ContainerKind) -> Self {
        Self {
            kind,
            properties: AudioProperties::default(),
            year: 0,
            track_number: 0,
            tags: TagMap::new(),
            native_pictures: Vec::new(),
            pictures: PictureMap::new(),
        }
    }

    pub fn with_bit_depth(mut self, bit_depth: u32) -> Self {
        self.properties.bit_depth = bit_depth;
        self
    }

    pub fn with_properties(mut self, properties: AudioProperties) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_tags(mut self, tags: TagMap) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_native_picture(mut self, picture: Picture) -> Self {
        self.native_pictures.push(picture);
        self
    }

    pub fn with_picture(mut self, picture: Picture) -> Self {
        self.pictures.insert(picture);
        self
    }
}

impl Container for ContainerSnapshot {
    fn kind(&self) -> ContainerKind {
        self.kind
    }

    fn properties(&self) -> &AudioProperties {
        &self.properties
    }

    fn year(&self) -> u32 {
        self.year
    }

    fn track_number(&self) -> u32 {
        self.track_number
    }

    fn tags(&self) -> &TagMap {
        &self.tags
    }

    fn native_pictures(&self) -> &[Picture] {
        &self.native_pictures
    }

    fn pictures(&self) -> &PictureMap {
        &self.pictures
    }
}
