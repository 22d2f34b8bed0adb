//! Track file type classification codes.
//!
//! The integer assigned to each variant is persisted by downstream
//! consumers, so the values below are fixed. Serialization goes through
//! the integer code, never the variant name.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Codec family plus bit depth or VBR status of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u32", try_from = "u32")]
#[repr(u32)]
pub enum TrackFileType {
    Unknown = 0,

    // FLAC range is [1, 6]
    FLAC4 = 1,
    FLAC8 = 2,
    FLAC16 = 3,
    FLAC24 = 4,
    FLAC32 = 5,
    FLAC = 6,

    // Lossy range is [7, 11]
    MP3CBR = 7,
    MP3VBR = 8,
    AAC = 9,
    Vorbis = 10,
    Opus = 11,

    // ALAC range is [12, 14]
    ALAC16 = 12,
    ALAC24 = 13,
    ALAC = 14,

    // AIFF range is [15, 20]
    AIFF4 = 15,
    AIFF8 = 16,
    AIFF16 = 17,
    AIFF24 = 18,
    AIFF32 = 19,
    AIFF = 20,

    // Monkey's Audio range is [21, 24]
    MonkeysAudio8 = 21,
    MonkeysAudio16 = 22,
    MonkeysAudio24 = 23,
    MonkeysAudio = 24,

    /// Matches both MP3 variants. Never produced by the classifier.
    MP3 = 780,
}

/// Every variant, in code order.
pub const ALL_FILE_TYPES: [TrackFileType; 26] = [
    TrackFileType::Unknown,
    TrackFileType::FLAC4,
    TrackFileType::FLAC8,
    TrackFileType::FLAC16,
    TrackFileType::FLAC24,
    TrackFileType::FLAC32,
    TrackFileType::FLAC,
    TrackFileType::MP3CBR,
    TrackFileType::MP3VBR,
    TrackFileType::AAC,
    TrackFileType::Vorbis,
    TrackFileType::Opus,
    TrackFileType::ALAC16,
    TrackFileType::ALAC24,
    TrackFileType::ALAC,
    TrackFileType::AIFF4,
    TrackFileType::AIFF8,
    TrackFileType::AIFF16,
    TrackFileType::AIFF24,
    TrackFileType::AIFF32,
    TrackFileType::AIFF,
    TrackFileType::MonkeysAudio8,
    TrackFileType::MonkeysAudio16,
    TrackFileType::MonkeysAudio24,
    TrackFileType::MonkeysAudio,
    TrackFileType::MP3,
];

/// An integer that is not a known [`TrackFileType`] code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown track file type code: {0}")]
pub struct UnknownFileTypeCode(pub u32);

impl TrackFileType {
    /// The persisted integer code.
    pub fn code(self) -> u32 {
        self as u32
    }

    pub fn is_flac(self) -> bool {
        matches!(self.code(), 1..=6)
    }

    pub fn is_alac(self) -> bool {
        matches!(self.code(), 12..=14)
    }

    pub fn is_aiff(self) -> bool {
        matches!(self.code(), 15..=20)
    }

    pub fn is_monkeys_audio(self) -> bool {
        matches!(self.code(), 21..=24)
    }

    pub fn is_mp3(self) -> bool {
        matches!(
            self,
            TrackFileType::MP3CBR | TrackFileType::MP3VBR | TrackFileType::MP3
        )
    }

    pub fn is_lossless(self) -> bool {
        self.is_flac() || self.is_alac() || self.is_aiff() || self.is_monkeys_audio()
    }

    pub fn is_lossy(self) -> bool {
        matches!(self.code(), 7..=11) || self == TrackFileType::MP3
    }

    /// Whether `other` falls under this type when used as a pattern.
    ///
    /// Generic members (`FLAC`, `ALAC`, `AIFF`, `MonkeysAudio`, `MP3`) match
    /// their whole family. Everything else matches only itself.
    pub fn matches(self, other: TrackFileType) -> bool {
        match self {
            TrackFileType::FLAC => other.is_flac(),
            TrackFileType::ALAC => other.is_alac(),
            TrackFileType::AIFF => other.is_aiff(),
            TrackFileType::MonkeysAudio => other.is_monkeys_audio(),
            TrackFileType::MP3 => other.is_mp3(),
            _ => self == other,
        }
    }
}

impl From<TrackFileType> for u32 {
    fn from(file_type: TrackFileType) -> u32 {
        file_type.code()
    }
}

impl TryFrom<u32> for TrackFileType {
    type Error = UnknownFileTypeCode;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        ALL_FILE_TYPES
            .iter()
            .copied()
            .find(|t| t.code() == code)
            .ok_or(UnknownFileTypeCode(code))
    }
}

impl fmt::Display for TrackFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Short names used by library queries. Unrecognized names parse to
/// `Unknown` rather than failing.
impl FromStr for TrackFileType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let file_type = match s.to_lowercase().as_str() {
            "flac" => TrackFileType::FLAC,
            "flac4" => TrackFileType::FLAC4,
            "flac8" => TrackFileType::FLAC8,
            "flac16" => TrackFileType::FLAC16,
            "flac24" => TrackFileType::FLAC24,
            "flac32" => TrackFileType::FLAC32,
            "alac" => TrackFileType::ALAC,
            "alac16" => TrackFileType::ALAC16,
            "alac24" => TrackFileType::ALAC24,
            "cbr" => TrackFileType::MP3CBR,
            "vbr" => TrackFileType::MP3VBR,
            "aac" => TrackFileType::AAC,
            "vorbis" => TrackFileType::Vorbis,
            "opus" => TrackFileType::Opus,
            "aiff" => TrackFileType::AIFF,
            "aiff4" => TrackFileType::AIFF4,
            "aiff8" => TrackFileType::AIFF8,
            "aiff16" => TrackFileType::AIFF16,
            "aiff24" => TrackFileType::AIFF24,
            "aiff32" => TrackFileType::AIFF32,
            "ape" => TrackFileType::MonkeysAudio,
            "ape8" => TrackFileType::MonkeysAudio8,
            "ape16" => TrackFileType::MonkeysAudio16,
            "ape24" => TrackFileType::MonkeysAudio24,
            "mp3" => TrackFileType::MP3,
            _ => TrackFileType::Unknown,
        };
        Ok(file_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_fixed() {
        assert_eq!(TrackFileType::Unknown.code(), 0);
        assert_eq!(TrackFileType::FLAC16.code(), 3);
        assert_eq!(TrackFileType::FLAC32.code(), 5);
        assert_eq!(TrackFileType::MP3CBR.code(), 7);
        assert_eq!(TrackFileType::MP3VBR.code(), 8);
        assert_eq!(TrackFileType::AAC.code(), 9);
        assert_eq!(TrackFileType::ALAC.code(), 14);
        assert_eq!(TrackFileType::AIFF4.code(), 15);
        assert_eq!(TrackFileType::MonkeysAudio.code(), 24);
        assert_eq!(TrackFileType::MP3.code(), 780);
    }

    #[test]
    fn every_code_converts_back() {
        for file_type in ALL_FILE_TYPES {
            assert_eq!(TrackFileType::try_from(file_type.code()), Ok(file_type));
        }
    }

    #[test]
    fn unknown_code_is_rejected() {
        assert_eq!(TrackFileType::try_from(25), Err(UnknownFileTypeCode(25)));
        assert_eq!(TrackFileType::try_from(779), Err(UnknownFileTypeCode(779)));
    }

    #[test]
    fn short_names_parse() {
        assert_eq!("cbr".parse::<TrackFileType>().unwrap(), TrackFileType::MP3CBR);
        assert_eq!("VBR".parse::<TrackFileType>().unwrap(), TrackFileType::MP3VBR);
        assert_eq!("ape16".parse::<TrackFileType>().unwrap(), TrackFileType::MonkeysAudio16);
        assert_eq!("Flac24".parse::<TrackFileType>().unwrap(), TrackFileType::FLAC24);
        assert_eq!("nonsense".parse::<TrackFileType>().unwrap(), TrackFileType::Unknown);
    }

    #[test]
    fn generic_members_match_their_family() {
        assert!(TrackFileType::MP3.matches(TrackFileType::MP3VBR));
        assert!(TrackFileType::MP3.matches(TrackFileType::MP3CBR));
        assert!(TrackFileType::FLAC.matches(TrackFileType::FLAC16));
        assert!(TrackFileType::MonkeysAudio.matches(TrackFileType::MonkeysAudio8));
        assert!(!TrackFileType::FLAC16.matches(TrackFileType::FLAC24));
        assert!(!TrackFileType::ALAC.matches(TrackFileType::AAC));
    }

    #[test]
    fn lossy_and_lossless_are_disjoint() {
        for file_type in ALL_FILE_TYPES {
            assert!(!(file_type.is_lossy() && file_type.is_lossless()), "{file_type}");
        }
        assert!(!TrackFileType::Unknown.is_lossy());
        assert!(!TrackFileType::Unknown.is_lossless());
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&TrackFileType::FLAC24).unwrap();
        assert_eq!(json, "4");
        let parsed: TrackFileType = serde_json::from_str("780").unwrap();
        assert_eq!(parsed, TrackFileType::MP3);
        assert!(serde_json::from_str::<TrackFileType>("99").is_err());
    }
}
