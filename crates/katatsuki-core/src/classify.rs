//! Container kind + bit depth → [`TrackFileType`].

use crate::container::{Container, ContainerKind, Mp4Codec};
use crate::models::TrackFileType;

/// Classify a container. Total: anything unrecognized is `Unknown`.
pub fn classify(container: &dyn Container) -> TrackFileType {
    let bit_depth = container.properties().bit_depth;
    match container.kind() {
        // A VBR header is taken to mean VBR, as taglib-sharp does, even
        // though a VBR file may lack one.
        ContainerKind::Mpeg { has_vbr_header: true } => TrackFileType::MP3VBR,
        ContainerKind::Mpeg { has_vbr_header: false } => TrackFileType::MP3CBR,
        ContainerKind::Mp4 { codec } => match codec {
            Mp4Codec::Aac => TrackFileType::AAC,
            Mp4Codec::Alac => alac_type(bit_depth),
            Mp4Codec::Unknown => TrackFileType::Unknown,
        },
        ContainerKind::Flac | ContainerKind::OggFlac => flac_type(bit_depth),
        ContainerKind::Aiff => aiff_type(bit_depth),
        ContainerKind::Ape => monkeys_audio_type(bit_depth),
        ContainerKind::Vorbis => TrackFileType::Vorbis,
        ContainerKind::Opus => TrackFileType::Opus,
        ContainerKind::Other => TrackFileType::Unknown,
    }
}

pub fn flac_type(bit_depth: u32) -> TrackFileType {
    match bit_depth {
        4 => TrackFileType::FLAC4,
        8 => TrackFileType::FLAC8,
        16 => TrackFileType::FLAC16,
        24 => TrackFileType::FLAC24,
        32 => TrackFileType::FLAC32,
        _ => TrackFileType::FLAC,
    }
}

pub fn alac_type(bit_depth: u32) -> TrackFileType {
    match bit_depth {
        16 => TrackFileType::ALAC16,
        24 => TrackFileType::ALAC24,
        _ => TrackFileType::ALAC,
    }
}

pub fn aiff_type(bit_depth: u32) -> TrackFileType {
    match bit_depth {
        4 => TrackFileType::AIFF4,
        8 => TrackFileType::AIFF8,
        16 => TrackFileType::AIFF16,
        24 => TrackFileType::AIFF24,
        32 => TrackFileType::AIFF32,
        _ => TrackFileType::AIFF,
    }
}

/// There is no 32-bit Monkey's Audio member; 32 falls through to generic.
pub fn monkeys_audio_type(bit_depth: u32) -> TrackFileType {
    match bit_depth {
        8 => TrackFileType::MonkeysAudio8,
        16 => TrackFileType::MonkeysAudio16,
        24 => TrackFileType::MonkeysAudio24,
        _ => TrackFileType::MonkeysAudio,
    }
}
