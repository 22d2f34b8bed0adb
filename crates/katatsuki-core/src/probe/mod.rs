//! lofty-backed container probe.
//!
//! Opens a file once, reads the concrete lofty file type where the
//! classifier or cover art resolver needs format-specific data (MP4 codec,
//! FLAC picture blocks, Xiph comment pictures), then flattens everything
//! into a [`ContainerSnapshot`]. The file is closed before returning.

pub mod mpeg;

use std::io::{Read, Seek};
use std::path::Path;

use lofty::config::ParseOptions;
use lofty::file::{AudioFile, FileType, TaggedFile};
use lofty::flac::FlacFile;
use lofty::mp4::Mp4File;
use lofty::ogg::{OggPictureStorage, OpusFile, VorbisFile};
use lofty::picture::PictureInformation;
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::{ItemKey, Tag};

use crate::config::{ParsingMode, ReadOptions};
use crate::container::{AudioProperties, ContainerKind, ContainerSnapshot, Mp4Codec, TagMap};
use crate::error::{Error, Result};
use crate::models::picture::{Picture, PictureMap, PictureRole};

/// Parse `path` into a snapshot.
pub fn open(path: impl AsRef<Path>, options: &ReadOptions) -> Result<ContainerSnapshot> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound(path.to_path_buf()));
    }

    let probe = Probe::open(path)?.guess_file_type()?;
    let Some(file_type) = probe.file_type() else {
        return Err(Error::Unsupported(path.to_path_buf()));
    };

    let mut reader = probe.into_inner();
    reader.rewind()?;
    let (kind, native, tagged) = read_container(&mut reader, file_type, parse_options(options))?;

    let snapshot = build_snapshot(kind, native, &tagged, options);
    log::debug!(
        "katatsuki: opened {} as {:?} ({} bit, {} kbps)",
        path.display(),
        snapshot.kind,
        snapshot.properties.bit_depth,
        snapshot.properties.bitrate
    );
    Ok(snapshot)
}

fn parse_options(options: &ReadOptions) -> ParseOptions {
    let mode = match options.parsing_mode {
        ParsingMode::Strict => lofty::config::ParsingMode::Strict,
        ParsingMode::BestAttempt => lofty::config::ParsingMode::BestAttempt,
        ParsingMode::Relaxed => lofty::config::ParsingMode::Relaxed,
    };
    ParseOptions::new()
        .read_properties(true)
        .read_cover_art(options.read_pictures)
        .parsing_mode(mode)
}

fn read_container<R: Read + Seek>(
    reader: &mut R,
    file_type: FileType,
    parse_options: ParseOptions,
) -> Result<(ContainerKind, Vec<Picture>, TaggedFile)> {
    let parsed = match file_type {
        FileType::Flac => {
            let flac = FlacFile::read_from(reader, parse_options)?;
            let native = native_pictures(flac.pictures());
            (ContainerKind::Flac, native, flac.into())
        }
        FileType::Vorbis => {
            let vorbis = VorbisFile::read_from(reader, parse_options)?;
            let native = native_pictures(vorbis.vorbis_comments().pictures());
            (ContainerKind::Vorbis, native, vorbis.into())
        }
        FileType::Opus => {
            let opus = OpusFile::read_from(reader, parse_options)?;
            let native = native_pictures(opus.vorbis_comments().pictures());
            (ContainerKind::Opus, native, opus.into())
        }
        FileType::Mp4 => {
            let mp4 = Mp4File::read_from(reader, parse_options)?;
            let codec = match mp4.properties().codec() {
                lofty::mp4::Mp4Codec::AAC => Mp4Codec::Aac,
                lofty::mp4::Mp4Codec::ALAC => Mp4Codec::Alac,
                _ => Mp4Codec::Unknown,
            };
            (ContainerKind::Mp4 { codec }, Vec::new(), mp4.into())
        }
        FileType::Mpeg => {
            let has_vbr_header = mpeg::read_vbr_marker(reader)?;
            reader.rewind()?;
            let tagged = Probe::with_file_type(reader, FileType::Mpeg)
                .options(parse_options)
                .read()?;
            (ContainerKind::Mpeg { has_vbr_header }, Vec::new(), tagged)
        }
        other => {
            let kind = match other {
                FileType::Aiff => ContainerKind::Aiff,
                FileType::Ape => ContainerKind::Ape,
                _ => ContainerKind::Other,
            };
            let tagged = Probe::with_file_type(reader, other)
                .options(parse_options)
                .read()?;
            (kind, Vec::new(), tagged)
        }
    };
    Ok(parsed)
}

fn build_snapshot(
    kind: ContainerKind,
    native_pictures: Vec<Picture>,
    tagged: &TaggedFile,
    options: &ReadOptions,
) -> ContainerSnapshot {
    let props = tagged.properties();
    let properties = AudioProperties {
        bit_depth: props.bit_depth().map(u32::from).unwrap_or(0),
        bitrate: props.audio_bitrate().unwrap_or(0),
        sample_rate: props.sample_rate().unwrap_or(0),
        duration_ms: props.duration().as_millis() as u64,
    };

    let primary = tagged.primary_tag().or_else(|| tagged.first_tag());
    let mut tags = TagMap::new();
    let mut pictures = PictureMap::new();
    for tag in ordered_tags(tagged) {
        tags.merge_missing(tag_map(tag));
        if options.read_pictures {
            for picture in tag.pictures() {
                pictures.insert(convert_picture(picture));
            }
        }
    }

    ContainerSnapshot {
        kind,
        properties,
        year: primary.and_then(|t| t.year()).unwrap_or(0),
        track_number: primary.and_then(|t| t.track()).unwrap_or(0),
        tags,
        native_pictures: if options.read_pictures {
            native_pictures
        } else {
            Vec::new()
        },
        pictures,
    }
}

/// Primary tag first, then the rest in file order.
fn ordered_tags(tagged: &TaggedFile) -> impl Iterator<Item = &Tag> {
    let primary_type = tagged.primary_tag_type();
    tagged.primary_tag().into_iter().chain(
        tagged
            .tags()
            .iter()
            .filter(move |t| t.tag_type() != primary_type),
    )
}

fn tag_map(tag: &Tag) -> TagMap {
    let mut map = TagMap::new();
    for item in tag.items() {
        let (Some(key), Some(text)) = (property_name(item.key()), item.value().text()) else {
            continue;
        };
        map.push(&key, text);
    }
    map
}

/// Property-map name for a lofty item key.
fn property_name(key: &ItemKey) -> Option<String> {
    let name = match key {
        ItemKey::TrackTitle => "TITLE",
        ItemKey::TrackArtist => "ARTIST",
        ItemKey::AlbumTitle => "ALBUM",
        ItemKey::AlbumArtist => "ALBUMARTIST",
        ItemKey::TrackNumber => "TRACKNUMBER",
        ItemKey::TrackTotal => "TRACKTOTAL",
        ItemKey::DiscNumber => "DISCNUMBER",
        ItemKey::DiscTotal => "DISCTOTAL",
        ItemKey::Year | ItemKey::RecordingDate => "DATE",
        ItemKey::Genre => "GENRE",
        ItemKey::Composer => "COMPOSER",
        ItemKey::Comment => "COMMENT",
        ItemKey::MusicBrainzRecordingId => "MUSICBRAINZ_TRACKID",
        ItemKey::MusicBrainzTrackId => "MUSICBRAINZ_RELEASETRACKID",
        ItemKey::MusicBrainzReleaseId => "MUSICBRAINZ_ALBUMID",
        ItemKey::MusicBrainzArtistId => "MUSICBRAINZ_ARTISTID",
        ItemKey::MusicBrainzReleaseArtistId => "MUSICBRAINZ_ALBUMARTISTID",
        ItemKey::Unknown(raw) => return Some(raw.to_ascii_uppercase()),
        _ => return None,
    };
    Some(name.to_string())
}

fn native_pictures(pictures: &[(lofty::picture::Picture, PictureInformation)]) -> Vec<Picture> {
    pictures.iter().map(|(p, _)| convert_picture(p)).collect()
}

fn convert_picture(picture: &lofty::picture::Picture) -> Picture {
    Picture {
        role: PictureRole::from_u8(picture.pic_type().as_u8()),
        mime_type: picture.mime_type().map(|m| m.as_str().to_string()),
        data: picture.data().to_vec(),
    }
}
