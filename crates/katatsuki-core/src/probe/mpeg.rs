//! VBR header detection for MPEG audio.
//!
//! lofty parses Xing/VBRI headers internally but does not report whether
//! one was present, so the first frame is inspected here. Only the marker
//! position is computed; frame contents are never decoded.

use std::io::{Read, Seek, SeekFrom};

const ID3V2_HEADER_LEN: usize = 10;
const SCAN_WINDOW: usize = 16 * 1024;
const VBRI_OFFSET: usize = 4 + 32;

/// Whether the first MPEG frame after any ID3v2 tag carries a Xing, Info or
/// VBRI header. Leaves the reader at an unspecified position.
pub fn read_vbr_marker<R: Read + Seek>(reader: &mut R) -> std::io::Result<bool> {
    reader.seek(SeekFrom::Start(0))?;
    let mut header = [0u8; ID3V2_HEADER_LEN];
    let read = read_up_to(reader, &mut header)?;

    let audio_start = id3v2_len(&header[..read]).unwrap_or(0);
    reader.seek(SeekFrom::Start(audio_start))?;

    let mut window = vec![0u8; SCAN_WINDOW];
    let read = read_up_to(reader, &mut window)?;
    window.truncate(read);
    Ok(has_vbr_header(&window))
}

/// Total length of an ID3v2 tag starting at `header`, footer included.
pub fn id3v2_len(header: &[u8]) -> Option<u64> {
    if header.len() < ID3V2_HEADER_LEN || &header[..3] != b"ID3" {
        return None;
    }
    let size = header[6..10].iter().try_fold(0u64, |acc, &b| {
        (b & 0x80 == 0).then_some((acc << 7) | u64::from(b))
    })?;
    let footer = if header[5] & 0x10 != 0 { 10 } else { 0 };
    Some(ID3V2_HEADER_LEN as u64 + size + footer)
}

/// Scan `bytes` for the first valid frame header and check its VBR marker.
pub fn has_vbr_header(bytes: &[u8]) -> bool {
    let Some(start) = find_frame(bytes) else {
        return false;
    };
    let frame = &bytes[start..];
    let xing_offset = 4 + side_info_len(frame[1], frame[3]);
    marker_at(frame, xing_offset, b"Xing")
        || marker_at(frame, xing_offset, b"Info")
        || marker_at(frame, VBRI_OFFSET, b"VBRI")
}

fn find_frame(bytes: &[u8]) -> Option<usize> {
    bytes
        .windows(4)
        .position(|h| is_frame_header(h[0], h[1], h[2]))
}

fn is_frame_header(b0: u8, b1: u8, b2: u8) -> bool {
    let sync = b0 == 0xFF && b1 & 0xE0 == 0xE0;
    let version = (b1 >> 3) & 0b11;
    let layer = (b1 >> 1) & 0b11;
    let bitrate_index = b2 >> 4;
    let sample_rate_index = (b2 >> 2) & 0b11;
    sync && version != 0b01 && layer != 0b00 && bitrate_index != 0b1111 && sample_rate_index != 0b11
}

fn side_info_len(b1: u8, b3: u8) -> usize {
    let mpeg1 = (b1 >> 3) & 0b11 == 0b11;
    let mono = b3 >> 6 == 0b11;
    match (mpeg1, mono) {
        (true, false) => 32,
        (true, true) => 17,
        (false, false) => 17,
        (false, true) => 9,
    }
}

fn marker_at(frame: &[u8], offset: usize, marker: &[u8; 4]) -> bool {
    frame.get(offset..offset + 4) == Some(&marker[..])
}

fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
