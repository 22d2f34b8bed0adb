//! katatsuki CLI — inspect audio files.
//!
//! Commands:
//!   katatsuki info <file>... [--with-cover]   Print metadata as JSON
//!   katatsuki type <file>...                  Print file type code and name
//!   katatsuki cover <file> <out>              Write embedded cover art to <out>
//!   katatsuki scan <dir>                      One JSON line per audio file

use std::path::Path;
use std::process::ExitCode;

use katatsuki_core::{read_track, ReadOptions, TrackFileType, TrackMetadata};

/// Extensions picked up by `scan`.
const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "flac", "m4a", "mp4", "aac", "alac", "ogg", "oga", "opus", "aif", "aiff", "ape",
];

const MAX_SCAN_DEPTH: usize = 32;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        print_usage();
        return ExitCode::SUCCESS;
    }

    let options = ReadOptions::from_env();

    let ok = match args[0].as_str() {
        "info" => cmd_info(&options, &args[1..]),
        "type" => cmd_type(&options, &args[1..]),
        "cover" => cmd_cover(&options, &args[1..]),
        "scan" => cmd_scan(&options, &args[1..]),
        "help" | "--help" | "-h" => {
            print_usage();
            true
        }
        other => {
            eprintln!("unknown command: {}", other);
            print_usage();
            false
        }
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_info(options: &ReadOptions, args: &[String]) -> bool {
    let with_cover = args.iter().any(|a| a == "--with-cover");
    let files: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();
    if files.is_empty() {
        eprintln!("usage: katatsuki info <file>... [--with-cover]");
        return false;
    }

    let mut ok = true;
    for file in files {
        match read_supported(file, options) {
            Some(metadata) => {
                let metadata = if with_cover {
                    metadata
                } else {
                    metadata.without_cover_art()
                };
                println!("{}", serde_json::to_string_pretty(&metadata).unwrap_or_default());
            }
            None => ok = false,
        }
    }
    ok
}

fn cmd_type(options: &ReadOptions, args: &[String]) -> bool {
    if args.is_empty() {
        eprintln!("usage: katatsuki type <file>...");
        return false;
    }

    let mut ok = true;
    for file in args {
        match read_track(file, options) {
            Ok(metadata) => println!(
                "{}\t{}\t{}",
                metadata.file_type.code(),
                metadata.file_type,
                file
            ),
            Err(e) => {
                eprintln!("{}: {}", file, e);
                ok = false;
            }
        }
    }
    ok
}

fn cmd_cover(options: &ReadOptions, args: &[String]) -> bool {
    if args.len() < 2 {
        eprintln!("usage: katatsuki cover <file> <out>");
        return false;
    }
    let Some(metadata) = read_supported(&args[0], options) else {
        return false;
    };
    let Some(art) = metadata.cover_art else {
        eprintln!("{}: no embedded cover art", args[0]);
        return false;
    };

    match std::fs::write(&args[1], &art.data) {
        Ok(()) => {
            println!(
                "{} bytes ({}, {}x{}) written to {}",
                art.len(),
                art.mime_type.as_deref().unwrap_or("unknown type"),
                art.width,
                art.height,
                args[1]
            );
            true
        }
        Err(e) => {
            eprintln!("{}: {}", args[1], e);
            false
        }
    }
}

fn cmd_scan(options: &ReadOptions, args: &[String]) -> bool {
    if args.is_empty() {
        eprintln!("usage: katatsuki scan <dir>");
        return false;
    }
    let dir = Path::new(&args[0]);
    if !dir.is_dir() {
        eprintln!("{}: not a directory", args[0]);
        return false;
    }

    let count = scan_directory(options, dir, 0);
    log::info!("katatsuki: scanned {} tracks under {}", count, dir.display());
    true
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Read a track, reporting errors and `Unknown` classifications on stderr.
fn read_supported(file: &str, options: &ReadOptions) -> Option<TrackMetadata> {
    match read_track(file, options) {
        Ok(metadata) if metadata.file_type == TrackFileType::Unknown => {
            eprintln!("{}: unsupported file type", file);
            None
        }
        Ok(metadata) => Some(metadata),
        Err(e) => {
            eprintln!("{}: {}", file, e);
            None
        }
    }
}

fn scan_directory(options: &ReadOptions, dir: &Path, depth: usize) -> usize {
    if depth > MAX_SCAN_DEPTH {
        log::warn!("katatsuki: scan depth limit reached at {}", dir.display());
        return 0;
    }

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("katatsuki: cannot read {}: {}", dir.display(), e);
            return 0;
        }
    };

    let mut count = 0;
    for entry in entries.flatten() {
        let path = entry.path();

        // Skip directory symlinks to prevent loops
        let is_symlink = std::fs::symlink_metadata(&path)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);

        if path.is_file() && has_audio_extension(&path) {
            match read_track(&path, options) {
                Ok(metadata) => {
                    let mut line = serde_json::to_value(metadata.without_cover_art())
                        .unwrap_or_default();
                    line["path"] = path.to_string_lossy().into_owned().into();
                    println!("{}", line);
                    count += 1;
                }
                Err(e) => log::warn!("katatsuki: skipping {}: {}", path.display(), e),
            }
        } else if path.is_dir() && !is_symlink {
            count += scan_directory(options, &path, depth + 1);
        }
    }
    count
}

fn has_audio_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| AUDIO_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn print_usage() {
    println!("katatsuki - audio file metadata");
    println!();
    println!("usage: katatsuki <command> [args]");
    println!();
    println!("commands:");
    println!("  info <file>... [--with-cover]   Print metadata as JSON");
    println!("  type <file>...                  Print file type code and name");
    println!("  cover <file> <out>              Write embedded cover art to <out>");
    println!("  scan <dir>                      One JSON line per audio file");
    println!();
    println!("environment:");
    println!("  KATATSUKI_PARSING_MODE   strict | best-attempt | relaxed");
    println!("  KATATSUKI_SKIP_PICTURES  1 to skip embedded pictures");
    println!("  RUST_LOG                 log level (env_logger)");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_extensions_are_case_insensitive() {
        assert!(has_audio_extension(Path::new("/music/a.FLAC")));
        assert!(has_audio_extension(Path::new("/music/b.opus")));
        assert!(!has_audio_extension(Path::new("/music/cover.jpg")));
        assert!(!has_audio_extension(Path::new("/music/README")));
    }

    #[test]
    fn scan_skips_non_audio_files() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        std::fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
        std::fs::create_dir(dir.path().join("empty")).unwrap();

        assert_eq!(scan_directory(&ReadOptions::default(), dir.path(), 0), 0);
    }

    #[test]
    fn scan_depth_limit() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        assert_eq!(
            scan_directory(&ReadOptions::default(), dir.path(), MAX_SCAN_DEPTH + 1),
            0
        );
    }
}
