//! katatsuki data models.
//!
//! Plain value types. The integer code of [`TrackFileType`] is the one
//! externally visible encoding; everything else serializes with serde
//! defaults.

pub mod file_type;
pub mod picture;
pub mod track;

pub use file_type::{TrackFileType, UnknownFileTypeCode, ALL_FILE_TYPES};
pub use picture::{CoverArt, Picture, PictureMap, PictureRole};
pub use track::TrackMetadata;
