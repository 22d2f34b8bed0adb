//! Cover art resolution across native picture lists and the generic map.
//!
//! Search order, stopping at the first hit:
//!
//! 1. native picture list: first `CoverFront`, then first `Other`
//!    (FLAC and Ogg kinds only, see [`crate::container::ContainerKind::has_native_pictures`])
//! 2. generic picture map: first `CoverFront`, then first `Other`
//!
//! Some containers expose the same picture through both surfaces. Ogg
//! files in particular only expose theirs reliably through the native list.

use crate::container::Container;
use crate::models::picture::{CoverArt, Picture, PictureRole};

const PREFERRED_ROLES: [PictureRole; 2] = [PictureRole::CoverFront, PictureRole::Other];

/// Best available cover image, or `None` when nothing usable is embedded.
pub fn resolve_cover_art(container: &dyn Container) -> Option<CoverArt> {
    let native: &[Picture] = if container.kind().has_native_pictures() {
        container.native_pictures()
    } else {
        &[]
    };
    from_native_list(native)
        .or_else(|| {
            PREFERRED_ROLES
                .iter()
                .find_map(|&role| container.pictures().get(role).first())
        })
        .map(CoverArt::from)
}

pub fn has_cover_art(container: &dyn Container) -> bool {
    resolve_cover_art(container).is_some()
}

fn from_native_list(pictures: &[Picture]) -> Option<&Picture> {
    PREFERRED_ROLES
        .iter()
        .find_map(|&role| pictures.iter().find(|p| p.role == role))
}
