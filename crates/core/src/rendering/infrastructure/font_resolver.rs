use std::fs;
use std::path::{Path, PathBuf};

use ab_glyph::FontArc;
use thiserror::Error;

use crate::shared::constants::FONT_ENV;

#[derive(Error, Debug)]
pub enum FontResolveError {
    #[error("failed to read font {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a usable TrueType/OpenType font")]
    Invalid { path: PathBuf },
}

/// Well-known locations of a sans-serif font on common platforms.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Resolve the label font.
///
/// Resolution order:
/// 1. Explicit path (CLI flag or settings)
/// 2. `FACEMOOD_FONT` environment variable
/// 3. First existing entry of [`SYSTEM_FONT_CANDIDATES`]
///
/// Returns `Ok(None)` when nothing is found; an explicit path that cannot be
/// loaded is an error.
pub fn resolve(explicit: Option<&Path>) -> Result<Option<FontArc>, FontResolveError> {
    let env_path = std::env::var_os(FONT_ENV).map(PathBuf::from);
    match locate(explicit, env_path.as_deref(), SYSTEM_FONT_CANDIDATES) {
        Some(path) => {
            log::debug!("Using label font {}", path.display());
            load(&path).map(Some)
        }
        None => Ok(None),
    }
}

/// Picks the font path without touching its contents.
pub fn locate(
    explicit: Option<&Path>,
    env_path: Option<&Path>,
    candidates: &[&str],
) -> Option<PathBuf> {
    if let Some(path) = explicit.or(env_path) {
        return Some(path.to_path_buf());
    }
    candidates
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
}

pub fn load(path: &Path) -> Result<FontArc, FontResolveError> {
    let bytes = fs::read(path).map_err(|e| FontResolveError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    FontArc::try_from_vec(bytes).map_err(|_| FontResolveError::Invalid {
        path: path.to_path_buf(),
    })
}
