//! Root canonicalization and relative path rendering

use crate::error::HashError;
use std::path::{Component, Path, PathBuf};
use unicode_normalization::UnicodeNormalization;

/// Canonicalize the queried root so that walked paths share its prefix
///
/// Uses dunce so Windows roots do not pick up the `\\?\` verbatim prefix.
pub fn canonicalize_root(root: &Path) -> Result<PathBuf, HashError> {
    dunce::canonicalize(root).map_err(|e| HashError::from_io(root, e))
}

/// Relative path of `path` under `root`, in the form used by digest records
///
/// Prefix stripping works on whole components, so a root `/data` never
/// matches `/data2/file`. The result starts with `/`, components are joined
/// with `/` regardless of the platform separator and normalized to Unicode NFC.
pub fn relative_path(path: &Path, root: &Path) -> Result<String, HashError> {
    strip_root(path, root).map(render_relative)
}

/// Strip `root` from `path`, rejecting anything that is not plainly below it
pub fn strip_root<'a>(path: &'a Path, root: &Path) -> Result<&'a Path, HashError> {
    let outside = || HashError::OutsideRoot {
        path: path.to_path_buf(),
        root: root.to_path_buf(),
    };

    let stripped = path.strip_prefix(root).map_err(|_| outside())?;
    let plain = stripped
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !plain {
        return Err(outside());
    }
    Ok(stripped)
}

/// Raw bytes of a stripped relative path
///
/// Rendering is lossy (NFC, replacement characters for non-UTF-8 names), so
/// distinct files can render alike. These bytes tell them apart.
pub fn raw_key(stripped: &Path) -> Vec<u8> {
    stripped.as_os_str().as_encoded_bytes().to_vec()
}

/// Render a stripped relative path as `/a/b`, NFC normalized
pub fn render_relative(stripped: &Path) -> String {
    let mut rendered = String::new();
    for component in stripped.components() {
        if let Component::Normal(name) = component {
            rendered.push('/');
            rendered.push_str(&name.to_string_lossy());
        }
    }
    normalize_path_string(&rendered)
}

/// Normalize a relative path string to Unicode NFC
pub fn normalize_path_string(path: &str) -> String {
    path.nfc().collect()
}
