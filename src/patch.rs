//! Literal find/replace on text files.
use std::path::Path;

use crate::error::InstallError;

/// Replace every non-overlapping occurrence of `old` with `new` in the file at
/// `path`, writing the result back in place.
///
/// Returns the number of replacements. When nothing matches the file is not
/// rewritten. The file keeps its existing permissions because it is truncated
/// rather than recreated.
///
/// # Errors
///
/// Returns [`InstallError::Patch`] if the file cannot be read or written.
pub fn replace_in_file(path: &Path, old: &str, new: &str) -> Result<usize, InstallError> {
    let patch_err = |source| InstallError::Patch {
        path: path.to_path_buf(),
        source,
    };

    let content = std::fs::read_to_string(path).map_err(patch_err)?;
    let count = if old.is_empty() {
        0
    } else {
        content.matches(old).count()
    };
    if count == 0 {
        return Ok(0);
    }

    std::fs::write(path, content.replace(old, new)).map_err(patch_err)?;
    Ok(count)
}
