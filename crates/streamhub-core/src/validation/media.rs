//! Upload validation: extension allow-list and required fields.

use crate::constants::ALLOWED_EXTENSIONS;
use crate::error::AppError;

/// Extension of the last path segment, without the dot. `None` when there is no dot.
pub fn file_extension(filename: &str) -> Option<&str> {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    name.rsplit_once('.').map(|(_, ext)| ext)
}

/// Check `filename` against the allow-list, case-insensitively.
///
/// Returns the lower-cased extension, which is stored as the record's file type.
pub fn validate_media_extension(filename: &str) -> Result<String, AppError> {
    let ext = file_extension(filename)
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(AppError::UnsupportedFileType(format!(
            "Unsupported file type '{}'. Allowed: {}",
            ext,
            ALLOWED_EXTENSIONS.join(", ")
        )))
    }
}

/// Characters object stores would percent-encode in a key segment.
const RESERVED_KEY_CHARS: &[char] = &[
    '\\', '{', '^', '}', '%', '`', ']', '"', '>', '[', '~', '<', '#', '|', '*', '?',
];

/// Reduce a client-supplied filename to its last path segment and make sure it can
/// be used verbatim as the final segment of an object key.
///
/// The returned name is what the stored key ends with, so the key in the record and
/// the location of the object never differ.
pub fn storage_filename(raw: &str) -> Result<String, AppError> {
    let name = raw.rsplit(['/', '\\']).next().unwrap_or(raw).trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(AppError::InvalidInput("filename is required".to_string()));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !c.is_ascii() || c.is_ascii_control() || RESERVED_KEY_CHARS.contains(c))
    {
        return Err(AppError::InvalidInput(format!(
            "filename contains unsupported character {:?}",
            c
        )));
    }
    Ok(name.to_string())
}

pub fn validate_title(title: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::InvalidInput("title is required".to_string()));
    }
    Ok(())
}
