//! Deterministic new-name derivation.
//!
//! A media file is renamed after the folder it lives in plus a short prefix of
//! its content hash: `Root/Some Folder/a.jpeg` becomes
//! `Root_SomeFolder.2254d5.jpg`.

use regex::Regex;
use std::sync::LazyLock;

/// Number of hash characters kept in a derived name.
pub const HASH_PREFIX_LEN: usize = 6;

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_\-]+").expect("Invalid sanitize pattern"));

/// Removes every character outside `[A-Za-z0-9_-]`.
///
/// ```
/// use folder_rename::namer::sanitize;
///
/// assert_eq!(sanitize("Some Folder!"), "SomeFolder");
/// assert_eq!(sanitize("café_2024-01"), "caf_2024-01");
/// ```
pub fn sanitize(text: &str) -> String {
    UNSAFE_CHARS.replace_all(text, "").into_owned()
}

/// Derives the new file name from a content hash, a normalized extension
/// (without dot) and the folder's relative path.
///
/// Path separators become underscores before sanitizing. If sanitizing
/// removes everything, the name degenerates to `.<hash6>.<ext>`.
///
/// ```
/// use folder_rename::namer::derive_name;
///
/// assert_eq!(derive_name("2254d5abcdef", "jpg", "Root/Sub"), "Root_Sub.2254d5.jpg");
/// ```
pub fn derive_name(hash: &str, extension: &str, relative_path: &str) -> String {
    let prefix = hash.get(..HASH_PREFIX_LEN).unwrap_or(hash);
    format!(
        "{}.{}.{}",
        sanitize(&relative_path.replace('/', "_")),
        prefix,
        extension
    )
}
