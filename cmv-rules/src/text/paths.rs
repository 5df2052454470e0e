//! Path conventions
//!
//! Paths are album-relative strings with `/` separators.

use once_cell::sync::Lazy;
use regex::Regex;

/// Archive extensions not allowed in a release, multi-part ones first
pub const ARCHIVE_EXTENSIONS: [&str; 22] = [
    "tar.gz", "tar.bz2", "tar.xz", "zip", "zipx", "rar", "7z", "tar", "gz", "bz2", "xz", "tgz",
    "tbz", "tbz2", "txz", "cab", "ace", "arj", "lzh", "lha", "sit", "sitx",
];

/// "CD1", "Disc 02", "disk_3", "DVD"
static DISC_FOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(cd|disc|disk|dvd)[\s_\-]?(\d*)$").expect("disc folder regex is valid")
});

/// `[<disc><sep>]<track><sep><title>.<ext>`
static FILENAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d{1,2}[\-.])?\d{1,3}\s*[\-._)]*\s*(.+?)\.([A-Za-z0-9]{1,5})$")
        .expect("filename regex is valid")
});

/// Whether the path names an archive file (case-insensitive)
pub fn is_archive(path: &str) -> bool {
    let name = path.rsplit('/').next().unwrap_or(path).to_lowercase();
    ARCHIVE_EXTENSIONS
        .iter()
        .any(|ext| name.len() > ext.len() + 1 && name.ends_with(&format!(".{}", ext)))
}

/// A recognized disc folder segment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscFolder {
    /// Digits as written, possibly empty
    pub digits: String,
}

impl DiscFolder {
    pub fn number(&self) -> Option<u32> {
        self.digits.parse().ok()
    }
}

pub fn disc_folder(segment: &str) -> Option<DiscFolder> {
    DISC_FOLDER_RE.captures(segment).map(|caps| DiscFolder {
        digits: caps[2].to_string(),
    })
}

pub fn is_disc_folder(segment: &str) -> bool {
    DISC_FOLDER_RE.is_match(segment)
}

/// Title portion of a numbered file name ("01 - Adagio.flac" -> "Adagio")
///
/// `None` when the name carries no track-number prefix or no letters.
pub fn title_from_filename(file_name: &str) -> Option<String> {
    let caps = FILENAME_RE.captures(file_name)?;
    let title = caps[1].replace('_', " ");
    let title = title.trim();
    if title.chars().any(char::is_alphabetic) {
        Some(title.to_string())
    } else {
        None
    }
}
