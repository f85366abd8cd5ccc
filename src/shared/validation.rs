use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for file extensions kept on uploaded images (after lowercasing)
    /// - Valid: ".jpg", ".png", ".webp"
    /// - Invalid: ".", ".tar.gz", ".p/ng", "jpg"
    pub static ref EXTENSION_REGEX: Regex = Regex::new(r"^\.[a-z0-9]{1,10}$").unwrap();
}

/// Trim a submitted text field, treating blank values as absent.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
