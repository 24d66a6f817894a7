//! File types accepted as chat attachments and their display categories.
//!
//! The table below is closed: a MIME type that is not listed classifies as
//! [`FileCategory::Unknown`]. Every entry also names the file extensions the
//! browser file picker should offer for it, and [`FILE_ACCEPT_EXTENSIONS`]
//! must list all of them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display category of an attachment, derived from its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Image,
    Document,
    Text,
    Office,
    Code,
    Unknown,
}

impl FileCategory {
    /// Returns the lowercase category name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Document => "document",
            Self::Text => "text",
            Self::Office => "office",
            Self::Code => "code",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the supported file type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileTypeEntry {
    /// The exact MIME type literal.
    pub mime: &'static str,
    /// The display category.
    pub category: FileCategory,
    /// File extensions (with leading dot) that map to this MIME type.
    pub extensions: &'static [&'static str],
}

const fn entry(
    mime: &'static str,
    category: FileCategory,
    extensions: &'static [&'static str],
) -> FileTypeEntry {
    FileTypeEntry {
        mime,
        category,
        extensions,
    }
}

/// Supported file types, grouped by category.
pub const FILE_TYPES: &[FileTypeEntry] = &[
    // Images
    entry("image/jpeg", FileCategory::Image, &[".jpg", ".jpeg"]),
    entry("image/png", FileCategory::Image, &[".png"]),
    entry("image/gif", FileCategory::Image, &[".gif"]),
    entry("image/webp", FileCategory::Image, &[".webp"]),
    // Documents
    entry("application/pdf", FileCategory::Document, &[".pdf"]),
    // Text files
    entry("text/plain", FileCategory::Text, &[".txt"]),
    entry("text/html", FileCategory::Text, &[".html"]),
    entry("text/csv", FileCategory::Text, &[".csv"]),
    entry("text/markdown", FileCategory::Text, &[".md", ".markdown"]),
    entry("text/x-markdown", FileCategory::Text, &[".md", ".markdown"]),
    // Office documents
    entry(
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        FileCategory::Office,
        &[".docx"],
    ),
    entry("application/msword", FileCategory::Office, &[".doc"]),
    entry(
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        FileCategory::Office,
        &[".xlsx"],
    ),
    entry("application/vnd.ms-excel", FileCategory::Office, &[".xls"]),
    // Code files
    entry("application/json", FileCategory::Code, &[".json"]),
    entry("application/xml", FileCategory::Code, &[".xml"]),
    entry("text/xml", FileCategory::Code, &[".xml"]),
    entry("application/javascript", FileCategory::Code, &[".js", ".jsx"]),
    entry("text/javascript", FileCategory::Code, &[".js", ".jsx"]),
    entry("text/x-python", FileCategory::Code, &[".py"]),
    entry("text/x-java", FileCategory::Code, &[".java"]),
    entry("text/x-c", FileCategory::Code, &[".c"]),
    entry("text/x-c++", FileCategory::Code, &[".cpp"]),
    entry("text/x-csharp", FileCategory::Code, &[".cs"]),
    entry("text/x-ruby", FileCategory::Code, &[".rb"]),
    entry("text/x-go", FileCategory::Code, &[".go"]),
    entry("text/x-rust", FileCategory::Code, &[".rs"]),
    entry("text/x-typescript", FileCategory::Code, &[".ts", ".tsx"]),
];

/// Extensions offered by the file picker.
#[rustfmt::skip]
pub const FILE_ACCEPT_EXTENSIONS: &[&str] = &[
    // Images
    ".jpg", ".jpeg", ".png", ".gif", ".webp",
    // Documents
    ".pdf",
    // Text files
    ".txt", ".html", ".csv", ".md", ".markdown",
    // Office documents
    ".doc", ".docx", ".xls", ".xlsx",
    // Code files
    ".json", ".xml", ".js", ".ts", ".tsx", ".jsx", ".py", ".java", ".c", ".cpp", ".cs", ".rb",
    ".go", ".rs",
];

/// Returns the category for a MIME type.
///
/// Matching is exact and case-sensitive; anything not in [`FILE_TYPES`]
/// is [`FileCategory::Unknown`].
#[must_use]
pub fn classify(mime: &str) -> FileCategory {
    FILE_TYPES
        .iter()
        .find(|entry| entry.mime == mime)
        .map_or(FileCategory::Unknown, |entry| entry.category)
}

/// Iterates over every supported MIME type, in table order.
pub fn supported_file_types() -> impl Iterator<Item = &'static str> {
    FILE_TYPES.iter().map(|entry| entry.mime)
}

/// Returns true if the MIME type is in the supported table.
#[must_use]
pub fn is_supported(mime: &str) -> bool {
    classify(mime) != FileCategory::Unknown
}

/// Returns the extensions registered for a MIME type (empty if unsupported).
#[must_use]
pub fn extensions_for(mime: &str) -> &'static [&'static str] {
    FILE_TYPES
        .iter()
        .find(|entry| entry.mime == mime)
        .map(|entry| entry.extensions)
        .unwrap_or_default()
}

/// Value for an `<input type="file" accept=...>` attribute.
#[must_use]
pub fn accept_string() -> String {
    FILE_ACCEPT_EXTENSIONS.join(",")
}
