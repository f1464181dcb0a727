//! File classification used to pick an icon for an attachment.

use serde::{Deserialize, Serialize};

const IMAGE: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "webp", "svg"];
const VIDEO: &[&str] = &["mp4", "mov", "avi", "mkv", "webm", "flv", "wmv"];
const DOCUMENT: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt", "rtf", "zip", "rar", "7z",
];
const CODE: &[&str] = &[
    "js", "jsx", "ts", "tsx", "py", "java", "c", "cpp", "cs", "html", "css", "json", "sh", "php",
    "rb", "go", "rs", "swift",
];

/// Display category of a file. Has no effect on storage or access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// Raster or vector image.
    Image,
    /// Video container.
    Video,
    /// Office document, plain text, or archive.
    Document,
    /// Source code.
    Code,
    /// Anything else.
    Other,
}

impl FileKind {
    /// Classify a file by the extension of its name, case-insensitively.
    ///
    /// Names without an extension classify as [`FileKind::Other`].
    pub fn classify(name: &str) -> Self {
        let Some((_, ext)) = name.rsplit_once('.') else {
            return Self::Other;
        };
        let ext = ext.to_ascii_lowercase();
        let ext = ext.as_str();

        if IMAGE.contains(&ext) {
            Self::Image
        } else if VIDEO.contains(&ext) {
            Self::Video
        } else if DOCUMENT.contains(&ext) {
            Self::Document
        } else if CODE.contains(&ext) {
            Self::Code
        } else {
            Self::Other
        }
    }

    /// Lowercase name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
            Self::Document => "document",
            Self::Code => "code",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for FileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_extension() {
        assert_eq!(FileKind::classify("holiday.JPG"), FileKind::Image);
        assert_eq!(FileKind::classify("clip.webm"), FileKind::Video);
        assert_eq!(FileKind::classify("notes.txt"), FileKind::Document);
        assert_eq!(FileKind::classify("backup.tar.7z"), FileKind::Document);
        assert_eq!(FileKind::classify("main.rs"), FileKind::Code);
        assert_eq!(FileKind::classify("Component.TSX"), FileKind::Code);
    }

    #[test]
    fn test_unknown_or_missing_extension_is_other() {
        assert_eq!(FileKind::classify("model.stl"), FileKind::Other);
        assert_eq!(FileKind::classify("Makefile"), FileKind::Other);
        assert_eq!(FileKind::classify("trailing."), FileKind::Other);
    }
}
