//! Filename classification by extension.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Broad content category derived from a filename extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Image,
    Text,
    Spreadsheet,
    Document,
    Pdf,
    Video,
    Audio,
    Archive,
    Other,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::Image => "image",
            FileCategory::Text => "text",
            FileCategory::Spreadsheet => "spreadsheet",
            FileCategory::Document => "document",
            FileCategory::Pdf => "pdf",
            FileCategory::Video => "video",
            FileCategory::Audio => "audio",
            FileCategory::Archive => "archive",
            FileCategory::Other => "other",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a filename to its [`FileCategory`].
///
/// A query-string suffix is stripped first, then the last dot-delimited
/// segment is lower-cased and looked up in a fixed table. Unmapped
/// extensions yield `Some(Other)`; a missing or empty extension yields
/// `None`.
pub fn classify_file(filename: &str) -> Option<FileCategory> {
    let name = filename.split('?').next().unwrap_or_default().trim();
    let (_, extension) = name.rsplit_once('.')?;
    if extension.is_empty() {
        return None;
    }
    Some(category_for(&extension.to_ascii_lowercase()))
}

fn category_for(extension: &str) -> FileCategory {
    match extension {
        "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "svg" | "ico" => FileCategory::Image,
        "txt" | "md" | "log" => FileCategory::Text,
        "xls" | "xlsx" | "csv" => FileCategory::Spreadsheet,
        "doc" | "docx" | "wps" | "rtf" => FileCategory::Document,
        "pdf" => FileCategory::Pdf,
        "mp4" | "avi" | "mov" | "wmv" | "flv" | "mkv" | "webm" | "rmvb" | "3gp" => {
            FileCategory::Video
        }
        "mp3" | "wav" | "wma" | "ogg" | "flac" | "aac" => FileCategory::Audio,
        "zip" | "rar" | "7z" | "tar" | "gz" | "tgz" => FileCategory::Archive,
        _ => FileCategory::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("132546.png", Some(FileCategory::Image))]
    #[case("report.XLSX", Some(FileCategory::Spreadsheet))]
    #[case("movie.mp4?token=abc123", Some(FileCategory::Video))]
    #[case("notes.tar.gz", Some(FileCategory::Archive))]
    #[case("a.xyz", Some(FileCategory::Other))]
    #[case("noext", None)]
    #[case("trailing.", None)]
    #[case("", None)]
    fn given_filename_when_classifying_then_maps_extension(
        #[case] input: &str,
        #[case] expected: Option<FileCategory>,
    ) {
        assert_eq!(classify_file(input), expected);
    }

    #[test]
    fn given_category_when_displaying_then_yields_lowercase_name() {
        assert_eq!(FileCategory::Image.to_string(), "image");
        assert_eq!(FileCategory::Other.as_str(), "other");
    }
}
