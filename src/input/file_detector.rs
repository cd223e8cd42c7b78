//! File type detection

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FileType {
    Text,
    Markdown,
    Json,
    Latex,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            "json" => FileType::Json,
            "tex" => FileType::Latex,
            _ => FileType::Unknown,
        }
    }
}
