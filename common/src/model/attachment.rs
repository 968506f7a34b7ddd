//! The résumé file attached to an application.
//!
//! The file picker advertises `.pdf,.docx`, but nothing here enforces it: any
//! file the browser hands over is carried to the Evaluation Service as-is.
//! [`ResumeKind`] only exists so the page can show a hint.

use std::fmt;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const DOCX_MEDIA_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Accept filter for the file picker.
pub const ACCEPTED_EXTENSIONS: &str = ".pdf,.docx";

#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub content: Vec<u8>,
    pub media_type: String,
}

impl Attachment {
    /// Builds an attachment from what the browser reports about a file.
    ///
    /// Browsers leave `File.type` empty for extensions they do not know, in
    /// which case the media type is inferred from the file name.
    pub fn new(name: impl Into<String>, content: Vec<u8>, media_type: Option<&str>) -> Self {
        let name = name.into();
        let media_type = media_type
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| ResumeKind::from_name(&name).media_type().to_string());
        Self {
            name,
            content,
            media_type,
        }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn kind(&self) -> ResumeKind {
        ResumeKind::from_name(&self.name)
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("name", &self.name)
            .field("size", &self.content.len())
            .field("media_type", &self.media_type)
            .finish()
    }
}

/// Advisory classification of a résumé by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeKind {
    Pdf,
    Docx,
    Other,
}

impl ResumeKind {
    pub fn from_name(name: &str) -> Self {
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "pdf" => ResumeKind::Pdf,
            "docx" => ResumeKind::Docx,
            _ => ResumeKind::Other,
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            ResumeKind::Pdf => PDF_MEDIA_TYPE,
            ResumeKind::Docx => DOCX_MEDIA_TYPE,
            ResumeKind::Other => FALLBACK_MEDIA_TYPE,
        }
    }

    pub fn is_advertised(self) -> bool {
        !matches!(self, ResumeKind::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_media_type_from_extension_when_missing() {
        let pdf = Attachment::new("Resume.PDF", vec![1, 2, 3], None);
        assert_eq!(pdf.media_type, PDF_MEDIA_TYPE);
        assert_eq!(pdf.kind(), ResumeKind::Pdf);

        let docx = Attachment::new("cv.docx", Vec::new(), Some("  "));
        assert_eq!(docx.media_type, DOCX_MEDIA_TYPE);

        let other = Attachment::new("notes", Vec::new(), None);
        assert_eq!(other.media_type, FALLBACK_MEDIA_TYPE);
        assert!(!other.kind().is_advertised());
    }

    #[test]
    fn keeps_browser_media_type_even_for_unadvertised_files() {
        let png = Attachment::new("photo.png", vec![0; 4], Some("image/png"));
        assert_eq!(png.media_type, "image/png");
        assert_eq!(png.kind(), ResumeKind::Other);
        assert_eq!(png.size(), 4);
    }
}
