//! Plain-text extraction for uploaded files

use crate::error::{Error, Result};
use crate::types::FileType;

/// Upload text extractor
pub struct FileParser;

impl FileParser {
    /// Extract plain text from an uploaded file.
    ///
    /// `content_type` is the MIME type the client declared, if any.
    pub fn extract(filename: &str, content_type: Option<&str>, data: &[u8]) -> Result<String> {
        let file_type = FileType::detect(filename, content_type);

        match file_type {
            FileType::Pdf => Self::parse_pdf(filename, data),
            FileType::Docx => Ok(Self::parse_docx(filename, data)),
            FileType::Doc | FileType::Txt => Ok(Self::parse_text(data)),
            FileType::Unknown => Err(Error::UnsupportedFileType(
                content_type
                    .filter(|m| !m.is_empty())
                    .unwrap_or(filename)
                    .to_string(),
            )),
        }
    }

    /// Parse PDF document
    fn parse_pdf(filename: &str, data: &[u8]) -> Result<String> {
        pdf_extract::extract_text_from_mem(data)
            .map_err(|e| Error::file_parse(filename, e.to_string()))
    }

    /// Parse DOCX document, falling back to raw text when the archive is unreadable
    fn parse_docx(filename: &str, data: &[u8]) -> String {
        let doc = match docx_rs::read_docx(data) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!("DOCX parse failed for '{}', using raw text: {}", filename, e);
                return Self::parse_text(data);
            }
        };

        let mut content = String::new();

        for child in doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(p) = child {
                for child in p.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let docx_rs::RunChild::Text(t) = child {
                                content.push_str(&t.text);
                            }
                        }
                    }
                }
                content.push('\n');
            }
        }

        content
    }

    /// Parse plain text (lossy UTF-8)
    fn parse_text(data: &[u8]) -> String {
        String::from_utf8_lossy(data).into_owned()
    }
}
