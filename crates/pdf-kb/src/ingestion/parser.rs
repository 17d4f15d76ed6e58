//! PDF text extraction, page by page

use crate::error::{Error, Result};

/// Text extracted from one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// Page index (0-based)
    pub page: u32,
    /// Cleaned page text
    pub text: String,
}

/// A parsed PDF
#[derive(Debug, Clone)]
pub struct ParsedPdf {
    /// Pages that produced text, in page order
    pub pages: Vec<PageText>,
    /// Number of pages in the file
    pub total_pages: u32,
}

impl ParsedPdf {
    /// Total characters across all pages
    pub fn char_count(&self) -> usize {
        self.pages.iter().map(|p| p.text.chars().count()).sum()
    }
}

/// PDF parser
pub struct PdfParser;

impl PdfParser {
    /// Extract per-page text from PDF bytes.
    ///
    /// Uses lopdf's per-page extraction first and falls back to pdf-extract
    /// when no page yields text. Fails when neither produces any text.
    pub fn parse(filename: &str, data: &[u8]) -> Result<ParsedPdf> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::file_parse(filename, format!("Failed to load PDF: {}", e)))?;

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        let total_pages = page_numbers.len() as u32;

        let mut pages = Vec::new();
        for (index, page_number) in page_numbers.iter().enumerate() {
            match doc.extract_text(&[*page_number]) {
                Ok(raw) => {
                    let text = cleanup_pdf_text(&raw);
                    if !text.is_empty() {
                        pages.push(PageText {
                            page: index as u32,
                            text,
                        });
                    }
                }
                Err(e) => {
                    tracing::debug!("No text from page {} of {}: {}", page_number, filename, e);
                }
            }
        }

        if pages.is_empty() {
            tracing::warn!("lopdf found no text in {}, trying pdf-extract", filename);
            pages = Self::extract_with_fallback(filename, data)?;
        }

        if pages.is_empty() {
            return Err(Error::file_parse(
                filename,
                "No text content could be extracted from PDF",
            ));
        }

        Ok(ParsedPdf {
            total_pages: total_pages.max(pages.len() as u32),
            pages,
        })
    }

    /// Whole-document extraction; pages are recovered from form feeds
    fn extract_with_fallback(filename: &str, data: &[u8]) -> Result<Vec<PageText>> {
        let raw = pdf_extract::extract_text_from_mem(data)
            .map_err(|e| Error::file_parse(filename, format!("Text extraction failed: {}", e)))?;

        Ok(raw
            .split('\u{000C}')
            .enumerate()
            .map(|(i, text)| PageText {
                page: i as u32,
                text: cleanup_pdf_text(text),
            })
            .filter(|p| !p.text.is_empty())
            .collect())
    }
}

/// Normalize extracted text: drop NULs, expand ligatures, trim lines and
/// remove blank ones.
fn cleanup_pdf_text(text: &str) -> String {
    text.replace('\0', "")
        .replace('\u{00A0}', " ")
        .replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
