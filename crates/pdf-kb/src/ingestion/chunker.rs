//! Overlapping fixed-size text windows with page tracking

use crate::types::{Chunk, ChunkMetadata, Document};

use super::parser::PageText;

/// A trimmed window of text and where it starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    /// Character offset of the first character of `text`
    pub start: usize,
    /// Window text, trimmed
    pub text: String,
}

/// Text chunker with configurable size and overlap.
///
/// Windows hold at most `chunk_size` characters and consecutive windows
/// share up to `overlap` characters, so every non-whitespace character
/// lands in at least one window. Offsets and sizes count chars, not bytes.
#[derive(Debug, Clone)]
pub struct TextChunker {
    /// Maximum chunk size in characters
    chunk_size: usize,
    /// Overlap between consecutive chunks
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker. `overlap` is clamped below `chunk_size`.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            overlap: overlap.min(chunk_size - 1),
        }
    }

    /// Split text into overlapping windows
    pub fn split(&self, text: &str) -> Vec<TextSpan> {
        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        let mut spans = Vec::new();
        let mut start = 0usize;

        while start < len {
            let hard_end = (start + self.chunk_size).min(len);
            let end = if hard_end < len {
                self.break_point(&chars, start, hard_end)
            } else {
                hard_end
            };

            if let Some(span) = make_span(&chars, start, end) {
                spans.push(span);
            }

            if end >= len {
                break;
            }
            start = self.next_start(&chars, end);
        }

        spans
    }

    /// Pull the window end back to a whitespace position when one exists
    /// far enough in that the next window still moves forward.
    fn break_point(&self, chars: &[char], start: usize, hard_end: usize) -> usize {
        let floor = start + self.overlap + 1;
        (floor..=hard_end)
            .rev()
            .find(|&i| chars[i].is_whitespace())
            .unwrap_or(hard_end)
    }

    /// Step back by the overlap, then forward to a word start if that stays
    /// inside the previous window.
    fn next_start(&self, chars: &[char], end: usize) -> usize {
        let next = end - self.overlap;
        if chars[next - 1].is_whitespace() || chars[next].is_whitespace() {
            return next;
        }
        (next..end)
            .find(|&i| chars[i].is_whitespace())
            .unwrap_or(next)
    }

    /// Chunk every page of a document, stamping source, page, offset and
    /// import time onto each chunk
    pub fn chunk_pages(&self, document: &Document, pages: &[PageText]) -> Vec<Chunk> {
        let import_time = document.import_time();

        pages
            .iter()
            .flat_map(|page| {
                self.split(&page.text).into_iter().map(|span| {
                    Chunk::new(
                        span.text,
                        ChunkMetadata {
                            source: document.filename.clone(),
                            page: page.page,
                            start_index: span.start,
                            import_time: import_time.clone(),
                        },
                    )
                })
            })
            .collect()
    }
}

fn make_span(chars: &[char], start: usize, end: usize) -> Option<TextSpan> {
    let window = &chars[start..end];
    let lead = window.iter().take_while(|c| c.is_whitespace()).count();
    if lead == window.len() {
        return None;
    }
    let trail = window.iter().rev().take_while(|c| c.is_whitespace()).count();

    Some(TextSpan {
        start: start + lead,
        text: window[lead..window.len() - trail].iter().collect(),
    })
}
