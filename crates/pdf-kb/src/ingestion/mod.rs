//! PDF ingestion: parsing, chunking, embedding and storage

mod batch;
mod chunker;
mod filename;
mod parser;
mod pipeline;

#[cfg(test)]
pub(crate) mod fixtures;

pub use batch::import_pdfs;
pub use chunker::{TextChunker, TextSpan};
pub use filename::{has_pdf_extension, secure_filename};
pub use parser::{PageText, ParsedPdf, PdfParser};
pub use pipeline::{IngestOutcome, IngestPipeline};
