use std::fmt::Debug;

/// Pulls text out of an uploaded PDF, one string per page in document
/// order.
pub trait DocumentExtractor {
    type Error: Debug;

    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, Self::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to extract PDF text: {0}")]
    Pdf(#[from] pdf_extract::OutputError),
}

/// Pure-Rust extraction via `pdf-extract`. Pages without extractable text
/// (scanned images) come back empty; there is no OCR fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl DocumentExtractor for PdfTextExtractor {
    type Error = ExtractError;

    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<String>, Self::Error> {
        let pages = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)?;
        Ok(pages)
    }
}

/// Joins page texts in order with no separator. A page that yielded no text
/// contributes nothing; zero pages yields the empty string.
pub fn concat_pages(pages: &[String]) -> String {
    let mut text = String::with_capacity(pages.iter().map(String::len).sum());
    for page in pages {
        text.push_str(page);
    }
    text
}
