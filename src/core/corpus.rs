use crate::domain::model::Corpus;
use crate::utils::error::{LiturgistError, Result};

/// Parses a Bible JSON document.
pub fn parse_corpus(content: &[u8]) -> Result<Corpus> {
    let corpus: Corpus = serde_json::from_slice(content)?;

    if let Some(book) = corpus.books.iter().find(|book| book.chapters.is_empty()) {
        return Err(LiturgistError::ProcessingError {
            message: format!("Book '{}' in the Bible JSON has no chapters", book.name),
        });
    }

    tracing::debug!("Loaded Bible JSON with {} book(s)", corpus.books.len());
    Ok(corpus)
}
