//! Scripture reference resolution.
//!
//! Turns free-form references such as `"John 3:16-17 John 4:1"` into numbered
//! verse text taken from a [`Corpus`](crate::domain::model::Corpus).

pub mod lookup;
pub mod renderer;
pub mod resolver;
pub mod tokenizer;

use thiserror::Error;

pub use resolver::{resolve, Resolver, SingleChapterSlicing};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScriptureError {
    #[error("No chapter number could be read from '{citation}'")]
    MissingChapter { citation: String },

    #[error("{book} has {available} chapter(s), chapter {chapter} does not exist")]
    ChapterOutOfRange {
        book: String,
        chapter: usize,
        available: usize,
    },
}
