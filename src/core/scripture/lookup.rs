use crate::domain::model::{Book, Corpus};

/// Outcome of looking a book name up in a corpus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'a> {
    Found(&'a Book),
    NotFound,
}

/// Finds the first book whose name equals `name` exactly.
pub fn find_book<'a>(corpus: &'a Corpus, name: &str) -> Lookup<'a> {
    match corpus.books.iter().find(|book| book.name == name) {
        Some(book) => Lookup::Found(book),
        None => Lookup::NotFound,
    }
}
