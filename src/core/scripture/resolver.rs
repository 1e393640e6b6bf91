use super::lookup::{find_book, Lookup};
use super::renderer::{PassageText, ResolvedVerse};
use super::tokenizer::{tokenize, Citation, RawCitation};
use super::ScriptureError;
use crate::domain::model::{Book, Chapter, Corpus};
use serde::{Deserialize, Serialize};

/// How a verse range is cut out of a single-chapter book.
///
/// `Natural` is the default because it yields `Jude 3` → `"3. ..."`, the
/// documented expected output. `Literal` keeps the legacy off-by-one slice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SingleChapterSlicing {
    /// `Jude 3-4` selects verses 3 and 4, numbered 3 and 4.
    #[default]
    Natural,
    /// `Jude 3-4` selects `verses[3..4]` and numbers the slice from 1.
    /// Matches documents produced by earlier releases.
    Literal,
}

/// Expands scripture references into numbered verse text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    slicing: SingleChapterSlicing,
}

impl Resolver {
    pub fn new(slicing: SingleChapterSlicing) -> Self {
        Self { slicing }
    }

    pub fn slicing(&self) -> SingleChapterSlicing {
        self.slicing
    }

    /// Resolves every citation in `passage` against `corpus`.
    ///
    /// Stops at the first citation whose book is not in the corpus and returns
    /// what was rendered up to that point.
    pub fn resolve(&self, corpus: &Corpus, passage: &str) -> Result<String, ScriptureError> {
        let citations = tokenize(passage);
        let mut text = PassageText::new(citations.len());

        for raw in &citations {
            let book = match find_book(corpus, &raw.book) {
                Lookup::Found(book) => book,
                Lookup::NotFound => {
                    tracing::warn!("Cannot find book {}", raw.book);
                    break;
                }
            };

            let verses = if book.is_single_chapter() {
                self.single_chapter_verses(book, &raw.parse_verses())
            } else {
                multi_chapter_verses(book, raw)?
            };
            tracing::debug!("Resolved '{}' to {} verse(s)", raw.text, verses.len());
            text.push(&verses);
        }

        Ok(text.finish())
    }

    fn single_chapter_verses<'a>(&self, book: &'a Book, citation: &Citation) -> Vec<ResolvedVerse<'a>> {
        let chapter = &book.chapters[0];
        let start = citation.verse_start.unwrap_or(1);
        let end = citation.verse_end.unwrap_or(start);

        match self.slicing {
            SingleChapterSlicing::Natural => numbered_range(chapter, start, end),
            SingleChapterSlicing::Literal => chapter
                .verses
                .get(start..end.min(chapter.verses.len()))
                .unwrap_or_default()
                .iter()
                .enumerate()
                .map(|(idx, text)| ResolvedVerse { number: idx + 1, text })
                .collect(),
        }
    }
}

fn multi_chapter_verses<'a>(book: &'a Book, raw: &RawCitation) -> Result<Vec<ResolvedVerse<'a>>, ScriptureError> {
    let citation = raw.parse_chapter().ok_or_else(|| ScriptureError::MissingChapter {
        citation: raw.text.clone(),
    })?;
    // parse_chapter always fills the chapter
    let number = citation.chapter.unwrap_or_default();

    let chapter = number
        .checked_sub(1)
        .and_then(|idx| book.chapters.get(idx))
        .ok_or_else(|| ScriptureError::ChapterOutOfRange {
            book: book.name.clone(),
            chapter: number,
            available: book.chapters.len(),
        })?;

    Ok(match citation.verse_start {
        Some(start) => numbered_range(chapter, start, citation.verse_end.unwrap_or(start)),
        None => numbered_range(chapter, 1, chapter.verses.len()),
    })
}

/// Verses `start..=end` (1-based), clamped to the chapter. Verse 0 selects nothing.
fn numbered_range(chapter: &Chapter, start: usize, end: usize) -> Vec<ResolvedVerse<'_>> {
    let Some(from) = start.checked_sub(1) else {
        return Vec::new();
    };
    let to = end.min(chapter.verses.len());

    chapter
        .verses
        .get(from..to)
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(idx, text)| ResolvedVerse {
            number: from + idx + 1,
            text,
        })
        .collect()
}

/// Resolves `passage` with the default single-chapter slicing.
pub fn resolve(corpus: &Corpus, passage: &str) -> Result<String, ScriptureError> {
    Resolver::default().resolve(corpus, passage)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter(prefix: &str, count: usize) -> Chapter {
        Chapter {
            verses: (1..=count).map(|v| format!("{} v{}", prefix, v)).collect(),
        }
    }

    fn corpus() -> Corpus {
        Corpus {
            books: vec![
                Book {
                    name: "John".to_string(),
                    chapters: vec![chapter("J1", 51), chapter("J2", 25), chapter("J3", 36), chapter("J4", 54)],
                },
                Book {
                    name: "Jude".to_string(),
                    chapters: vec![chapter("Jude", 25)],
                },
                Book {
                    name: "1 John".to_string(),
                    chapters: vec![chapter("1J1", 10), chapter("1J2", 29)],
                },
            ],
        }
    }

    #[test]
    fn test_single_verse() {
        assert_eq!(resolve(&corpus(), "John 3:16").unwrap(), "16. J3 v16");
    }

    #[test]
    fn test_verse_range() {
        assert_eq!(resolve(&corpus(), "John 3:16-17").unwrap(), "16. J3 v16 17. J3 v17");
    }

    #[test]
    fn test_whole_chapter() {
        let text = resolve(&corpus(), "John 2").unwrap();
        assert!(text.starts_with("1. J2 v1 2. J2 v2"));
        assert!(text.ends_with("25. J2 v25"));
    }

    #[test]
    fn test_numbered_book() {
        assert_eq!(resolve(&corpus(), "1 John 2:1").unwrap(), "1. 1J2 v1");
    }

    #[test]
    fn test_two_citations() {
        assert_eq!(
            resolve(&corpus(), "John 3:16-17 John 4:1").unwrap(),
            "16. J3 v16 17. J3 v17 (...) 1. J4 v1"
        );
    }

    #[test]
    fn test_single_chapter_book_natural() {
        assert_eq!(resolve(&corpus(), "Jude 3").unwrap(), "3. Jude v3");
        assert_eq!(resolve(&corpus(), "Jude 3-4").unwrap(), "3. Jude v3 4. Jude v4");
    }

    #[test]
    fn test_single_chapter_book_literal() {
        let resolver = Resolver::new(SingleChapterSlicing::Literal);
        assert_eq!(resolver.resolve(&corpus(), "Jude 3").unwrap(), "");
        assert_eq!(resolver.resolve(&corpus(), "Jude 3-5").unwrap(), "1. Jude v4 2. Jude v5");
    }

    #[test]
    fn test_single_chapter_book_ignores_chapter_part() {
        assert_eq!(resolve(&corpus(), "Jude 1:3").unwrap(), "1. Jude v1");
    }

    #[test]
    fn test_unknown_book_stops_and_keeps_partial_output() {
        assert_eq!(resolve(&corpus(), "Hezekiah 1:1 John 3:16").unwrap(), "");
        assert_eq!(resolve(&corpus(), "John 3:16 Hezekiah 1:1 John 3:17").unwrap(), "16. J3 v16 (...) ");
    }

    #[test]
    fn test_empty_corpus() {
        assert_eq!(resolve(&Corpus::default(), "John 3:16").unwrap(), "");
    }

    #[test]
    fn test_no_citations() {
        assert_eq!(resolve(&corpus(), "Jude").unwrap(), "");
        assert_eq!(resolve(&corpus(), "").unwrap(), "");
    }

    #[test]
    fn test_verse_range_clamps_to_chapter() {
        assert_eq!(resolve(&corpus(), "John 2:24-40").unwrap(), "24. J2 v24 25. J2 v25");
        assert_eq!(resolve(&corpus(), "John 2:30").unwrap(), "");
        assert_eq!(resolve(&corpus(), "John 2:5-3").unwrap(), "");
    }

    #[test]
    fn test_verse_zero_selects_nothing() {
        assert_eq!(resolve(&corpus(), "John 3:0-2").unwrap(), "");
        assert_eq!(resolve(&corpus(), "John 3:0").unwrap(), "");
        assert_eq!(resolve(&corpus(), "Jude 0-2").unwrap(), "");
        assert_eq!(resolve(&corpus(), "John 3:0-2 John 4:1").unwrap(), " (...) 1. J4 v1");
    }

    #[test]
    fn test_chapter_out_of_range_is_fatal() {
        let err = resolve(&corpus(), "John 22:1").unwrap_err();
        assert_eq!(
            err,
            ScriptureError::ChapterOutOfRange {
                book: "John".to_string(),
                chapter: 22,
                available: 4,
            }
        );
        assert!(resolve(&corpus(), "John 0:1").is_err());
    }

    #[test]
    fn test_missing_chapter_is_fatal() {
        let err = resolve(&corpus(), "John\t3:16").unwrap_err();
        assert!(matches!(err, ScriptureError::MissingChapter { .. }));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let corpus = corpus();
        let first = resolve(&corpus, "John 3:16-17 Jude 3 1 John 1").unwrap();
        let second = resolve(&corpus, "John 3:16-17 Jude 3 1 John 1").unwrap();
        assert_eq!(first, second);
    }
}
