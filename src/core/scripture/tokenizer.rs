//! Citation scanning.
//!
//! Finds every `<book> <locator>` citation in a passage string. The book name
//! is greedy over letters and spaces and only gives back characters until a
//! `<whitespace><digit>` boundary is found, so "Read John 3:16" yields the book
//! "Read John". Locators come in four shapes: `N`, `N-M`, `N:M` and `N:M-K`.

/// A citation as it appeared in the input, before its book is known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCitation {
    /// The matched substring, e.g. `"1 John 3:16-17"`.
    pub text: String,
    pub book: String,
    /// The whitespace character between the book name and the locator.
    pub separator: char,
    /// Everything after the separator, e.g. `"3:16-17"`.
    pub locator: String,
}

/// A parsed locator. Which fields are filled depends on how the book is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub chapter: Option<usize>,
    pub verse_start: Option<usize>,
    pub verse_end: Option<usize>,
}

impl RawCitation {
    /// Reads the locator as `start[-end]` for a book addressed by verse only.
    ///
    /// Anything after a `:` is ignored, so "Jude 1:3" addresses verse 1.
    pub fn parse_verses(&self) -> Citation {
        let chars: Vec<char> = self.locator.chars().collect();
        let start_len = digit_run(&chars, 0);
        let start = number(&chars[..start_len]);
        let end = scan_separated(&chars, start_len, '-')
            .map(|(from, to)| number(&chars[from..to]))
            .unwrap_or(start);

        Citation {
            chapter: None,
            verse_start: Some(start),
            verse_end: Some(end),
        }
    }

    /// Reads the locator as `chapter[:start[-end]]`.
    ///
    /// This form is strict: the chapter must follow a single space and no
    /// whitespace is allowed around `:` or `-`. Returns `None` when no chapter
    /// number can be read.
    pub fn parse_chapter(&self) -> Option<Citation> {
        if self.separator != ' ' {
            return None;
        }

        let chars: Vec<char> = self.locator.chars().collect();
        let chapter_len = digit_run(&chars, 0);
        if chapter_len == 0 {
            return None;
        }
        let chapter = number(&chars[..chapter_len]);

        let mut verse_start = None;
        let mut verse_end = None;
        if let Some((from, to)) = scan_adjacent(&chars, chapter_len, ':') {
            verse_start = Some(number(&chars[from..to]));
            verse_end = scan_adjacent(&chars, to, '-').map(|(from, to)| number(&chars[from..to]));
        }

        Some(Citation {
            chapter: Some(chapter),
            verse_start,
            verse_end: verse_end.or(verse_start),
        })
    }
}

/// Scans `passage` for all non-overlapping citations, left to right.
pub fn tokenize(passage: &str) -> Vec<RawCitation> {
    let chars: Vec<char> = passage.chars().collect();
    let mut citations = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        match (pos..chars.len()).find_map(|start| match_at(&chars, start)) {
            Some((end, citation)) => {
                tracing::trace!("Found citation '{}'", citation.text);
                citations.push(citation);
                pos = end;
            }
            None => break,
        }
    }

    citations
}

fn match_at(chars: &[char], start: usize) -> Option<(usize, RawCitation)> {
    // Options are tried greedy-first: take the numeral prefix if present, then
    // the optional whitespace, then the longest name run that still leaves a
    // `<whitespace><digit>` boundary behind it.
    for numeral in [1, 0] {
        if numeral == 1 && !chars.get(start).is_some_and(|c| ('1'..='3').contains(c)) {
            continue;
        }
        let after_numeral = start + numeral;

        for space in [1, 0] {
            if space == 1 && !chars.get(after_numeral).is_some_and(|c| c.is_whitespace()) {
                continue;
            }
            let name_start = after_numeral + space;
            let run = chars[name_start.min(chars.len())..]
                .iter()
                .take_while(|c| is_name_char(**c))
                .count();

            for len in (1..=run).rev() {
                let name_end = name_start + len;
                match (chars.get(name_end), chars.get(name_end + 1)) {
                    (Some(sep), Some(digit)) if sep.is_whitespace() && digit.is_ascii_digit() => {
                        return Some(finish(chars, start, name_end, *sep));
                    }
                    _ => {}
                }
            }
        }
    }

    None
}

fn finish(chars: &[char], start: usize, name_end: usize, separator: char) -> (usize, RawCitation) {
    let locator_start = name_end + 1;
    let mut end = locator_start + digit_run(chars, locator_start);

    if let Some((_, verse_end)) = scan_separated(chars, end, ':') {
        end = scan_separated(chars, verse_end, '-').map_or(verse_end, |(_, to)| to);
    } else if let Some((_, range_end)) = scan_separated(chars, end, '-') {
        end = range_end;
    }

    let text: String = chars[start..end].iter().collect();
    let book: String = chars[start..name_end].iter().collect();
    let locator: String = chars[locator_start..end].iter().collect();

    (
        end,
        RawCitation {
            text: text.trim_start().to_string(),
            book: book.trim_start().to_string(),
            separator,
            locator,
        },
    )
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == ' '
}

fn digit_run(chars: &[char], from: usize) -> usize {
    chars
        .get(from..)
        .map_or(0, |rest| rest.iter().take_while(|c| c.is_ascii_digit()).count())
}

fn skip_whitespace(chars: &[char], from: usize) -> usize {
    from + chars
        .get(from..)
        .map_or(0, |rest| rest.iter().take_while(|c| c.is_whitespace()).count())
}

/// Matches `\s*<sep>\s*\d+` at `from`, returning the digit span.
fn scan_separated(chars: &[char], from: usize, sep: char) -> Option<(usize, usize)> {
    let at = skip_whitespace(chars, from);
    if chars.get(at) != Some(&sep) {
        return None;
    }
    let digits_start = skip_whitespace(chars, at + 1);
    let len = digit_run(chars, digits_start);
    (len > 0).then_some((digits_start, digits_start + len))
}

/// Matches `<sep>\d+` at `from`, returning the digit span.
fn scan_adjacent(chars: &[char], from: usize, sep: char) -> Option<(usize, usize)> {
    if chars.get(from) != Some(&sep) {
        return None;
    }
    let len = digit_run(chars, from + 1);
    (len > 0).then_some((from + 1, from + 1 + len))
}

fn number(digits: &[char]) -> usize {
    digits
        .iter()
        .collect::<String>()
        .parse()
        .unwrap_or(usize::MAX)
}
