/// Placed after every citation block except the last one found in the input.
pub const TRUNCATION_MARKER: &str = " (...) ";

/// A verse selected for output, numbered the way it is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedVerse<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Renders one citation's verses as `"16. text 17. text"`.
pub fn render_block(verses: &[ResolvedVerse<'_>]) -> String {
    verses
        .iter()
        .map(|verse| format!("{}. {}", verse.number, verse.text))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Accumulates citation blocks for a passage with a known number of citations.
#[derive(Debug)]
pub struct PassageText {
    output: String,
    citations: usize,
    written: usize,
}

impl PassageText {
    pub fn new(citations: usize) -> Self {
        Self {
            output: String::new(),
            citations,
            written: 0,
        }
    }

    pub fn push(&mut self, verses: &[ResolvedVerse<'_>]) {
        self.written += 1;
        self.output.push_str(&render_block(verses));
        if self.written < self.citations {
            self.output.push_str(TRUNCATION_MARKER);
        }
    }

    pub fn finish(self) -> String {
        self.output
    }
}
