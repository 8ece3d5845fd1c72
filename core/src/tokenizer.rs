//! Greedy longest-match segmentation over the phrase trie.
//!
//! At each position the trie is walked as far as the text allows and the
//! last complete entry seen wins. Without a match, a CJK ideograph becomes a
//! one-character token and any other text is gathered into a run that ends at
//! the next ideograph. The tokens partition the input: concatenated in order
//! they reproduce it exactly, and none is empty.

use crate::trie::Trie;

/// Whether `ch` is in the CJK Unified Ideographs block (U+4E00..=U+9FFF).
pub fn is_cjk(ch: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&ch)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A complete dictionary entry.
    Phrase,
    /// A single ideograph with no dictionary entry starting at it.
    Ideograph,
    /// A run of non-ideograph text.
    Text,
    /// A line break, when line breaks are token boundaries.
    LineBreak,
}

/// A slice of the input with the reason it was cut there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
}

/// Segmenter bound to a trie.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'t> {
    trie: &'t Trie,
    split_on_newline: bool,
}

impl<'t> Tokenizer<'t> {
    /// Tokenizer that treats line breaks as token boundaries.
    pub fn new(trie: &'t Trie) -> Self {
        Self {
            trie,
            split_on_newline: true,
        }
    }

    /// Choose whether `\n` is its own token and ends text runs.
    pub fn split_on_newline(mut self, on: bool) -> Self {
        self.split_on_newline = on;
        self
    }

    /// Segment `text` lazily.
    ///
    /// # Example
    /// ```
    /// use quicktrans_core::{Trie, Tokenizer};
    ///
    /// let mut trie = Trie::new();
    /// trie.insert("老五", "Lão Ngũ");
    /// trie.insert("帅气", "đẹp trai");
    ///
    /// let words: Vec<&str> = Tokenizer::new(&trie)
    ///     .tokenize("老五真帅气")
    ///     .map(|t| t.text)
    ///     .collect();
    /// assert_eq!(words, ["老五", "真", "帅气"]);
    /// ```
    pub fn tokenize<'a>(&self, text: &'a str) -> Tokens<'t, 'a> {
        let mut chars = Vec::with_capacity(text.len());
        let mut offsets = Vec::with_capacity(text.len() + 1);
        for (offset, ch) in text.char_indices() {
            chars.push(ch);
            offsets.push(offset);
        }
        offsets.push(text.len());

        Tokens {
            trie: self.trie,
            split_on_newline: self.split_on_newline,
            text,
            chars,
            offsets,
            pos: 0,
        }
    }
}

/// Iterator over the tokens of one input. Not restartable.
#[derive(Debug)]
pub struct Tokens<'t, 'a> {
    trie: &'t Trie,
    split_on_newline: bool,
    text: &'a str,
    chars: Vec<char>,
    // byte offset of every char, plus text.len() at the end
    offsets: Vec<usize>,
    pos: usize,
}

impl<'t, 'a> Tokens<'t, 'a> {
    fn is_boundary(&self, ch: char) -> bool {
        is_cjk(ch) || (self.split_on_newline && ch == '\n')
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[self.offsets[start]..self.offsets[end]]
    }
}

impl<'t, 'a> Iterator for Tokens<'t, 'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.pos;
        let ch = *self.chars.get(start)?;

        let (end, kind) = if let Some(end) = self.trie.longest_prefix(&self.chars, start) {
            (end, TokenKind::Phrase)
        } else if is_cjk(ch) {
            (start + 1, TokenKind::Ideograph)
        } else if self.split_on_newline && ch == '\n' {
            (start + 1, TokenKind::LineBreak)
        } else {
            let mut end = start + 1;
            while end < self.chars.len() && !self.is_boundary(self.chars[end]) {
                end += 1;
            }
            (end, TokenKind::Text)
        };

        self.pos = end;
        Some(Token {
            text: self.slice(start, end),
            kind,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.chars.len() - self.pos;
        ((remaining > 0) as usize, Some(remaining))
    }
}
