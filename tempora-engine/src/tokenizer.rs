//! Whitespace and punctuation tokenizer
//!
//! Enough to feed plain text through the aligner when no upstream tokenizer
//! is available. Words keep inner punctuation ("II-lea", "a.ch.", "1856-1857")
//! and lose leading or trailing quotes, brackets and sentence punctuation.

use tempora_core::{Document, DocumentError, Token};

const LEADING: &[char] = &['(', '[', '{', '"', '\'', '„', '«', '“'];
const TRAILING: &[char] = &[
    ',', ';', ':', '!', '?', ')', ']', '}', '"', '\'', '”', '»', '…',
];

/// Splits text into tokens with char offsets
#[derive(Debug, Clone)]
pub struct SimpleTokenizer {
    abbreviations: Vec<String>,
}

impl SimpleTokenizer {
    /// Create a tokenizer with the default abbreviation list
    pub fn new() -> Self {
        Self {
            abbreviations: ["a.ch.", "d.ch.", "sec.", "p.ch.", "î.e.n.", "e.n.", "ian.", "feb."]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Add words that keep their trailing period
    pub fn with_abbreviations<I, S>(mut self, abbreviations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.abbreviations
            .extend(abbreviations.into_iter().map(Into::into));
        self
    }

    /// Tokenize `text`
    ///
    /// ```
    /// use tempora_engine::SimpleTokenizer;
    ///
    /// let tokens = SimpleTokenizer::new().tokenize("Sec al II-lea a.ch., pe atunci.");
    /// let words: Vec<&str> = tokens.iter().map(|t| t.text()).collect();
    /// assert_eq!(words, vec!["Sec", "al", "II-lea", "a.ch.", ",", "pe", "atunci", "."]);
    /// ```
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut word: Vec<char> = Vec::new();
        let mut word_start = 0;

        for (offset, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                self.split_word(&word, word_start, &mut tokens);
                word.clear();
                word_start = offset + 1;
            } else {
                word.push(ch);
            }
        }
        self.split_word(&word, word_start, &mut tokens);

        tokens
    }

    /// Tokenize `text` into a validated [`Document`]
    pub fn document(&self, text: impl Into<String>) -> Result<Document, DocumentError> {
        let text = text.into();
        let tokens = self.tokenize(&text);
        Document::new(text, tokens, Vec::new())
    }

    fn split_word(&self, word: &[char], offset: usize, tokens: &mut Vec<Token>) {
        if word.is_empty() {
            return;
        }

        let mut start = 0;
        while start < word.len() && LEADING.contains(&word[start]) {
            push(tokens, &word[start..=start], offset + start);
            start += 1;
        }

        let mut end = word.len();
        let mut trailing = Vec::new();
        while end > start {
            let ch = word[end - 1];
            let is_period = ch == '.' && !self.is_abbreviation(&word[start..end]);
            if TRAILING.contains(&ch) || is_period {
                trailing.push(end - 1);
                end -= 1;
            } else {
                break;
            }
        }

        if start < end {
            push(tokens, &word[start..end], offset + start);
        }
        for position in trailing.into_iter().rev() {
            push(tokens, &word[position..=position], offset + position);
        }
    }

    fn is_abbreviation(&self, word: &[char]) -> bool {
        let word: String = word.iter().collect::<String>().to_lowercase();
        self.abbreviations.iter().any(|abbr| *abbr == word)
    }
}

impl Default for SimpleTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

fn push(tokens: &mut Vec<Token>, chars: &[char], offset: usize) {
    let text: String = chars.iter().collect();
    tokens.push(Token::new(tokens.len(), text, offset));
}
