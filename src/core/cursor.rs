//! Position-tracking view over a normalized formula source.
//!
//! Offsets are byte offsets into the NFC-normalized text; `peek` and
//! `advance` count characters. The cursor never fails: peeking past the end
//! yields a shorter slice and advancing stops at the end. The error side
//! channel is written by the parser, never by the cursor itself.

use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone)]
pub struct Cursor {
    source: String,
    pub position: usize,
    error: Option<String>,
    error_position: usize,
}

/// NFC form of `input`; all offsets in this crate index into this form.
pub fn normalize(input: &str) -> String {
    input.nfc().collect()
}

impl Cursor {
    /// Normalizes `input` to NFC and starts at offset 0.
    pub fn new(input: &str) -> Self {
        Self {
            source: normalize(input),
            position: 0,
            error: None,
            error_position: 0,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Up to `n` characters starting at the current position.
    pub fn peek(&self, n: usize) -> &str {
        let rest = &self.source[self.position..];
        match rest.char_indices().nth(n) {
            Some((end, _)) => &rest[..end],
            None => rest,
        }
    }

    pub fn advance(&mut self, n: usize) {
        let len = self.peek(n).len();
        self.position += len;
    }

    pub fn is_at_end(&self) -> bool {
        self.position == self.source.len()
    }

    /// Records a diagnostic at the current position.
    pub fn fail(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.error_position = self.position;
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn error_position(&self) -> usize {
        self.error_position
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek(1).chars().next().is_some_and(char::is_whitespace) {
            self.advance(1);
        }
    }
}
