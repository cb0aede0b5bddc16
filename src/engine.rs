//! Rewriting of look-alike characters inside parenthesized spans.
//!
//! A span starts at a literal `(` and ends at the next `)`. Nesting is not
//! understood: in `(a(b)c)` the span is `(a(b)`.

use std::ops::Range;

use regex::Regex;
use serde::Serialize;

use crate::table::LookalikeTable;

lazy_static::lazy_static! {
    static ref SPAN: Regex = Regex::new(r"\([^)]+\)").unwrap();
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span<'a> {
    pub range: Range<usize>,
    pub text: &'a str,
}

impl<'a> Span<'a> {
    pub fn start(&self) -> usize {
        self.range.start
    }

    pub fn end(&self) -> usize {
        self.range.end
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    /// Byte offset of the span in the input text.
    pub offset: usize,
    pub original: String,
    pub fixed: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransformResult {
    pub output: String,
    pub changes: Vec<ChangeRecord>,
}

impl TransformResult {
    pub fn count(&self) -> usize {
        self.changes.len()
    }

    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Non-overlapping spans of `text`, left to right.
pub fn spans(text: &str) -> impl Iterator<Item = Span<'_>> {
    SPAN.find_iter(text).map(|m| Span {
        range: m.range(),
        text: m.as_str(),
    })
}

/// Rewrites every span of `text` that contains a character of `table`.
///
/// Text outside of spans and spans without look-alikes are copied through
/// unchanged.
pub fn transform_with(table: &LookalikeTable, text: &str) -> TransformResult {
    let mut output = String::with_capacity(text.len());
    let mut changes = Vec::new();
    let mut last = 0;

    for span in spans(text) {
        if !table.contains_lookalike(span.text) {
            continue;
        }
        let fixed = table.normalize(span.text);
        output.push_str(&text[last..span.start()]);
        output.push_str(&fixed);
        last = span.end();
        changes.push(ChangeRecord {
            offset: span.start(),
            original: span.text.to_owned(),
            fixed,
        });
    }
    output.push_str(&text[last..]);

    TransformResult { output, changes }
}

/// [`transform_with`] using the built-in Cyrillic table.
pub fn transform(text: &str) -> TransformResult {
    transform_with(LookalikeTable::cyrillic(), text)
}
