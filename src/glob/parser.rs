//! URL pattern scanner
//!
//! Splits a pattern into literal text, sets (`{a,b}`, taken verbatim) and
//! ranges (`[1-9]`, `[a-z]`). Ranges keep only their bounds; their values
//! are produced during expansion, so a pattern can be counted without
//! building anything.

use crate::errors::{PlanError, Result};

/// One parsed unit of a URL pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Set(Vec<String>),
    /// Every integer from `low` to `high`, both included
    NumRange { low: i64, high: i64 },
    /// Every code point from `low` to `high`, both included
    CharRange { low: char, high: char },
}

impl Segment {
    /// Number of strings this segment can stand for, saturating at
    /// `usize::MAX`
    pub fn len(&self) -> usize {
        match self {
            Segment::Literal(_) => 1,
            Segment::Set(options) => options.len(),
            Segment::NumRange { low, high } => {
                let span = i128::from(*high) - i128::from(*low) + 1;
                usize::try_from(span).unwrap_or(usize::MAX)
            }
            Segment::CharRange { low, high } => {
                let span = *high as u32 - *low as u32 + 1;
                // chars skip the surrogate block
                let gap = if *low <= '\u{D7FF}' && *high >= '\u{E000}' { 0x800 } else { 0 };
                (span - gap) as usize
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The strings a set or range stands for; a literal stands for itself
    pub fn alternatives(&self) -> Vec<String> {
        match self {
            Segment::Literal(text) => vec![text.clone()],
            Segment::Set(options) => options.clone(),
            Segment::NumRange { low, high } => (*low..=*high).map(|n| n.to_string()).collect(),
            Segment::CharRange { low, high } => (*low..=*high).map(String::from).collect(),
        }
    }
}

/// Scan a URL pattern into segments
pub fn parse_pattern(pattern: &str) -> Result<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut pos = 0;

    while let Some(c) = pattern[pos..].chars().next() {
        let next = pos + c.len_utf8();
        match c {
            '\\' => {
                // A lone trailing backslash escapes nothing and is dropped
                match pattern[next..].chars().next() {
                    Some(escaped) => {
                        literal.push(escaped);
                        pos = next + escaped.len_utf8();
                    }
                    None => pos = next,
                }
            }
            '{' | '[' => {
                let close = if c == '{' { '}' } else { ']' };
                let Some(len) = pattern[next..].find(close) else {
                    return Err(if c == '{' {
                        PlanError::UnmatchedBrace { pattern: pattern.to_string(), position: pos }
                    } else {
                        PlanError::UnmatchedBracket { pattern: pattern.to_string(), position: pos }
                    });
                };
                let body = &pattern[next..next + len];

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                let segment = if c == '{' {
                    Segment::Set(body.split(',').map(str::to_string).collect())
                } else {
                    parse_range(pattern, body)?
                };
                segments.push(segment);
                pos = next + len + close.len_utf8();
            }
            _ => {
                literal.push(c);
                pos = next;
            }
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

/// Read the bounds of a `[lo-hi]` range
fn parse_range(pattern: &str, body: &str) -> Result<Segment> {
    let bad_format = || PlanError::InvalidRangeFormat {
        pattern: pattern.to_string(),
        range: body.to_string(),
    };

    let mut parts = body.split('-');
    let (Some(low), Some(high), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(bad_format());
    };

    if let (Ok(lo), Ok(hi)) = (low.parse::<i64>(), high.parse::<i64>()) {
        if lo > hi {
            return Err(PlanError::InvalidNumericRange {
                pattern: pattern.to_string(),
                low: lo,
                high: hi,
            });
        }
        return Ok(Segment::NumRange { low: lo, high: hi });
    }

    let mut low_chars = low.chars();
    let mut high_chars = high.chars();
    match (low_chars.next(), low_chars.next(), high_chars.next(), high_chars.next()) {
        (Some(lo), None, Some(hi), None) => {
            if lo > hi {
                return Err(PlanError::InvalidCharRange {
                    pattern: pattern.to_string(),
                    low: lo,
                    high: hi,
                });
            }
            Ok(Segment::CharRange { low: lo, high: hi })
        }
        _ => Err(bad_format()),
    }
}
