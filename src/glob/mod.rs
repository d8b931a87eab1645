//! URL pattern expansion
//!
//! A pattern such as `http://host/{a,b}/[1-3].txt` stands for the cross
//! product of its sets and ranges. The first segment varies slowest and the
//! last fastest, the same order nested loops over the segments would give.
//!
//! ```text
//! http://h/{a,b}/[1-2]  ->  http://h/a/1, http://h/a/2, http://h/b/1, http://h/b/2
//! ```

mod parser;

pub use parser::{parse_pattern, Segment};

use crate::errors::Result;

/// One concrete URL produced by expanding a pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobMatch {
    pub url: String,
    /// The alternative chosen from each set or range, in pattern order
    pub captures: Vec<String>,
}

impl GlobMatch {
    /// A token taken as-is, with globbing disabled
    pub fn verbatim(token: &str) -> Self {
        Self {
            url: token.to_string(),
            captures: Vec::new(),
        }
    }
}

/// Expand a pattern into every URL it stands for
pub fn expand(pattern: &str) -> Result<Vec<String>> {
    Ok(expand_matches(pattern)?.into_iter().map(|m| m.url).collect())
}

/// Expand a pattern, keeping the alternatives chosen for each result
pub fn expand_matches(pattern: &str) -> Result<Vec<GlobMatch>> {
    let segments = parse_pattern(pattern)?;
    Ok(expand_segments(&segments))
}

/// Cross product of already parsed segments.
///
/// Built by folding over the segments so the accumulator, not the call
/// stack, grows with the pattern.
pub fn expand_segments(segments: &[Segment]) -> Vec<GlobMatch> {
    segments.iter().fold(
        vec![GlobMatch { url: String::new(), captures: Vec::new() }],
        |acc, segment| match segment {
            Segment::Literal(text) => acc
                .into_iter()
                .map(|mut m| {
                    m.url.push_str(text);
                    m
                })
                .collect(),
            segment => {
                let options = segment.alternatives();
                let mut next = Vec::with_capacity(acc.len().saturating_mul(options.len()));
                for m in &acc {
                    for option in &options {
                        let mut url = String::with_capacity(m.url.len() + option.len());
                        url.push_str(&m.url);
                        url.push_str(option);
                        let mut captures = m.captures.clone();
                        captures.push(option.clone());
                        next.push(GlobMatch { url, captures });
                    }
                }
                next
            }
        },
    )
}

/// Number of URLs the segments expand to, saturating instead of overflowing
pub fn segment_count(segments: &[Segment]) -> usize {
    segments
        .iter()
        .fold(1usize, |count, segment| count.saturating_mul(segment.len()))
}

/// Replace `#N` in an output template with the N-th capture (1-based).
///
/// References with no matching capture are left as written.
pub fn fill_template(template: &str, captures: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find('#') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        let capture = after[..digits]
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| captures.get(i));

        match capture {
            Some(value) => {
                out.push_str(value);
                rest = &after[digits..];
            }
            None => {
                out.push('#');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
