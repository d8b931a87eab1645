//! `-F/--form` argument grammar
//!
//! ```text
//! name=value
//! name=@file[;type=mime][;filename=name][;encoder=enc][;headers=header]
//! name=<file
//! name=@a.jpg,@b.png
//! ```
//!
//! Words may be double-quoted, with `\` escaping the next character.

use tracing::warn;

use crate::errors::{PlanError, Result};
use crate::operation::{FormKind, FormPart};

/// Parse one `--form` argument into its parts
pub fn parse_form(option: &str, input: &str) -> Result<Vec<FormPart>> {
    let bad = |reason: &str| PlanError::BadArgument {
        option: option.to_string(),
        value: input.to_string(),
        reason: reason.to_string(),
    };

    let (name, content) = input.split_once('=').ok_or_else(|| bad("missing '='"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(bad("form part has no name"));
    }

    let mut scanner = Scanner::new(content);
    let mut parts = Vec::new();

    loop {
        scanner.skip_spaces();
        if scanner.at_end() {
            if parts.is_empty() {
                return Err(bad("form part has no value"));
            }
            // trailing comma
            break;
        }

        let kind = if scanner.eat('@') {
            FormKind::File
        } else if scanner.eat('<') {
            FormKind::DataFile
        } else {
            FormKind::Literal
        };
        let mut part = FormPart::new(name, kind, scanner.word(&[';', ',']));

        while scanner.eat(';') {
            let attribute = scanner.word(&['=']);
            if !scanner.eat('=') {
                continue;
            }
            let value = scanner.word(&[';', ',']);
            match attribute.to_ascii_lowercase().as_str() {
                "type" => part.content_type = Some(value),
                "filename" => part.filename = Some(value),
                "encoder" => part.encoder = Some(value),
                "headers" => part.headers.push(value),
                other => warn!(option, attribute = other, "skipping unknown form attribute"),
            }
        }

        parts.push(part);
        if !scanner.eat(',') {
            break;
        }
        if kind == FormKind::Literal {
            return Err(bad("literal form parts cannot be comma-separated"));
        }
    }

    Ok(parts)
}

/// Parse a `--form-string` argument: everything after the first `=` is the
/// value, with no `@`, `<` or `;` handling
pub fn parse_form_string(option: &str, input: &str) -> Result<FormPart> {
    match input.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok(FormPart::new(name.trim(), FormKind::Literal, value.to_string()))
        }
        _ => Err(PlanError::BadArgument {
            option: option.to_string(),
            value: input.to_string(),
            reason: "expected name=value".to_string(),
        }),
    }
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn skip_spaces(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start_matches([' ', '\t']).len();
    }

    fn eat(&mut self, c: char) -> bool {
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// A quoted word, or the trimmed text up to the next `end` character
    fn word(&mut self, end: &[char]) -> String {
        self.skip_spaces();
        if let Some(quoted) = self.quoted() {
            return quoted;
        }
        let rest = self.rest();
        let len = rest.find(end).unwrap_or(rest.len());
        self.pos += len;
        rest[..len].trim().to_string()
    }

    /// An unterminated quote reads as a plain word starting at the `"`
    fn quoted(&mut self) -> Option<String> {
        let body = self.rest().strip_prefix('"')?;
        let mut out = String::new();
        let mut chars = body.char_indices();

        while let Some((pos, c)) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some((_, escaped)) => out.push(escaped),
                    None => out.push('\\'),
                },
                '"' => {
                    self.pos += 1 + pos + 1;
                    return Some(out);
                }
                _ => out.push(c),
            }
        }
        None
    }
}
