//! Line scanner for directive files

use super::Directive;

/// Split one trimmed, non-comment line into option and parameter
pub(super) fn parse_line(line: &str, number: usize) -> Directive {
    let dashed = line.starts_with('-');
    let is_separator = |c: char| c.is_whitespace() || (!dashed && (c == '=' || c == ':'));

    let Some(split) = line.find(is_separator) else {
        return Directive {
            option: line.to_string(),
            parameter: None,
            line: number,
        };
    };

    let option = line[..split].to_string();
    let rest = line[split..].trim_start_matches(is_separator);

    let parameter = if rest.is_empty() {
        None
    } else if let Some(quoted) = rest.strip_prefix('"') {
        Some(unslash_quote(quoted).0)
    } else {
        // Anything after the first word, comments included, is dropped
        let word = rest.split(char::is_whitespace).next().unwrap_or(rest);
        Some(word.to_string())
    };

    Directive {
        option,
        parameter,
        line: number,
    }
}

/// Read a quoted string whose opening `"` has been consumed.
///
/// Returns the unescaped text and whatever follows the closing quote. An
/// unterminated string runs to the end of the input.
pub fn unslash_quote(input: &str) -> (String, &str) {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices();

    while let Some((pos, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, 't')) => out.push('\t'),
                Some((_, 'n')) => out.push('\n'),
                Some((_, 'r')) => out.push('\r'),
                Some((_, 'v')) => out.push('\u{0B}'),
                Some((_, other)) => out.push(other),
                None => {}
            },
            '"' => return (out, &input[pos + 1..]),
            _ => out.push(c),
        }
    }

    (out, "")
}
