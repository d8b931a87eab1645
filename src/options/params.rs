//! Argument parsers shared by option handlers
//!
//! Each parser takes the option name so failures can name it in
//! [`PlanError::BadArgument`].

use std::time::Duration;

use crate::errors::{PlanError, Result};
use crate::operation::{Delegation, FtpMethod, Resume};

fn bad(option: &str, value: &str, reason: &str) -> PlanError {
    PlanError::BadArgument {
        option: option.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Seconds, fractions allowed (`2.5`), never negative
pub fn parse_secs(option: &str, value: &str) -> Result<Duration> {
    let secs: f64 = value
        .trim()
        .parse()
        .map_err(|_| bad(option, value, "expected a number of seconds"))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(bad(option, value, "expected a non-negative number of seconds"));
    }
    Duration::try_from_secs_f64(secs).map_err(|_| bad(option, value, "time value is too large"))
}

/// Signed integer
pub fn parse_long(option: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| bad(option, value, "expected a whole number"))
}

/// Unsigned integer; a leading `-` is rejected rather than wrapped
pub fn parse_ulong(option: &str, value: &str) -> Result<u64> {
    let value_trimmed = value.trim();
    if value_trimmed.starts_with('-') {
        return Err(bad(option, value, "negative numbers are not allowed"));
    }
    value_trimmed
        .parse()
        .map_err(|_| bad(option, value, "expected a whole number"))
}

/// Byte count with an optional `K`, `M`, `G` or `B` suffix (binary units)
pub fn parse_size(option: &str, value: &str) -> Result<i64> {
    let trimmed = value.trim();
    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Err(bad(option, value, "expected a size"));
    }
    let number: i64 = trimmed[..digits]
        .parse()
        .map_err(|_| bad(option, value, "size is too large"))?;

    let multiplier: i64 = match trimmed[digits..].to_ascii_uppercase().as_str() {
        "" | "B" => 1,
        "K" => 1 << 10,
        "M" => 1 << 20,
        "G" => 1 << 30,
        _ => return Err(bad(option, value, "unsupported size unit, use G, M, K or B")),
    };

    number
        .checked_mul(multiplier)
        .ok_or_else(|| bad(option, value, "size is too large"))
}

/// Split `cert[:passphrase]`.
///
/// `\` escapes the next character, so `a\:b` names a file containing a
/// colon. `pkcs11:` URIs are kept whole. On Windows a drive letter colon
/// (`C:\path`) is part of the name.
pub fn parse_cert(value: &str) -> (String, Option<String>) {
    if value.starts_with("pkcs11:") || !value.contains([':', '\\']) {
        return (value.to_string(), None);
    }

    let mut name = String::with_capacity(value.len());
    let mut chars = value.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    name.push(escaped);
                }
            }
            ':' => {
                let drive_letter = cfg!(windows)
                    && name.len() == 1
                    && matches!(chars.peek(), Some((_, '\\' | '/')));
                if drive_letter {
                    name.push(c);
                    continue;
                }
                return (name, Some(value[pos + 1..].to_string()));
            }
            _ => name.push(c),
        }
    }

    (name, None)
}

/// `-` means "work it out from the local file"
pub fn parse_resume(option: &str, value: &str) -> Result<Resume> {
    if value.trim() == "-" {
        return Ok(Resume::Auto);
    }
    parse_ulong(option, value).map(Resume::Offset)
}

pub fn parse_ftp_method(option: &str, value: &str) -> Result<FtpMethod> {
    match value.to_ascii_lowercase().as_str() {
        "multicwd" => Ok(FtpMethod::MultiCwd),
        "nocwd" => Ok(FtpMethod::NoCwd),
        "singlecwd" => Ok(FtpMethod::SingleCwd),
        _ => Err(bad(option, value, "expected multicwd, nocwd or singlecwd")),
    }
}

pub fn parse_delegation(option: &str, value: &str) -> Result<Delegation> {
    match value.to_ascii_lowercase().as_str() {
        "none" => Ok(Delegation::None),
        "policy" => Ok(Delegation::Policy),
        "always" => Ok(Delegation::Always),
        _ => Err(bad(option, value, "expected none, policy or always")),
    }
}

/// Redirect limit: a count, or -1 for unlimited
pub fn parse_redirs(option: &str, value: &str) -> Result<i64> {
    let limit = parse_long(option, value)?;
    if limit < -1 {
        return Err(bad(option, value, "expected -1 or more"));
    }
    Ok(limit)
}

/// Byte range such as `0-499` or `500-`
pub fn parse_range(option: &str, value: &str) -> Result<String> {
    if !value.contains('-') {
        return Err(bad(option, value, "a range needs a '-'"));
    }
    Ok(value.to_string())
}
