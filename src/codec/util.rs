use crate::error::{DecoderError, Result};

const DIGITS: &[u8] = b"0123456789abcdef";

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Splits `text` on every line boundary, treating `\r\n` as one break.
///
/// A trailing break does not start an extra empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((idx, ch)) = chars.next() {
        if !is_line_break(ch) {
            continue;
        }
        lines.push(&text[start..idx]);
        let mut end = idx + ch.len_utf8();
        if ch == '\r' {
            if let Some(&(_, '\n')) = chars.peek() {
                chars.next();
                end += 1;
            }
        }
        start = end;
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Applies `convert` to every line of `text` and joins the results with `\n`.
///
/// The first failing line aborts the whole run; its 1-based number is carried
/// in the returned `InvalidFormat`.
pub fn run_lines<F>(codec: &str, text: &str, convert: F) -> Result<String>
where
    F: Fn(&str) -> std::result::Result<String, String>,
{
    let mut out = Vec::new();
    for (idx, line) in split_lines(text).into_iter().enumerate() {
        let converted =
            convert(line).map_err(|message| DecoderError::invalid_line(codec, idx + 1, message))?;
        out.push(converted);
    }
    Ok(out.join("\n"))
}

/// Signed integer of any size, kept as digit values in its parse radix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Integer {
    pub negative: bool,
    digits: Vec<u8>,
    radix: u32,
}

impl Integer {
    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    /// Magnitude rendered in `radix` with lowercase digits, without sign or prefix.
    pub fn magnitude_in(&self, radix: u32) -> String {
        if self.is_zero() {
            return "0".to_string();
        }
        convert_digits(&self.digits, self.radix, radix)
            .iter()
            .map(|&d| DIGITS[d as usize] as char)
            .collect()
    }
}

/// Re-expresses big-endian `digits` from one radix in another, big-endian.
fn convert_digits(digits: &[u8], from: u32, to: u32) -> Vec<u8> {
    let mut num = digits.iter().fold(Vec::new(), |mut acc: Vec<u8>, &d| {
        let mut carry = d as u32;
        for digit in acc.iter_mut() {
            carry += (*digit as u32) * from;
            *digit = (carry % to) as u8;
            carry /= to;
        }
        while carry > 0 {
            acc.push((carry % to) as u8);
            carry /= to;
        }
        acc
    });
    num.reverse();
    num
}

/// Parses a signed integer of any length the way the plugins expect user
/// input: surrounding whitespace, one optional sign and single `_`
/// separators between digits are accepted. In radix 16 a `0x`/`0X`
/// prefix may follow the sign.
pub fn parse_int(input: &str, radix: u32) -> std::result::Result<Integer, String> {
    let trimmed = input.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits = if radix == 16 {
        match rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
            Some(after) => after.strip_prefix('_').unwrap_or(after),
            None => rest,
        }
    } else {
        rest
    };

    if digits.is_empty() {
        return Err(format!("invalid literal for integer: {:?}", input));
    }
    if digits.starts_with('_') || digits.ends_with('_') || digits.contains("__") {
        return Err(format!("misplaced '_' in {:?}", input));
    }

    let mut values = Vec::with_capacity(digits.len());
    for ch in digits.chars().filter(|&c| c != '_') {
        match ch.to_digit(radix) {
            Some(v) => values.push(v as u8),
            None => return Err(format!("invalid digit {:?} in {:?}", ch, input)),
        }
    }

    let leading_zeros = values.iter().take_while(|&&d| d == 0).count();
    values.drain(..leading_zeros);

    Ok(Integer {
        negative: negative && !values.is_empty(),
        digits: values,
        radix,
    })
}
