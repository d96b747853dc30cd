//! Seed argument handling.
//!
//! A seed is read the way C's `strtoul(arg, &end, 0)` reads it: optional
//! leading whitespace and sign, then a hexadecimal (`0x`), octal (leading
//! `0`) or decimal number that must use up the whole argument. Rejected
//! arguments are echoed back as C string literals so that control bytes stay
//! visible.

use crate::error::SeedError;

pub fn parse_seed(arg: &[u8]) -> Result<u32, SeedError> {
    let value = parse_unsigned(arg).ok_or_else(|| SeedError::Invalid {
        quoted: quote(arg),
    })?;
    u32::try_from(value).map_err(|_| SeedError::OutOfRange(value))
}

/// `None` if no digits were found or anything follows them. Overflow
/// saturates to `u64::MAX`; a minus sign negates modulo 2^64.
fn parse_unsigned(arg: &[u8]) -> Option<u64> {
    let mut rest = arg;
    while let [first, tail @ ..] = rest {
        if !is_c_space(*first) {
            break;
        }
        rest = tail;
    }

    let negative = match rest.first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let radix = match rest {
        [b'0', b'x' | b'X', next, ..] if next.is_ascii_hexdigit() => {
            rest = &rest[2..];
            16
        }
        [b'0', ..] => 8,
        _ => 10,
    };

    let digits = rest
        .iter()
        .take_while(|b| char::from(**b).is_digit(radix))
        .count();
    if digits == 0 || digits != rest.len() {
        return None;
    }

    let mut value: u64 = 0;
    let mut overflow = false;
    for b in rest {
        let digit = u64::from(char::from(*b).to_digit(radix)?);
        match value
            .checked_mul(u64::from(radix))
            .and_then(|v| v.checked_add(digit))
        {
            Some(v) => value = v,
            None => overflow = true,
        }
    }

    Some(match (overflow, negative) {
        (true, _) => u64::MAX,
        (false, true) => value.wrapping_neg(),
        (false, false) => value,
    })
}

fn is_c_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

/// Renders `bytes` as a C string literal, quotes included.
pub fn quote(bytes: &[u8]) -> String {
    let mut out = String::from("\"");
    let mut prev = 0u8;
    for (idx, &b) in bytes.iter().enumerate() {
        let next = bytes.get(idx + 1).copied().unwrap_or(0);
        // Keep `??x` from reading as a trigraph.
        if b == b'?' && prev == b'?' && is_trigraph_tail(next) {
            out.push_str("\\?");
            continue;
        }
        quote_byte(&mut out, b, next);
        prev = b;
    }
    out.push('"');
    out
}

fn is_trigraph_tail(b: u8) -> bool {
    matches!(
        b,
        b'<' | b'>' | b'(' | b')' | b'=' | b'/' | b'\'' | b'!' | b'-'
    )
}

fn quote_byte(out: &mut String, b: u8, next: u8) {
    if b == b'"' || b == b'\\' {
        out.push('\\');
    }
    if (0x20..0x7f).contains(&b) {
        out.push(char::from(b));
        return;
    }

    let named = match b {
        0x07 => Some("\\a"),
        0x08 => Some("\\b"),
        0x0c => Some("\\f"),
        b'\n' => Some("\\n"),
        b'\r' => Some("\\r"),
        b'\t' => Some("\\t"),
        0x0b => Some("\\v"),
        _ => None,
    };
    if let Some(escape) = named {
        out.push_str(escape);
        return;
    }

    if b == 0 {
        // A following octal digit would otherwise extend the escape.
        if (b'0'..b'8').contains(&next) {
            out.push_str("\\000");
        } else {
            out.push_str("\\0");
        }
        return;
    }

    // `\x` escapes swallow any hex digits that follow; octal ones stop at three.
    if next.is_ascii_hexdigit() {
        out.push_str(&format!("\\{:03o}", b));
    } else {
        out.push_str(&format!("\\x{:02X}", b));
    }
}
