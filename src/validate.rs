//! Register number validation.
//!
//! The form has always accepted any 12-character string that converts to a
//! number the way a browser's `Number(..)` does, which is looser than the
//! "12-digit" wording shown to the user. [`is_valid_identifier`] keeps that
//! behaviour; [`is_digit_identifier`] is the strict digits-only check.

/// Required length, in UTF-16 code units.
pub const IDENTIFIER_LEN: usize = 12;

/// Historical check: exactly 12 UTF-16 code units and not NaN after
/// string-to-number conversion.
pub fn is_valid_identifier(s: &str) -> bool {
    s.encode_utf16().count() == IDENTIFIER_LEN && converts_to_number(s)
}

/// Strict check: exactly 12 ASCII digits.
pub fn is_digit_identifier(s: &str) -> bool {
    s.len() == IDENTIFIER_LEN && s.bytes().all(|b| b.is_ascii_digit())
}

/// Returns whether `s` converts to a non-NaN number under the ECMAScript
/// `StringToNumber` grammar.
pub fn converts_to_number(s: &str) -> bool {
    let trimmed = s.trim_matches(is_js_whitespace);
    if trimmed.is_empty() {
        // empty string converts to 0
        return true;
    }
    is_non_decimal_integer(trimmed) || is_signed_decimal(trimmed)
}

// WhiteSpace and LineTerminator productions.
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0009}'
            | '\u{000A}'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{000D}'
            | '\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// `0x`, `0o` and `0b` literals. No sign is allowed in front of them.
fn is_non_decimal_integer(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() < 3 || bytes[0] != b'0' {
        return false;
    }
    let digits = &bytes[2..];
    match bytes[1] {
        b'x' | b'X' => digits.iter().all(u8::is_ascii_hexdigit),
        b'o' | b'O' => digits.iter().all(|b| (b'0'..=b'7').contains(b)),
        b'b' | b'B' => digits.iter().all(|&b| matches!(b, b'0' | b'1')),
        _ => false,
    }
}

/// Optional sign followed by `Infinity` or an unsigned decimal literal.
fn is_signed_decimal(s: &str) -> bool {
    let unsigned = s
        .strip_prefix('+')
        .or_else(|| s.strip_prefix('-'))
        .unwrap_or(s);
    unsigned == "Infinity" || is_unsigned_decimal(unsigned)
}

/// `digits [. digits?] [exp]` or `. digits [exp]`.
fn is_unsigned_decimal(s: &str) -> bool {
    let (mantissa, exponent) = match s.find(|c: char| c == 'e' || c == 'E') {
        Some(idx) => (&s[..idx], Some(&s[idx + 1..])),
        None => (s, None),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (mantissa, None),
    };

    let int_ok = int_part.bytes().all(|b| b.is_ascii_digit());
    let frac_ok = frac_part.map_or(true, |f| f.bytes().all(|b| b.is_ascii_digit()));
    let has_digits = !int_part.is_empty() || frac_part.is_some_and(|f| !f.is_empty());
    if !(int_ok && frac_ok && has_digits) {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp
                .strip_prefix('+')
                .or_else(|| exp.strip_prefix('-'))
                .unwrap_or(exp);
            !exp.is_empty() && exp.bytes().all(|b| b.is_ascii_digit())
        }
    }
}
