// File: src/coerce.rs
// Purpose: Convert a single string into a value of a target type

use crate::error::{CoerceError, ParseError, UnsupportedType};
use crate::kind::{Kind, TypeInfo};
use crate::value::Value;
use std::borrow::Cow;
use std::num::IntErrorKind;

/// Converts `raw` into a value shaped like `target`.
///
/// Optional targets coerce the element type and wrap the result. Integers
/// accept decimal and `0x`/`0o`/`0b` (or bare leading `0` for octal) literals
/// with optional `_` digit separators, and are range-checked against the
/// destination width. Floats are decimal only. Strings pass through
/// unchanged. Records and containers are rejected with
/// [`UnsupportedType`].
///
/// ```
/// use rusty_query::{coerce, Kind, Reflect, Value};
///
/// assert_eq!(coerce("0x1F", &i32::type_info()).unwrap(), Value::I32(31));
/// assert_eq!(
///     coerce("2.4", &Option::<f64>::type_info()).unwrap(),
///     Value::Optional(Box::new(Value::F64(2.4)))
/// );
/// assert!(coerce("300", &u8::type_info()).is_err());
/// ```
pub fn coerce(raw: &str, target: &TypeInfo) -> Result<Value, CoerceError> {
    let value = match target.kind {
        Kind::Optional => {
            let elem = target
                .elem
                .as_deref()
                .ok_or_else(|| UnsupportedType::new(target.clone()))?;
            Value::Optional(Box::new(coerce(raw, elem)?))
        }
        Kind::Bool => Value::Bool(parse_bool(raw)?),
        Kind::Isize => Value::Isize(parse_int(raw, Kind::Isize)? as isize),
        Kind::I8 => Value::I8(parse_int(raw, Kind::I8)? as i8),
        Kind::I16 => Value::I16(parse_int(raw, Kind::I16)? as i16),
        Kind::I32 => Value::I32(parse_int(raw, Kind::I32)? as i32),
        Kind::I64 => Value::I64(parse_int(raw, Kind::I64)?),
        Kind::Usize => Value::Usize(parse_uint(raw, Kind::Usize)? as usize),
        Kind::U8 => Value::U8(parse_uint(raw, Kind::U8)? as u8),
        Kind::U16 => Value::U16(parse_uint(raw, Kind::U16)? as u16),
        Kind::U32 => Value::U32(parse_uint(raw, Kind::U32)? as u32),
        Kind::U64 => Value::U64(parse_uint(raw, Kind::U64)?),
        Kind::F32 => Value::F32(parse_f32(raw)?),
        Kind::F64 => Value::F64(parse_f64(raw)?),
        Kind::Str => Value::Str(raw.to_string()),
        Kind::Record | Kind::Sequence | Kind::Map => {
            return Err(UnsupportedType::new(target.clone()).into())
        }
    };
    Ok(value)
}

/// Accepts `true`/`false`/`t`/`f`/`1`/`0`, ignoring ASCII case
pub fn parse_bool(raw: &str) -> Result<bool, ParseError> {
    const TRUTHY: [&str; 3] = ["true", "t", "1"];
    const FALSY: [&str; 3] = ["false", "f", "0"];

    if TRUTHY.iter().any(|lit| raw.eq_ignore_ascii_case(lit)) {
        Ok(true)
    } else if FALSY.iter().any(|lit| raw.eq_ignore_ascii_case(lit)) {
        Ok(false)
    } else {
        Err(ParseError::syntax(raw, Kind::Bool))
    }
}

/// Parses a signed integer that must fit in `kind`'s bit width
pub fn parse_int(raw: &str, kind: Kind) -> Result<i64, ParseError> {
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'+') => (false, &raw[1..]),
        Some(b'-') => (true, &raw[1..]),
        _ => (false, raw),
    };
    let magnitude = parse_magnitude(raw, digits, kind)?;

    let bits = kind.bits().unwrap_or(64);
    let limit = 1u64 << (bits - 1);
    if (!negative && magnitude >= limit) || (negative && magnitude > limit) {
        return Err(ParseError::range(raw, kind));
    }

    // magnitude == 2^63 wraps to i64::MIN, which is exactly the negated value
    let value = magnitude as i64;
    Ok(if negative { value.wrapping_neg() } else { value })
}

/// Parses an unsigned integer that must fit in `kind`'s bit width.
/// Signs are not accepted.
pub fn parse_uint(raw: &str, kind: Kind) -> Result<u64, ParseError> {
    let magnitude = parse_magnitude(raw, raw, kind)?;
    let bits = kind.bits().unwrap_or(64);
    if bits < 64 && magnitude >> bits != 0 {
        return Err(ParseError::range(raw, kind));
    }
    Ok(magnitude)
}

/// Unsigned digits with base auto-detection.
fn parse_magnitude(raw: &str, digits: &str, kind: Kind) -> Result<u64, ParseError> {
    let bytes = digits.as_bytes();
    let (radix, body) = match bytes {
        [b'0', b'x' | b'X', ..] => (16, &digits[2..]),
        [b'0', b'o' | b'O', ..] => (8, &digits[2..]),
        [b'0', b'b' | b'B', ..] => (2, &digits[2..]),
        [b'0', _, ..] => (8, &digits[1..]),
        _ => (10, digits),
    };

    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return Err(ParseError::syntax(raw, kind));
    }

    let cleaned;
    let body = if body.contains('_') {
        if !underscores_ok(digits) {
            return Err(ParseError::syntax(raw, kind));
        }
        cleaned = body.replace('_', "");
        cleaned.as_str()
    } else {
        body
    };

    u64::from_str_radix(body, radix).map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow => ParseError::range(raw, kind),
        _ => ParseError::syntax(raw, kind),
    })
}

/// `_` may only separate two digits, or a base prefix from a digit.
fn underscores_ok(literal: &str) -> bool {
    #[derive(PartialEq)]
    enum Last {
        Start,
        Digit,
        Underscore,
        Other,
    }

    let literal = literal.strip_prefix(['+', '-']).unwrap_or(literal);
    let bytes = literal.as_bytes();

    let (mut last, hex, start) = match bytes {
        [b'0', b'x' | b'X', ..] => (Last::Digit, true, 2),
        [b'0', b'o' | b'O' | b'b' | b'B', ..] => (Last::Digit, false, 2),
        _ => (Last::Start, false, 0),
    };

    for &b in &bytes[start..] {
        if b.is_ascii_digit() || (hex && b.is_ascii_hexdigit()) {
            last = Last::Digit;
        } else if b == b'_' {
            if last != Last::Digit {
                return false;
            }
            last = Last::Underscore;
        } else if last == Last::Underscore {
            return false;
        } else {
            last = Last::Other;
        }
    }

    last != Last::Underscore
}

fn spells_infinity(raw: &str) -> bool {
    let unsigned = raw.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Drops digit separators once they are known to sit between digits
fn strip_float_separators(raw: &str, kind: Kind) -> Result<Cow<'_, str>, ParseError> {
    if !raw.contains('_') {
        return Ok(Cow::Borrowed(raw));
    }
    if !underscores_ok(raw) {
        return Err(ParseError::syntax(raw, kind));
    }
    Ok(Cow::Owned(raw.replace('_', "")))
}

/// Parses a float, rounding to 32-bit precision
pub fn parse_f32(raw: &str) -> Result<f32, ParseError> {
    let value: f32 = strip_float_separators(raw, Kind::F32)?
        .parse()
        .map_err(|_| ParseError::syntax(raw, Kind::F32))?;
    if value.is_infinite() && !spells_infinity(raw) {
        return Err(ParseError::range(raw, Kind::F32));
    }
    Ok(value)
}

pub fn parse_f64(raw: &str) -> Result<f64, ParseError> {
    let value: f64 = strip_float_separators(raw, Kind::F64)?
        .parse()
        .map_err(|_| ParseError::syntax(raw, Kind::F64))?;
    if value.is_infinite() && !spells_infinity(raw) {
        return Err(ParseError::range(raw, Kind::F64));
    }
    Ok(value)
}
