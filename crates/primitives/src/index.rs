use crate::error::{AdminError, Result};
use crate::value::Value;

/// Largest index a sequence can be written at; lengths stay within `u32`.
pub const MAX_INDEX: usize = u32::MAX as usize - 1;

/// Parses the leading base-10 integer of `s`.
///
/// Leading whitespace and a single sign are accepted; parsing stops at the
/// first non-digit. Returns `None` when no digit is found, or the digits
/// overflow `i64`.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
	let s = s.trim_start();
	let (negative, rest) = match s.as_bytes().first() {
		Some(b'-') => (true, &s[1..]),
		Some(b'+') => (false, &s[1..]),
		_ => (false, s),
	};
	let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
	if digits == 0 {
		return None;
	}
	let magnitude: i64 = rest[..digits].parse().ok()?;
	Some(if negative { -magnitude } else { magnitude })
}

/// Coerces a key into a sequence index.
///
/// Integers are used as is, strings go through [`parse_int_prefix`]. Negative
/// numbers and keys with no numeric reading fail with
/// [`AdminError::InvalidIndex`].
pub fn coerce_index(key: &Value) -> Result<usize> {
	let invalid = || AdminError::InvalidIndex { key: key.clone() };
	let n = match key {
		Value::Int(n) => *n,
		Value::Str(s) => parse_int_prefix(s).ok_or_else(invalid)?,
		_ => return Err(invalid()),
	};
	usize::try_from(n).map_err(|_| invalid())
}

/// Coerces a key for a write that may grow the sequence.
///
/// Same as [`coerce_index`], but also rejects indices above [`MAX_INDEX`] so a
/// write can never request an unbounded allocation.
pub fn coerce_write_index(key: &Value) -> Result<usize> {
	let index = coerce_index(key)?;
	if index > MAX_INDEX {
		return Err(AdminError::InvalidIndex { key: key.clone() });
	}
	Ok(index)
}

/// Reads a key as an index for lookups.
///
/// Unlike [`coerce_index`] the whole string must be numeric (surrounding
/// whitespace aside): `"2"` is index 2, `"2px"` is no index at all.
pub fn lookup_index(key: &Value) -> Option<usize> {
	let n = match key {
		Value::Int(n) => *n,
		Value::Str(s) => s.trim().parse::<i64>().ok()?,
		_ => return None,
	};
	usize::try_from(n).ok()
}
