//! Convert a resolved value into the declared field's type.
//!
//! Dispatch happens on the concrete type behind the field's `dyn Any` handle.
//! Supported: `String` (verbatim), `i64`, `i32`, `isize` (base-10, optional
//! sign), and `bool`. Anything else is a mistake in the record's declaration
//! and reported as [`EnvsecError::UnsupportedType`].

use std::any::Any;

use crate::error::EnvsecError;

/// Parse `value` into the type behind `slot` and store it.
///
/// `slot` is left untouched when parsing fails.
pub fn coerce(
    slot: &mut dyn Any,
    type_name: &'static str,
    value: &str,
    key: &str,
) -> Result<(), EnvsecError> {
    if let Some(s) = slot.downcast_mut::<String>() {
        *s = value.to_string();
    } else if let Some(i) = slot.downcast_mut::<i64>() {
        *i = parse_int(value, key)?;
    } else if let Some(i) = slot.downcast_mut::<i32>() {
        *i = parse_int(value, key)?;
    } else if let Some(i) = slot.downcast_mut::<isize>() {
        *i = parse_int(value, key)?;
    } else if let Some(b) = slot.downcast_mut::<bool>() {
        *b = parse_bool(value).ok_or_else(|| EnvsecError::InvalidBoolean {
            key: key.to_string(),
        })?;
    } else {
        return Err(EnvsecError::UnsupportedType {
            key: key.to_string(),
            type_name,
        });
    }
    Ok(())
}

fn parse_int<T: std::str::FromStr<Err = std::num::ParseIntError>>(
    value: &str,
    key: &str,
) -> Result<T, EnvsecError> {
    value.parse::<T>().map_err(|e| EnvsecError::InvalidInteger {
        key: key.to_string(),
        source: e,
    })
}

/// `1`, `t`, `true` and `0`, `f`, `false`, ignoring ASCII case.
pub fn parse_bool(value: &str) -> Option<bool> {
    const TRUTHY: [&str; 3] = ["1", "t", "true"];
    const FALSY: [&str; 3] = ["0", "f", "false"];

    if TRUTHY.iter().any(|t| value.eq_ignore_ascii_case(t)) {
        Some(true)
    } else if FALSY.iter().any(|f| value.eq_ignore_ascii_case(f)) {
        Some(false)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coerce_into<T: Any>(slot: &mut T, value: &str) -> Result<(), EnvsecError> {
        coerce(slot, std::any::type_name::<T>(), value, "KEY")
    }

    #[test]
    fn string_is_verbatim() {
        let mut s = String::from("old");
        coerce_into(&mut s, "  keeps spaces ").unwrap();
        assert_eq!(s, "  keeps spaces ");
    }

    #[test]
    fn integers() {
        let mut i = 0i64;
        coerce_into(&mut i, "999999999").unwrap();
        assert_eq!(i, 999_999_999);

        coerce_into(&mut i, "-42").unwrap();
        assert_eq!(i, -42);

        let mut small = 0i32;
        coerce_into(&mut small, "+512").unwrap();
        assert_eq!(small, 512);

        let mut native = 0isize;
        coerce_into(&mut native, "7").unwrap();
        assert_eq!(native, 7);
    }

    #[test]
    fn invalid_integer_leaves_slot() {
        let mut i = 5i64;
        let err = coerce_into(&mut i, "notanumber").unwrap_err();
        assert!(matches!(err, EnvsecError::InvalidInteger { ref key, .. } if key == "KEY"));
        assert_eq!(i, 5);
    }

    #[test]
    fn out_of_range_integer_is_invalid() {
        let mut i = 0i32;
        let err = coerce_into(&mut i, "99999999999").unwrap_err();
        assert!(matches!(err, EnvsecError::InvalidInteger { .. }));
    }

    #[test]
    fn booleans() {
        for (raw, want) in [
            ("1", true),
            ("t", true),
            ("T", true),
            ("true", true),
            ("TRUE", true),
            ("True", true),
            ("0", false),
            ("f", false),
            ("F", false),
            ("false", false),
            ("FALSE", false),
        ] {
            let mut b = !want;
            coerce_into(&mut b, raw).unwrap();
            assert_eq!(b, want, "parsing {raw:?}");
        }
    }

    #[test]
    fn invalid_boolean() {
        let mut b = false;
        let err = coerce_into(&mut b, "invalid").unwrap_err();
        assert!(matches!(err, EnvsecError::InvalidBoolean { .. }));
        assert!(parse_bool("yes").is_none());
        assert!(parse_bool("").is_none());
    }

    #[test]
    fn unsupported_type() {
        let mut f = 0.0f64;
        let err = coerce_into(&mut f, "1.5").unwrap_err();
        match err {
            EnvsecError::UnsupportedType { key, type_name } => {
                assert_eq!(key, "KEY");
                assert_eq!(type_name, "f64");
            }
            other => panic!("expected UnsupportedType, got {other:?}"),
        }
    }
}
