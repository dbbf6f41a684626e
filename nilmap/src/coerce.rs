//! Scalar assignment and coercion between kinds of the same class

use nilmap_core::{Complex32, Complex64, Kind, MapError, Result, TypeDesc, Value};
use tracing::trace;

/// Assign a source scalar to a destination of type `target`.
///
/// Identical kinds are copied directly, other kinds go through [`coerce`].
/// The result is wrapped in a fresh holder when `target` is optional. An
/// absent source yields an absent holder for an optional target and fails
/// for a concrete one.
pub fn assign_scalar(value: &Value, target: TypeDesc) -> Result<Value> {
    let inner = match value.innermost() {
        Some(inner) => inner,
        None if target.is_optional() => return Ok(Value::nil()),
        None => return Err(MapError::AbsentOptional),
    };

    let kind = target.kind();
    let converted = if inner.kind() == kind {
        inner.clone()
    } else {
        coerce(inner, kind)?
    };

    if target.is_optional() {
        Ok(Value::present(converted))
    } else {
        Ok(converted)
    }
}

/// Convert `value` (holders dereferenced) into `kind`.
///
/// Integers truncate in two's complement, floats and complex parts are cast
/// without overflow checks, maps must already be maps.
pub fn coerce(value: &Value, kind: Kind) -> Result<Value> {
    let value = value.innermost().ok_or(MapError::AbsentOptional)?;

    let converted = match kind {
        Kind::Text => match value {
            Value::Text(text) => Value::Text(text.clone()),
            other => return Err(mismatch(kind, other)),
        },
        Kind::Bool => match value {
            Value::Bool(flag) => Value::Bool(*flag),
            other => return Err(mismatch(kind, other)),
        },
        Kind::F32 => Value::F32(read_float(value, kind)? as f32),
        Kind::F64 => Value::F64(read_float(value, kind)?),
        Kind::I8 => Value::I8(read_int(value, kind)? as i8),
        Kind::I16 => Value::I16(read_int(value, kind)? as i16),
        Kind::I32 => Value::I32(read_int(value, kind)? as i32),
        Kind::I64 => Value::I64(read_int(value, kind)? as i64),
        Kind::Isize => Value::Isize(read_int(value, kind)? as isize),
        Kind::U8 => Value::U8(read_int(value, kind)? as u8),
        Kind::U16 => Value::U16(read_int(value, kind)? as u16),
        Kind::U32 => Value::U32(read_int(value, kind)? as u32),
        Kind::U64 => Value::U64(read_int(value, kind)? as u64),
        Kind::Usize => Value::Usize(read_int(value, kind)? as usize),
        Kind::C64 => {
            let c = read_complex(value, kind)?;
            Value::C64(Complex32::new(c.re as f32, c.im as f32))
        }
        Kind::C128 => Value::C128(read_complex(value, kind)?),
        Kind::Map => match value {
            Value::Map(map) => Value::Map(map.clone()),
            other => {
                return Err(MapError::NotAMap {
                    found: other.kind(),
                })
            }
        },
        Kind::Dynamic => value.clone(),
        Kind::Record | Kind::Sequence => {
            if value.kind() != kind {
                return Err(mismatch(kind, value));
            }
            value.clone()
        }
    };

    trace!(from = %value.kind(), to = %kind, "coerced scalar");
    Ok(converted)
}

fn mismatch(expected: Kind, found: &Value) -> MapError {
    MapError::Incompatible {
        expected,
        found: found.kind(),
    }
}

fn read_int(value: &Value, expected: Kind) -> Result<i128> {
    let wide = match value {
        Value::I8(v) => i128::from(*v),
        Value::I16(v) => i128::from(*v),
        Value::I32(v) => i128::from(*v),
        Value::I64(v) => i128::from(*v),
        Value::Isize(v) => *v as i128,
        Value::U8(v) => i128::from(*v),
        Value::U16(v) => i128::from(*v),
        Value::U32(v) => i128::from(*v),
        Value::U64(v) => i128::from(*v),
        Value::Usize(v) => *v as i128,
        other => return Err(mismatch(expected, other)),
    };
    Ok(wide)
}

fn read_float(value: &Value, expected: Kind) -> Result<f64> {
    match value {
        Value::F32(v) => Ok(f64::from(*v)),
        Value::F64(v) => Ok(*v),
        other => Err(mismatch(expected, other)),
    }
}

fn read_complex(value: &Value, expected: Kind) -> Result<Complex64> {
    match value {
        Value::C64(c) => Ok(Complex64::new(f64::from(c.re), f64::from(c.im))),
        Value::C128(c) => Ok(*c),
        other => Err(mismatch(expected, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nilmap_core::{Map, Reflect};
    use proptest::prelude::*;

    #[test]
    fn test_same_kind_copies_directly() {
        let value = Value::I8(8);
        assert_eq!(assign_scalar(&value, i8::type_desc()).unwrap(), Value::I8(8));
    }

    #[test]
    fn test_wraps_for_optional_target() {
        let value = Value::I8(8);
        assert_eq!(
            assign_scalar(&value, <Option<i8>>::type_desc()).unwrap(),
            Value::present(Value::I8(8))
        );
    }

    #[test]
    fn test_unwraps_present_source() {
        let value = Value::present(Value::Text("Value".into()));
        assert_eq!(
            assign_scalar(&value, String::type_desc()).unwrap(),
            Value::Text("Value".into())
        );
    }

    #[test]
    fn test_absent_source() {
        assert!(assign_scalar(&Value::nil(), <Option<u32>>::type_desc())
            .unwrap()
            .is_absent());
        assert!(matches!(
            assign_scalar(&Value::nil(), u32::type_desc()),
            Err(MapError::AbsentOptional)
        ));
    }

    #[test]
    fn test_integer_truncation() {
        assert_eq!(coerce(&Value::I32(300), Kind::U8).unwrap(), Value::U8(44));
        assert_eq!(coerce(&Value::I64(-1), Kind::U16).unwrap(), Value::U16(u16::MAX));
        assert_eq!(coerce(&Value::U64(u64::MAX), Kind::I64).unwrap(), Value::I64(-1));
        assert_eq!(coerce(&Value::I8(-8), Kind::Isize).unwrap(), Value::Isize(-8));
    }

    #[test]
    fn test_float_and_complex_widths() {
        assert_eq!(coerce(&Value::F32(1.5), Kind::F64).unwrap(), Value::F64(1.5));
        assert_eq!(coerce(&Value::F64(2.5), Kind::F32).unwrap(), Value::F32(2.5));
        assert_eq!(
            coerce(&Value::C128(Complex64::new(2.0, -0.5)), Kind::C64).unwrap(),
            Value::C64(Complex32::new(2.0, -0.5))
        );
    }

    #[test]
    fn test_map_requires_map() {
        let mut map = Map::new();
        map.insert("test".into(), Value::Text("test".into()));
        assert_eq!(
            coerce(&Value::Map(map.clone()), Kind::Map).unwrap(),
            Value::Map(map)
        );
        assert!(matches!(
            coerce(&Value::Text("x".into()), Kind::Map),
            Err(MapError::NotAMap { found: Kind::Text })
        ));
    }

    #[test]
    fn test_cross_class_fails() {
        assert!(matches!(
            coerce(&Value::F64(1.0), Kind::I32),
            Err(MapError::Incompatible {
                expected: Kind::I32,
                found: Kind::F64
            })
        ));
        assert!(coerce(&Value::Bool(true), Kind::Text).is_err());
        assert!(coerce(&Value::I8(1), Kind::Record).is_err());
    }

    proptest! {
        #[test]
        fn signed_truncation_matches_as_casts(v in any::<i64>()) {
            prop_assert_eq!(coerce(&Value::I64(v), Kind::I8).unwrap(), Value::I8(v as i8));
            prop_assert_eq!(coerce(&Value::I64(v), Kind::I16).unwrap(), Value::I16(v as i16));
            prop_assert_eq!(coerce(&Value::I64(v), Kind::U32).unwrap(), Value::U32(v as u32));
            prop_assert_eq!(coerce(&Value::I64(v), Kind::U64).unwrap(), Value::U64(v as u64));
        }

        #[test]
        fn unsigned_truncation_matches_as_casts(v in any::<u64>()) {
            prop_assert_eq!(coerce(&Value::U64(v), Kind::U8).unwrap(), Value::U8(v as u8));
            prop_assert_eq!(coerce(&Value::U64(v), Kind::I32).unwrap(), Value::I32(v as i32));
            prop_assert_eq!(coerce(&Value::U64(v), Kind::Usize).unwrap(), Value::Usize(v as usize));
        }
    }
}
