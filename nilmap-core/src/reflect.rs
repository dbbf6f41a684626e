//! Reflection traits and their implementations for std types

use crate::error::{MapError, Result};
use crate::kind::Kind;
use crate::shape::{Shape, TypeDesc};
use crate::value::{Map, Value};
use num_complex::{Complex32, Complex64};

/// A type the engine can read from and rebuild.
///
/// Implemented for text, booleans, every integer and float width, both
/// complex widths, [`Map`], [`Value`] (the open type), `Option<T>`, `Vec<T>`,
/// `Box<T>`, and every `#[derive(Record)]` struct.
pub trait Reflect: Sized {
    /// Declared type
    fn type_desc() -> TypeDesc;

    /// Snapshot of the current value
    fn to_value(&self) -> Value;

    /// Rebuild from a value of the declared type
    fn from_value(value: Value) -> Result<Self>;
}

/// A record type with a cached shape
pub trait Record: Reflect {
    /// Field layout, built once per type
    fn shape() -> &'static Shape;
}

macro_rules! scalar_reflect {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                fn type_desc() -> TypeDesc {
                    TypeDesc::Scalar(Kind::$kind)
                }

                fn to_value(&self) -> Value {
                    Value::$kind(self.clone())
                }

                fn from_value(value: Value) -> Result<Self> {
                    match value.into_unwrapped() {
                        Some(Value::$kind(v)) => Ok(v),
                        Some(other) => Err(MapError::Incompatible {
                            expected: Kind::$kind,
                            found: other.kind(),
                        }),
                        None => Err(MapError::AbsentOptional),
                    }
                }
            }
        )*
    };
}

scalar_reflect! {
    String => Text,
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    Complex32 => C64,
    Complex64 => C128,
    Map => Map,
}

impl Reflect for Value {
    fn type_desc() -> TypeDesc {
        TypeDesc::Dynamic
    }

    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: Value) -> Result<Self> {
        Ok(value)
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Optional(T::type_desc)
    }

    fn to_value(&self) -> Value {
        Value::Optional(self.as_ref().map(|v| Box::new(v.to_value())))
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Optional(None) => Ok(None),
            Value::Optional(Some(inner)) => T::from_value(*inner).map(Some),
            other => T::from_value(other).map(Some),
        }
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Sequence(T::type_desc)
    }

    fn to_value(&self) -> Value {
        Value::Seq(self.iter().map(Reflect::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value.into_unwrapped() {
            Some(Value::Seq(items)) => items.into_iter().map(T::from_value).collect(),
            Some(other) => Err(MapError::Incompatible {
                expected: Kind::Sequence,
                found: other.kind(),
            }),
            None => Err(MapError::AbsentOptional),
        }
    }
}

impl<T: Reflect> Reflect for Box<T> {
    fn type_desc() -> TypeDesc {
        T::type_desc()
    }

    fn to_value(&self) -> Value {
        (**self).to_value()
    }

    fn from_value(value: Value) -> Result<Self> {
        T::from_value(value).map(Box::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_option_descriptor() {
        let desc = <Option<i8>>::type_desc();
        assert!(desc.is_optional());
        assert_eq!(desc.kind(), Kind::I8);
    }

    #[test]
    fn test_option_round_trip() {
        let some = Some("Value".to_string());
        assert_eq!(
            some.to_value(),
            Value::present(Value::Text("Value".into()))
        );
        assert_eq!(<Option<String>>::from_value(some.to_value()).unwrap(), some);
        assert_eq!(<Option<String>>::from_value(Value::nil()).unwrap(), None);
    }

    #[test]
    fn test_option_accepts_bare_value() {
        assert_eq!(<Option<u16>>::from_value(Value::U16(3)).unwrap(), Some(3));
    }

    #[test]
    fn test_scalar_rejects_other_kind() {
        let err = i32::from_value(Value::I64(1)).unwrap_err();
        assert!(matches!(
            err,
            MapError::Incompatible {
                expected: Kind::I32,
                found: Kind::I64
            }
        ));
        assert!(matches!(
            String::from_value(Value::nil()),
            Err(MapError::AbsentOptional)
        ));
    }

    #[test]
    fn test_vec_descriptor_and_values() {
        let desc = <Vec<Option<f64>>>::type_desc();
        assert_eq!(desc.kind(), Kind::Sequence);
        assert!(desc.element().unwrap().is_optional());

        let items = vec![Some(1.5), None];
        let value = items.to_value();
        assert_eq!(<Vec<Option<f64>>>::from_value(value).unwrap(), items);
    }

    #[test]
    fn test_box_is_transparent() {
        let boxed = Box::new(Complex64::new(1.0, -2.0));
        assert_eq!(<Box<Complex64>>::type_desc().kind(), Kind::C128);
        assert_eq!(boxed.to_value(), Value::C128(Complex64::new(1.0, -2.0)));
    }

    #[test]
    fn test_dynamic_value_is_identity() {
        let value = Value::Seq(vec![Value::Bool(true), Value::nil()]);
        assert!(matches!(Value::type_desc(), TypeDesc::Dynamic));
        assert_eq!(Value::from_value(value.to_value()).unwrap(), value);
    }

    proptest! {
        #[test]
        fn integer_snapshot_property(value in any::<i64>()) {
            prop_assert_eq!(value.to_value(), Value::I64(value));
            prop_assert_eq!(i64::from_value(Value::I64(value)).unwrap(), value);
        }

        #[test]
        fn text_sequence_property(items in prop::collection::vec(".*", 0..16)) {
            let rebuilt = <Vec<String>>::from_value(items.to_value()).unwrap();
            prop_assert_eq!(rebuilt, items);
        }
    }
}
