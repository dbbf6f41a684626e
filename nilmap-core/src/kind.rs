//! Elemental kind enumeration

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed classification of a field's underlying value shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    /// UTF-8 text
    Text,
    /// Boolean
    Bool,
    /// 8-bit signed integer
    I8,
    /// 16-bit signed integer
    I16,
    /// 32-bit signed integer
    I32,
    /// 64-bit signed integer
    I64,
    /// Pointer-width signed integer
    Isize,
    /// 8-bit unsigned integer
    U8,
    /// 16-bit unsigned integer
    U16,
    /// 32-bit unsigned integer
    U32,
    /// 64-bit unsigned integer
    U64,
    /// Pointer-width unsigned integer
    Usize,
    /// 32-bit float
    F32,
    /// 64-bit float
    F64,
    /// Complex number with 32-bit float parts
    C64,
    /// Complex number with 64-bit float parts
    C128,
    /// String-keyed map of dynamic values
    Map,
    /// Record with named fields
    Record,
    /// Ordered sequence
    Sequence,
    /// Open type accepting any value
    Dynamic,
}

/// Compatibility grouping of kinds.
///
/// Two fields are type-compatible when their kinds share a class; widths
/// inside a class are bridged by coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindClass {
    /// Text
    Text,
    /// Boolean
    Bool,
    /// Every signed and unsigned integer width
    Integer,
    /// Every float width
    Float,
    /// Every complex width
    Complex,
    /// String-keyed map
    Map,
    /// Record
    Record,
    /// Sequence
    Sequence,
    /// Dynamic
    Dynamic,
}

impl Kind {
    /// Compatibility class of this kind
    pub fn class(self) -> KindClass {
        match self {
            Kind::Text => KindClass::Text,
            Kind::Bool => KindClass::Bool,
            Kind::I8
            | Kind::I16
            | Kind::I32
            | Kind::I64
            | Kind::Isize
            | Kind::U8
            | Kind::U16
            | Kind::U32
            | Kind::U64
            | Kind::Usize => KindClass::Integer,
            Kind::F32 | Kind::F64 => KindClass::Float,
            Kind::C64 | Kind::C128 => KindClass::Complex,
            Kind::Map => KindClass::Map,
            Kind::Record => KindClass::Record,
            Kind::Sequence => KindClass::Sequence,
            Kind::Dynamic => KindClass::Dynamic,
        }
    }

    /// Whether this kind is a signed integer
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            Kind::I8 | Kind::I16 | Kind::I32 | Kind::I64 | Kind::Isize
        )
    }

    /// Whether this kind is an unsigned integer
    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            Kind::U8 | Kind::U16 | Kind::U32 | Kind::U64 | Kind::Usize
        )
    }

    /// Whether values of this kind are leaves (not record, sequence or dynamic)
    pub fn is_scalar(self) -> bool {
        !matches!(self, Kind::Record | Kind::Sequence | Kind::Dynamic)
    }

    /// Lowercase name used in messages
    pub fn name(self) -> &'static str {
        match self {
            Kind::Text => "text",
            Kind::Bool => "bool",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::Isize => "isize",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::Usize => "usize",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::C64 => "complex64",
            Kind::C128 => "complex128",
            Kind::Map => "map",
            Kind::Record => "record",
            Kind::Sequence => "sequence",
            Kind::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_widths_share_class() {
        let ints = [
            Kind::I8,
            Kind::I16,
            Kind::I32,
            Kind::I64,
            Kind::Isize,
            Kind::U8,
            Kind::U16,
            Kind::U32,
            Kind::U64,
            Kind::Usize,
        ];
        for kind in ints {
            assert_eq!(kind.class(), KindClass::Integer, "{kind}");
            assert!(kind.is_signed() != kind.is_unsigned());
        }
    }

    #[test]
    fn test_classes_keep_families_apart() {
        assert_eq!(Kind::F32.class(), Kind::F64.class());
        assert_eq!(Kind::C64.class(), Kind::C128.class());
        assert_ne!(Kind::F64.class(), Kind::I64.class());
        assert_ne!(Kind::C128.class(), Kind::F64.class());
        assert_ne!(Kind::Text.class(), Kind::Bool.class());
    }

    #[test]
    fn test_scalar_kinds() {
        assert!(Kind::Map.is_scalar());
        assert!(Kind::C64.is_scalar());
        assert!(!Kind::Record.is_scalar());
        assert!(!Kind::Sequence.is_scalar());
        assert!(!Kind::Dynamic.is_scalar());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Kind::C128.to_string(), "complex128");
        assert_eq!(Kind::Usize.to_string(), "usize");
    }
}
