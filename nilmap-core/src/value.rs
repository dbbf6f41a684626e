//! Dynamic value model
//!
//! Source records are read through a [`RecordValue`] snapshot and destination
//! records are filled through one, so the engine never needs to know the
//! concrete Rust types on either side.

use crate::error::{MapError, Result};
use crate::kind::Kind;
use crate::shape::TypeDesc;
use num_complex::{Complex32, Complex64};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Generic string-keyed map
pub type Map = BTreeMap<String, Value>;

/// Owned dynamic value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Text
    Text(String),
    /// Boolean
    Bool(bool),
    /// 8-bit signed integer
    I8(i8),
    /// 16-bit signed integer
    I16(i16),
    /// 32-bit signed integer
    I32(i32),
    /// 64-bit signed integer
    I64(i64),
    /// Pointer-width signed integer
    Isize(isize),
    /// 8-bit unsigned integer
    U8(u8),
    /// 16-bit unsigned integer
    U16(u16),
    /// 32-bit unsigned integer
    U32(u32),
    /// 64-bit unsigned integer
    U64(u64),
    /// Pointer-width unsigned integer
    Usize(usize),
    /// 32-bit float
    F32(f32),
    /// 64-bit float
    F64(f64),
    /// Complex with 32-bit parts
    C64(Complex32),
    /// Complex with 64-bit parts
    C128(Complex64),
    /// String-keyed map
    Map(Map),
    /// Record snapshot
    Record(RecordValue),
    /// Sequence
    Seq(Vec<Value>),
    /// Optional holder; `None` is absent
    Optional(Option<Box<Value>>),
}

impl Value {
    /// The absent holder, also the zero of dynamic fields
    pub const fn nil() -> Value {
        Value::Optional(None)
    }

    /// Wrap a value in a present holder
    pub fn present(value: Value) -> Value {
        Value::Optional(Some(Box::new(value)))
    }

    /// Zero value of a scalar kind; non-scalar kinds yield their empty form
    pub fn zero(kind: Kind) -> Value {
        match kind {
            Kind::Text => Value::Text(String::new()),
            Kind::Bool => Value::Bool(false),
            Kind::I8 => Value::I8(0),
            Kind::I16 => Value::I16(0),
            Kind::I32 => Value::I32(0),
            Kind::I64 => Value::I64(0),
            Kind::Isize => Value::Isize(0),
            Kind::U8 => Value::U8(0),
            Kind::U16 => Value::U16(0),
            Kind::U32 => Value::U32(0),
            Kind::U64 => Value::U64(0),
            Kind::Usize => Value::Usize(0),
            Kind::F32 => Value::F32(0.0),
            Kind::F64 => Value::F64(0.0),
            Kind::C64 => Value::C64(Complex32::new(0.0, 0.0)),
            Kind::C128 => Value::C128(Complex64::new(0.0, 0.0)),
            Kind::Map => Value::Map(Map::new()),
            Kind::Record => Value::Record(RecordValue::new("", Vec::new())),
            Kind::Sequence => Value::Seq(Vec::new()),
            Kind::Dynamic => Value::nil(),
        }
    }

    /// Runtime kind; a present holder reports its content, an absent one `Dynamic`
    pub fn kind(&self) -> Kind {
        match self {
            Value::Text(_) => Kind::Text,
            Value::Bool(_) => Kind::Bool,
            Value::I8(_) => Kind::I8,
            Value::I16(_) => Kind::I16,
            Value::I32(_) => Kind::I32,
            Value::I64(_) => Kind::I64,
            Value::Isize(_) => Kind::Isize,
            Value::U8(_) => Kind::U8,
            Value::U16(_) => Kind::U16,
            Value::U32(_) => Kind::U32,
            Value::U64(_) => Kind::U64,
            Value::Usize(_) => Kind::Usize,
            Value::F32(_) => Kind::F32,
            Value::F64(_) => Kind::F64,
            Value::C64(_) => Kind::C64,
            Value::C128(_) => Kind::C128,
            Value::Map(_) => Kind::Map,
            Value::Record(_) => Kind::Record,
            Value::Seq(_) => Kind::Sequence,
            Value::Optional(Some(inner)) => inner.kind(),
            Value::Optional(None) => Kind::Dynamic,
        }
    }

    /// Whether this is an absent holder
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Optional(None))
    }

    /// Whether this is a holder, present or absent
    pub fn is_optional(&self) -> bool {
        matches!(self, Value::Optional(_))
    }

    /// Dereference one level of optional holder; `None` when absent
    pub fn unwrap_optional(&self) -> Option<&Value> {
        match self {
            Value::Optional(Some(inner)) => Some(inner),
            Value::Optional(None) => None,
            other => Some(other),
        }
    }

    /// Dereference every holder level; `None` when any level is absent
    pub fn innermost(&self) -> Option<&Value> {
        match self {
            Value::Optional(Some(inner)) => inner.innermost(),
            Value::Optional(None) => None,
            other => Some(other),
        }
    }

    /// Owned form of [`Value::unwrap_optional`]
    pub fn into_unwrapped(self) -> Option<Value> {
        match self {
            Value::Optional(Some(inner)) => Some(*inner),
            Value::Optional(None) => None,
            other => Some(other),
        }
    }

    /// Take the record snapshot out of this value, looking through one holder
    pub fn into_record(self) -> Result<RecordValue> {
        match self {
            Value::Record(record) => Ok(record),
            Value::Optional(Some(inner)) => inner.into_record(),
            Value::Optional(None) => Err(MapError::AbsentOptional),
            other => Err(MapError::Incompatible {
                expected: Kind::Record,
                found: other.kind(),
            }),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::nil()
    }
}

/// One field of a record snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    /// Field name
    pub name: String,
    /// Declared kind with optionality stripped
    pub kind: Kind,
    /// Whether the field is declared as an optional holder
    pub optional: bool,
    /// Current value
    pub value: Value,
}

impl FieldValue {
    /// Field snapshot with kind and optionality taken from the declared type
    pub fn new(name: impl Into<String>, ty: TypeDesc, value: Value) -> Self {
        Self {
            name: name.into(),
            kind: ty.kind(),
            optional: ty.is_optional(),
            value,
        }
    }

    /// Field snapshot with kind and optionality read off the value itself
    pub fn inferred(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            kind: value.kind(),
            optional: value.is_optional(),
            value,
        }
    }
}

/// Record snapshot: type name plus fields in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordValue {
    name: String,
    fields: Vec<FieldValue>,
}

impl RecordValue {
    /// Create a record snapshot
    pub fn new(name: impl Into<String>, fields: Vec<FieldValue>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// View a string-keyed map as a record whose fields are its entries
    pub fn from_map(map: &Map) -> Self {
        let fields = map
            .iter()
            .map(|(key, value)| FieldValue::inferred(key.clone(), value.clone()))
            .collect();
        Self::new("map", fields)
    }

    /// Record type name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldValue] {
        &self.fields
    }

    /// Mutable access to the fields, for in-place writes
    pub fn fields_mut(&mut self) -> &mut [FieldValue] {
        &mut self.fields
    }

    /// Field with exactly this name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    /// Move a field's value out, leaving an absent holder behind
    pub fn take(&mut self, name: &str) -> Result<Value> {
        self.fields
            .iter_mut()
            .find(|f| f.name == name)
            .map(|f| std::mem::replace(&mut f.value, Value::nil()))
            .ok_or_else(|| MapError::MissingField(name.to_string()))
    }
}
