//! Static type descriptors and record shapes

use crate::kind::Kind;
use crate::value::{FieldValue, RecordValue, Value};

/// Declared type of a field or sequence element.
///
/// Nested descriptors are reached through function pointers so a shape that
/// refers to itself (through `Option<Box<T>>`) can be built without recursing.
#[derive(Debug, Clone, Copy)]
pub enum TypeDesc {
    /// Leaf kind: text, bool, numbers, complex or map
    Scalar(Kind),
    /// Open type holding any [`Value`]
    Dynamic,
    /// Record with a cached shape
    Record(fn() -> &'static Shape),
    /// Sequence with the given element type
    Sequence(fn() -> TypeDesc),
    /// Optional holder around the given type
    Optional(fn() -> TypeDesc),
}

impl TypeDesc {
    /// Whether the outermost layer is an optional holder
    pub fn is_optional(&self) -> bool {
        matches!(self, TypeDesc::Optional(_))
    }

    /// Strip one level of optional wrapping
    pub fn strip_optional(&self) -> TypeDesc {
        match self {
            TypeDesc::Optional(inner) => inner(),
            other => *other,
        }
    }

    /// Elemental kind after stripping every optional layer.
    ///
    /// Nested holders such as `Option<Option<T>>` collapse into one, so they
    /// compare equal to `T`; an absent holder at any level reads as absent.
    pub fn kind(&self) -> Kind {
        match self {
            TypeDesc::Scalar(kind) => *kind,
            TypeDesc::Dynamic => Kind::Dynamic,
            TypeDesc::Record(_) => Kind::Record,
            TypeDesc::Sequence(_) => Kind::Sequence,
            TypeDesc::Optional(inner) => inner().kind(),
        }
    }

    /// Shape of the record, if this descriptor (optional stripped) is one
    pub fn shape(&self) -> Option<&'static Shape> {
        match self.strip_optional() {
            TypeDesc::Record(shape) => Some(shape()),
            _ => None,
        }
    }

    /// Element descriptor, if this descriptor (optional stripped) is a sequence
    pub fn element(&self) -> Option<TypeDesc> {
        match self.strip_optional() {
            TypeDesc::Sequence(element) => Some(element()),
            _ => None,
        }
    }

    /// Zero value of this type
    pub fn zero_value(&self) -> Value {
        match self {
            TypeDesc::Scalar(kind) => Value::zero(*kind),
            TypeDesc::Dynamic => Value::nil(),
            TypeDesc::Record(shape) => Value::Record(shape().zero()),
            TypeDesc::Sequence(_) => Value::Seq(Vec::new()),
            TypeDesc::Optional(_) => Value::nil(),
        }
    }
}

/// Declared field of a record shape
#[derive(Debug, Clone)]
pub struct FieldDesc {
    /// Field name as seen by the resolver
    pub name: &'static str,
    /// Declared type
    pub ty: TypeDesc,
    /// Whether the engine may write this field
    pub writable: bool,
}

impl FieldDesc {
    /// Create a writable field descriptor
    pub fn new(name: &'static str, ty: TypeDesc) -> Self {
        Self {
            name,
            ty,
            writable: true,
        }
    }

    /// Mark this field as not writable by the engine
    pub fn readonly(mut self) -> Self {
        self.writable = false;
        self
    }
}

/// Ordered field layout of a record type
#[derive(Debug, Clone)]
pub struct Shape {
    name: &'static str,
    fields: Vec<FieldDesc>,
}

impl Shape {
    /// Create a shape from its type name and fields in declaration order
    pub fn new(name: &'static str, fields: Vec<FieldDesc>) -> Self {
        Self { name, fields }
    }

    /// Record type name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldDesc] {
        &self.fields
    }

    /// Position of the field with exactly this name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Record value with every field at its zero value
    pub fn zero(&self) -> RecordValue {
        let fields = self
            .fields
            .iter()
            .map(|f| FieldValue::new(f.name, f.ty, f.ty.zero_value()))
            .collect();
        RecordValue::new(self.name, fields)
    }
}
