//! Error types for nilmap

use crate::kind::Kind;
use thiserror::Error;

/// Faults raised while mapping or rebuilding values.
///
/// The public mapping entry points turn these into panics; they only travel
/// as values inside the engine so the failing field can be named.
#[derive(Debug, Error)]
pub enum MapError {
    /// A concrete value was required but the optional holder was absent.
    #[error("read through an absent optional value")]
    AbsentOptional,
    /// The value cannot be viewed as the record or sequence the destination needs.
    #[error("value of kind {kind} is neither a record nor a sequence")]
    Unclassifiable {
        /// Kind of the offending value.
        kind: Kind,
    },
    /// Map coercion from a value that is not already a string-keyed map.
    #[error("expected a string-keyed map, found {found}")]
    NotAMap {
        /// Kind of the offending value.
        found: Kind,
    },
    /// Scalar kinds that cannot be reconciled.
    #[error("cannot convert {found} into {expected}")]
    Incompatible {
        /// Kind the destination requires.
        expected: Kind,
        /// Kind that was supplied.
        found: Kind,
    },
    /// A record snapshot lacks a field its shape declares.
    #[error("record is missing field `{0}`")]
    MissingField(String),
    /// The configured recursion guard tripped.
    #[error("nesting depth exceeded the limit of {0}")]
    DepthExceeded(usize),
    /// One side of an entry point is a sequence and the other is not.
    #[error("cannot map {from} into {into}")]
    ShapeMismatch {
        /// Kind of the source value.
        from: Kind,
        /// Kind of the destination type.
        into: Kind,
    },
    /// Adds the destination field path to an inner fault.
    #[error("{field}: {source}")]
    Field {
        /// Field name, or `name[index]` for sequence elements.
        field: String,
        /// Underlying fault.
        #[source]
        source: Box<MapError>,
    },
}

impl MapError {
    /// Wrap this error with the name of the field being mapped.
    pub fn at(self, field: impl Into<String>) -> Self {
        MapError::Field {
            field: field.into(),
            source: Box::new(self),
        }
    }

    /// The innermost fault, with all field context stripped.
    pub fn root(&self) -> &MapError {
        match self {
            MapError::Field { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, MapError>;
