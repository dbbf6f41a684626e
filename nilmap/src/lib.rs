//! nilmap - Copy matching fields between differently shaped records
//!
//! This crate provides the mapping engine and its entry points:
//!
//! - Field resolution by name with a case-insensitive fallback
//! - Optionality normalization (`T` ↔ `Option<T>`)
//! - Recursive mapping of nested records and sequences of records
//! - Integer, float and complex width coercion
//!
//! ```
//! use nilmap::{map_one, Record};
//!
//! #[derive(Record)]
//! struct Source {
//!     name: String,
//!     age: i32,
//!     nickname: Option<String>,
//! }
//!
//! #[derive(Default, Record)]
//! struct Dest {
//!     name: Option<String>,
//!     age: i64,
//!     nickname: String,
//! }
//!
//! let source = Source { name: "Ada".into(), age: 36, nickname: None };
//! let mut dest = Dest::default();
//! map_one(&source, &mut dest);
//!
//! assert_eq!(dest.name.as_deref(), Some("Ada"));
//! assert_eq!(dest.age, 36);
//! assert_eq!(dest.nickname, "");
//! ```
//!
//! Incompatible inputs are programmer errors: the entry points panic with the
//! path of the failing field instead of returning an error.

#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate self as nilmap;

pub mod coerce;
mod collection;
mod record;
pub mod resolver;

// Re-export commonly used types
pub use nilmap_core::{
    to_optional, Complex32, Complex64, FieldDesc, FieldValue, Kind, KindClass, Map, MapError,
    MapOptions, Record, RecordValue, Reflect, Result, Shape, TypeDesc, Value,
};
pub use nilmap_derive::Record;

use record::record_source;
use tracing::debug;

/// Mapping engine configured with [`MapOptions`]
#[derive(Debug, Clone, Default)]
pub struct Mapper {
    opts: MapOptions,
}

impl Mapper {
    /// Create a mapper with the given options
    pub fn new(opts: MapOptions) -> Self {
        Self { opts }
    }

    /// Options in effect
    pub fn options(&self) -> &MapOptions {
        &self.opts
    }

    /// Copy matching fields of `source` into `destination`.
    ///
    /// When both sides are sequences the call is handled as [`Mapper::map_many`].
    ///
    /// # Panics
    ///
    /// Panics when a field cannot be mapped: an absent optional where a value
    /// is required, a non-record source for a record destination, a non-map
    /// source for a map destination, or a sequence on only one side.
    pub fn map_one<S: Reflect, D: Reflect>(&self, source: &S, destination: &mut D) {
        if let Err(err) = self.copy(source, destination) {
            panic!("nilmap: {err}");
        }
    }

    /// Replace `destination` with one mapped element per element of `source`.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Mapper::map_one`], naming the
    /// failing element.
    pub fn map_many<S: Reflect, D: Reflect>(&self, source: &[S], destination: &mut Vec<D>) {
        if let Err(err) = self.copy_all(source, destination) {
            panic!("nilmap: {err}");
        }
    }

    fn copy<S: Reflect, D: Reflect>(&self, source: &S, destination: &mut D) -> Result<()> {
        let value = source.to_value();
        let desc = D::type_desc();
        debug!(source = %value.kind(), destination = %desc.kind(), "map_one");

        match (value.unwrap_optional(), desc.strip_optional()) {
            (Some(Value::Seq(items)), TypeDesc::Sequence(element)) => {
                let mapped = self.map_sequence(items, element(), 0)?;
                *destination = D::from_value(record::wrap(Value::Seq(mapped), desc))?;
                Ok(())
            }
            (Some(Value::Seq(_)), _) | (_, TypeDesc::Sequence(_)) => Err(MapError::ShapeMismatch {
                from: value.kind(),
                into: desc.kind(),
            }),
            (_, TypeDesc::Record(shape)) => {
                let shape = shape();
                let source = record_source(&value)?;
                let mut draft = match destination.to_value().into_unwrapped() {
                    Some(current) => current.into_record()?,
                    None => shape.zero(),
                };
                self.map_record(&source, &mut draft, shape, 0)?;
                *destination = D::from_value(Value::Record(draft))?;
                Ok(())
            }
            (_, other) => Err(MapError::Unclassifiable { kind: other.kind() }),
        }
    }

    fn copy_all<S: Reflect, D: Reflect>(&self, source: &[S], destination: &mut Vec<D>) -> Result<()> {
        debug!(elements = source.len(), destination = %D::type_desc().kind(), "map_many");
        let items: Vec<Value> = source.iter().map(Reflect::to_value).collect();
        let mapped = self.map_sequence(&items, D::type_desc(), 0)?;
        let rebuilt = mapped
            .into_iter()
            .map(D::from_value)
            .collect::<Result<Vec<D>>>()?;
        *destination = rebuilt;
        Ok(())
    }
}

/// Copy matching fields of `source` into `destination` with default options.
///
/// See [`Mapper::map_one`].
pub fn map_one<S: Reflect, D: Reflect>(source: &S, destination: &mut D) {
    Mapper::default().map_one(source, destination)
}

/// Map a slice of records into a new destination vector with default options.
///
/// See [`Mapper::map_many`].
pub fn map_many<S: Reflect, D: Reflect>(source: &[S], destination: &mut Vec<D>) {
    Mapper::default().map_many(source, destination)
}
