//! nilmap Core - Kinds, shapes and dynamic values for record mapping
//!
//! This crate provides the model the mapping engine works on, with no
//! mapping logic of its own. It includes:
//!
//! - Elemental kinds and their compatibility classes
//! - Static type descriptors and cached record shapes
//! - The dynamic value model and record snapshots
//! - The `Reflect` and `Record` traits with std implementations
//! - Error types
//! - Mapping options
//! - The optional holder helper

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod kind;
pub mod optional;
pub mod options;
pub mod reflect;
pub mod shape;
pub mod value;

// Re-export commonly used types
pub use error::{MapError, Result};
pub use kind::{Kind, KindClass};
pub use num_complex::{Complex32, Complex64};
pub use optional::to_optional;
pub use options::MapOptions;
pub use reflect::{Record, Reflect};
pub use shape::{FieldDesc, Shape, TypeDesc};
pub use value::{FieldValue, Map, RecordValue, Value};
