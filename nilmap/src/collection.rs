//! Collection mapper

use crate::coerce::assign_scalar;
use crate::record::{record_source, wrap};
use crate::Mapper;
use nilmap_core::{Kind, MapError, Result, TypeDesc, Value};

impl Mapper {
    /// Build a new destination sequence from `items`, one element per item, in order.
    ///
    /// Record elements are mapped into zeroed records of the element shape,
    /// everything else goes through scalar assignment.
    pub(crate) fn map_sequence(
        &self,
        items: &[Value],
        element: TypeDesc,
        depth: usize,
    ) -> Result<Vec<Value>> {
        let mut mapped = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let value = self
                .map_element(item, element, depth)
                .map_err(|err| err.at(format!("[{index}]")))?;
            mapped.push(value);
        }
        Ok(mapped)
    }

    fn map_element(&self, item: &Value, element: TypeDesc, depth: usize) -> Result<Value> {
        match element.strip_optional() {
            TypeDesc::Dynamic => Ok(item.clone().into_unwrapped().unwrap_or_else(Value::nil)),
            TypeDesc::Record(shape) => {
                if item.innermost().is_none() {
                    return absent(element);
                }
                let source = record_source(item)?;
                let shape = shape();
                let mut draft = shape.zero();
                self.map_record(&source, &mut draft, shape, depth)?;
                Ok(wrap(Value::Record(draft), element))
            }
            TypeDesc::Sequence(inner) => match item.innermost() {
                Some(Value::Seq(items)) => {
                    let nested = self.map_sequence(items, inner(), depth)?;
                    Ok(wrap(Value::Seq(nested), element))
                }
                Some(other) => Err(MapError::Unclassifiable { kind: other.kind() }),
                None => absent(element),
            },
            _ => assign_scalar(item, element),
        }
    }
}

/// Whether every present item has a kind `element` accepts.
///
/// Absent items always fit; whether they fault is decided when mapping.
/// Map elements accept anything so that a non-map source faults.
pub(crate) fn elements_fit(items: &[Value], element: TypeDesc) -> bool {
    items.iter().all(|item| element_fits(item, element))
}

fn element_fits(item: &Value, element: TypeDesc) -> bool {
    let Some(value) = item.innermost() else {
        return true;
    };
    match element.strip_optional() {
        TypeDesc::Dynamic => true,
        TypeDesc::Record(_) => matches!(value.kind(), Kind::Record | Kind::Map),
        TypeDesc::Sequence(inner) => match value {
            Value::Seq(nested) => elements_fit(nested, inner()),
            _ => false,
        },
        target => {
            let kind = target.kind();
            kind == Kind::Map || value.kind().class() == kind.class()
        }
    }
}

fn absent(element: TypeDesc) -> Result<Value> {
    if element.is_optional() {
        Ok(Value::nil())
    } else {
        Err(MapError::AbsentOptional)
    }
}
