//! Record mapper
//!
//! Walks the destination shape field by field, resolves each field against
//! the source snapshot and decides between skip, nested record, sequence and
//! scalar assignment.

use crate::coerce::assign_scalar;
use crate::collection::elements_fit;
use crate::resolver::resolve;
use crate::Mapper;
use nilmap_core::{FieldValue, Kind, MapError, RecordValue, Result, Shape, TypeDesc, Value};
use std::borrow::Cow;
use tracing::trace;

impl Mapper {
    /// Map `source` into `destination`, whose layout is `shape`.
    ///
    /// `depth` is 0 for the entry call and grows by one per embedded record.
    /// Fields without a source counterpart and readonly fields are left as
    /// they are.
    pub(crate) fn map_record(
        &self,
        source: &RecordValue,
        destination: &mut RecordValue,
        shape: &'static Shape,
        depth: usize,
    ) -> Result<()> {
        self.check_depth(depth)?;

        let names: Vec<&str> = source.fields().iter().map(|f| f.name.as_str()).collect();
        for (index, desc) in shape.fields().iter().enumerate() {
            let Some(matched) = resolve(desc.name, &names, self.opts.case_insensitive_names)
            else {
                trace!(record = shape.name(), field = desc.name, "no source field");
                continue;
            };
            if !desc.writable {
                trace!(record = shape.name(), field = desc.name, "readonly, skipped");
                continue;
            }

            let field = &source.fields()[matched];
            let mapped = self
                .map_field(field, desc.ty, depth)
                .map_err(|err| err.at(desc.name))?;
            if let Some(value) = mapped {
                store(destination, index, desc.name, value)?;
            }
        }
        Ok(())
    }

    /// Value to write for one destination field, or `None` to leave it unchanged.
    fn map_field(&self, field: &FieldValue, ty: TypeDesc, depth: usize) -> Result<Option<Value>> {
        let target = ty.strip_optional();
        let kind = target.kind();

        if kind == Kind::Dynamic || field.kind.class() == kind.class() {
            if field.value.innermost().is_none() {
                trace!(field = %field.name, "absent source, left unchanged");
                return Ok(None);
            }
            let mapped = match target {
                TypeDesc::Dynamic => field.value.clone().into_unwrapped().unwrap_or_else(Value::nil),
                TypeDesc::Record(shape) => self.map_nested(&field.value, shape(), depth)?,
                TypeDesc::Sequence(element) => match field.value.innermost() {
                    Some(Value::Seq(items)) => {
                        if !elements_fit(items, element()) {
                            trace!(
                                field = %field.name,
                                "sequence elements incompatible, left unchanged"
                            );
                            return Ok(None);
                        }
                        Value::Seq(self.map_sequence(items, element(), depth + 1)?)
                    }
                    Some(other) => {
                        return Err(MapError::Unclassifiable { kind: other.kind() })
                    }
                    None => return Ok(None),
                },
                _ => return assign_scalar(&field.value, ty).map(Some),
            };
            return Ok(Some(wrap(mapped, ty)));
        }

        if let TypeDesc::Record(shape) = target {
            trace!(field = %field.name, from = %field.kind, "viewing source as record");
            let mapped = self.map_nested(&field.value, shape(), depth)?;
            return Ok(Some(wrap(mapped, ty)));
        }

        trace!(field = %field.name, from = %field.kind, to = %kind, "incompatible, left unchanged");
        Ok(None)
    }

    /// Map an embedded source record into a freshly zeroed destination record.
    pub(crate) fn map_nested(
        &self,
        value: &Value,
        shape: &'static Shape,
        depth: usize,
    ) -> Result<Value> {
        let source = record_source(value)?;
        let mut draft = shape.zero();
        self.map_record(&source, &mut draft, shape, depth + 1)?;
        Ok(Value::Record(draft))
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        match self.opts.max_depth {
            Some(limit) if depth > limit => Err(MapError::DepthExceeded(limit)),
            _ => Ok(()),
        }
    }
}

/// View a value as a source record: a record, a map whose entries act as
/// fields, or a present holder of either.
pub(crate) fn record_source(value: &Value) -> Result<Cow<'_, RecordValue>> {
    match value {
        Value::Record(record) => Ok(Cow::Borrowed(record)),
        Value::Map(map) => Ok(Cow::Owned(RecordValue::from_map(map))),
        Value::Optional(Some(inner)) => record_source(inner),
        Value::Optional(None) => Err(MapError::AbsentOptional),
        other => Err(MapError::Unclassifiable { kind: other.kind() }),
    }
}

/// Wrap `value` in a holder when `ty` is optional.
pub(crate) fn wrap(value: Value, ty: TypeDesc) -> Value {
    if ty.is_optional() {
        Value::present(value)
    } else {
        value
    }
}

fn store(destination: &mut RecordValue, index: usize, name: &str, value: Value) -> Result<()> {
    let fields = destination.fields_mut();
    let position = if fields.get(index).is_some_and(|f| f.name == name) {
        Some(index)
    } else {
        fields.iter().position(|f| f.name == name)
    };
    let position = position.ok_or_else(|| MapError::MissingField(name.to_string()))?;
    fields[position].value = value;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MapOptions, Record, Reflect};

    #[derive(Debug, Clone, Default, PartialEq, Record)]
    struct Object {
        #[nilmap(rename = "Name")]
        name: String,
    }

    #[derive(Debug, Clone, Default, PartialEq, Record)]
    struct Source {
        #[nilmap(rename = "FieldA")]
        field_a: String,
        #[nilmap(rename = "FieldB")]
        field_b: i64,
        #[nilmap(rename = "FieldC")]
        field_c: Option<String>,
        #[nilmap(rename = "Object")]
        object: Object,
    }

    #[derive(Debug, Clone, Default, PartialEq, Record)]
    struct Dest {
        #[nilmap(rename = "FieldA")]
        field_a: Option<String>,
        #[nilmap(rename = "FieldB")]
        field_b: i64,
        #[nilmap(rename = "FieldC")]
        field_c: String,
        #[nilmap(rename = "Object")]
        object: Option<Object>,
        #[nilmap(rename = "Extra", readonly)]
        extra: u8,
    }

    fn source() -> Source {
        Source {
            field_a: "Test1".into(),
            field_b: 123,
            field_c: None,
            object: Object {
                name: "NilMapper".into(),
            },
        }
    }

    fn map_into_zero(mapper: &Mapper, source: &Source) -> Result<RecordValue> {
        let snapshot = source.to_value().into_record()?;
        let mut draft = Dest::shape().zero();
        mapper.map_record(&snapshot, &mut draft, Dest::shape(), 0)?;
        Ok(draft)
    }

    #[test]
    fn test_maps_fields_into_draft() {
        let draft = map_into_zero(&Mapper::default(), &source()).unwrap();
        assert_eq!(
            draft.get("FieldA"),
            Some(&Value::present(Value::Text("Test1".into())))
        );
        assert_eq!(draft.get("FieldB"), Some(&Value::I64(123)));
        assert_eq!(draft.get("FieldC"), Some(&Value::Text(String::new())));

        let rebuilt = Dest::from_value(Value::Record(draft)).unwrap();
        assert_eq!(rebuilt.object.unwrap().name, "NilMapper");
    }

    #[test]
    fn test_depth_guard() {
        let mapper = Mapper::new(MapOptions::default().with_max_depth(0));
        let err = map_into_zero(&mapper, &source()).unwrap_err();
        assert_eq!(err.to_string(), "Object: nesting depth exceeded the limit of 0");
        assert!(matches!(err.root(), MapError::DepthExceeded(0)));

        let mapper = Mapper::new(MapOptions::default().with_max_depth(1));
        assert!(map_into_zero(&mapper, &source()).is_ok());
    }

    #[test]
    fn test_record_source_views() {
        let record = RecordValue::new("User", vec![]);
        assert!(matches!(
            record_source(&Value::Record(record.clone())).unwrap(),
            Cow::Borrowed(_)
        ));
        assert!(matches!(
            record_source(&Value::present(Value::Record(record))).unwrap(),
            Cow::Borrowed(_)
        ));
        assert!(matches!(
            record_source(&Value::Map(Default::default())).unwrap(),
            Cow::Owned(_)
        ));
        assert!(matches!(
            record_source(&Value::I32(1)),
            Err(MapError::Unclassifiable { kind: Kind::I32 })
        ));
        assert!(matches!(
            record_source(&Value::nil()),
            Err(MapError::AbsentOptional)
        ));
    }

    #[test]
    fn test_store_falls_back_to_name() {
        let mut record = RecordValue::new(
            "Pair",
            vec![
                FieldValue::inferred("A", Value::I8(0)),
                FieldValue::inferred("B", Value::I8(0)),
            ],
        );
        store(&mut record, 0, "B", Value::I8(2)).unwrap();
        assert_eq!(record.get("A"), Some(&Value::I8(0)));
        assert_eq!(record.get("B"), Some(&Value::I8(2)));
        assert!(store(&mut record, 5, "C", Value::I8(3)).is_err());
    }
}
