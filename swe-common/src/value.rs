//! Schema-bound JSON codec for result values
//!
//! A [`ValueCodec`] is built around one schema and converts [`Block`] trees
//! to and from the JSON found in an observation's `result` property. Record
//! fields duplicating envelope properties are never written; on decode they
//! are recovered from the [`EnvelopeContext`] supplied by the caller.

use serde_json::{Map, Number, Value};
use time::format_description::well_known::{Iso8601, Rfc3339};
use time::OffsetDateTime;
use tracing::trace;

use crate::definitions::{envelope_property, keep_field, EnvelopeProperty};
use crate::{Block, Component, Result, SweError};

/// Envelope properties of the observation enclosing a result
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EnvelopeContext {
    pub phenomenon_time: Option<OffsetDateTime>,
    pub result_time: Option<OffsetDateTime>,
}

impl EnvelopeContext {
    fn resolve(&self, property: EnvelopeProperty) -> Option<OffsetDateTime> {
        match property {
            EnvelopeProperty::PhenomenonTime => self.phenomenon_time.or(self.result_time),
            EnvelopeProperty::ResultTime => self.result_time,
        }
    }

    fn fill(&mut self, property: EnvelopeProperty, time: OffsetDateTime) {
        let slot = match property {
            EnvelopeProperty::PhenomenonTime => &mut self.phenomenon_time,
            EnvelopeProperty::ResultTime => &mut self.result_time,
        };
        slot.get_or_insert(time);
    }
}

/// JSON codec for values of one result schema
#[derive(Debug, Clone, Copy)]
pub struct ValueCodec<'a> {
    schema: &'a Component,
}

impl<'a> ValueCodec<'a> {
    pub fn new(schema: &'a Component) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &'a Component {
        self.schema
    }

    /// Encode a value tree; envelope-duplicated and absent record fields are
    /// left out.
    pub fn encode(&self, block: &Block) -> Result<Value> {
        encode_node(self.schema, block, "")
    }

    /// Decode a result without envelope context; filtered fields become
    /// [`Block::Absent`].
    pub fn decode(&self, json: &Value) -> Result<Block> {
        self.decode_with_context(json, &EnvelopeContext::default())
    }

    /// Decode a result, filling filtered fields from the enclosing observation
    pub fn decode_with_context(&self, json: &Value, context: &EnvelopeContext) -> Result<Block> {
        decode_node(self.schema, json, "", context)
    }

    /// Times held by the envelope-duplicated fields of a value tree, which
    /// [`encode`](Self::encode) leaves out. The first value found for each
    /// property wins.
    pub fn envelope(&self, block: &Block) -> EnvelopeContext {
        let mut context = EnvelopeContext::default();
        collect_envelope(self.schema, block, &mut context);
        context
    }
}

fn collect_envelope(component: &Component, block: &Block, context: &mut EnvelopeContext) {
    match (component, block) {
        (Component::Record(record), Block::Record(values)) => {
            for (field, value) in record.fields.iter().zip(values) {
                match (envelope_property(field.definition()), value) {
                    (Some(property), Block::Time(time)) => context.fill(property, *time),
                    _ => collect_envelope(field, value, context),
                }
            }
        }
        (Component::Vector(vector), Block::Vector(values)) => {
            for (coord, value) in vector.coordinates.iter().zip(values) {
                collect_envelope(coord, value, context);
            }
        }
        (Component::Array(array), Block::Array(values)) => {
            for value in values {
                collect_envelope(&array.element_type, value, context);
            }
        }
        (Component::Choice(choice), Block::Choice { index, value }) => {
            if let Some(item) = choice.items.get(*index) {
                collect_envelope(item, value, context);
            }
        }
        _ => {}
    }
}

fn encode_node(component: &Component, block: &Block, path: &str) -> Result<Value> {
    match (component, block) {
        (Component::Boolean(_), Block::Boolean(b)) => Ok(Value::Bool(*b)),
        (Component::Text(_) | Component::Category(_), Block::Text(s)) => {
            Ok(Value::String(s.clone()))
        }
        (Component::Count(_), Block::Count(n)) => Ok(Value::from(*n)),
        (Component::Quantity(_), Block::Quantity(v)) => Ok(encode_decimal(*v)),
        (Component::Time(_), Block::Time(t)) => t
            .format(&Rfc3339)
            .map(Value::String)
            .map_err(|e| SweError::mismatch(path, "RFC 3339 timestamp", e.to_string())),
        (Component::Record(record), Block::Record(values)) => {
            expect_len(path, record.fields.len(), values.len())?;
            let mut object = Map::new();
            for (field, value) in record.fields.iter().zip(values) {
                if !keep_field(true, field.definition()) {
                    trace!(field = %field.name(), "Skipping envelope-duplicated field");
                    continue;
                }
                if value.is_absent() {
                    continue;
                }
                let child_path = format!("{}/{}", path, field.name());
                object.insert(field.name().to_string(), encode_node(field, value, &child_path)?);
            }
            Ok(Value::Object(object))
        }
        (Component::Vector(vector), Block::Vector(values)) => {
            expect_len(path, vector.coordinates.len(), values.len())?;
            vector
                .coordinates
                .iter()
                .zip(values)
                .enumerate()
                .map(|(i, (coord, value))| encode_node(coord, value, &format!("{}/{}", path, i)))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array)
        }
        (Component::Array(array), Block::Array(values)) => {
            if let Some(count) = array.element_count {
                expect_len(path, count as usize, values.len())?;
            }
            values
                .iter()
                .enumerate()
                .map(|(i, value)| encode_node(&array.element_type, value, &format!("{}/{}", path, i)))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array)
        }
        (Component::Choice(choice), Block::Choice { index, value }) => {
            let item = choice.items.get(*index).ok_or_else(|| {
                SweError::mismatch(
                    path,
                    format!("choice index below {}", choice.items.len()),
                    index.to_string(),
                )
            })?;
            let child_path = format!("{}/{}", path, item.name());
            let mut object = Map::new();
            object.insert(item.name().to_string(), encode_node(item, value, &child_path)?);
            Ok(Value::Object(object))
        }
        (component, block) => Err(SweError::mismatch(
            path,
            component.type_name(),
            block.kind(),
        )),
    }
}

fn decode_node(
    component: &Component,
    json: &Value,
    path: &str,
    context: &EnvelopeContext,
) -> Result<Block> {
    let mismatch = |expected: &str| SweError::mismatch(path, expected, json_kind(json));

    match component {
        Component::Boolean(_) => json
            .as_bool()
            .map(Block::Boolean)
            .ok_or_else(|| mismatch("boolean")),
        Component::Text(_) | Component::Category(_) => json
            .as_str()
            .map(|s| Block::Text(s.to_string()))
            .ok_or_else(|| mismatch("string")),
        Component::Count(_) => json
            .as_i64()
            .map(Block::Count)
            .ok_or_else(|| mismatch("integer")),
        Component::Quantity(_) => decode_decimal(json)
            .map(Block::Quantity)
            .ok_or_else(|| mismatch("number")),
        Component::Time(_) => json
            .as_str()
            .and_then(parse_time)
            .map(Block::Time)
            .ok_or_else(|| mismatch("ISO-8601 timestamp")),
        Component::Record(record) => {
            let object = json.as_object().ok_or_else(|| mismatch("object"))?;

            if let Some(unknown) = object.keys().find(|k| component.child(k).is_none()) {
                return Err(SweError::mismatch(
                    format!("{}/{}", path, unknown),
                    "no field",
                    "unknown field",
                ));
            }

            let mut values = Vec::with_capacity(record.fields.len());
            for field in &record.fields {
                let child_path = format!("{}/{}", path, field.name());
                let value = match (object.get(field.name()), envelope_property(field.definition())) {
                    (Some(value), _) => decode_node(field, value, &child_path, context)?,
                    (None, Some(property)) => from_context(field, property, context),
                    (None, None) => {
                        return Err(SweError::mismatch(child_path, field.type_name(), "nothing"));
                    }
                };
                values.push(value);
            }
            Ok(Block::Record(values))
        }
        Component::Vector(vector) => {
            let items = json.as_array().ok_or_else(|| mismatch("array"))?;
            expect_len(path, vector.coordinates.len(), items.len())?;
            vector
                .coordinates
                .iter()
                .zip(items)
                .enumerate()
                .map(|(i, (coord, item))| decode_node(coord, item, &format!("{}/{}", path, i), context))
                .collect::<Result<Vec<_>>>()
                .map(Block::Vector)
        }
        Component::Array(array) => {
            let items = json.as_array().ok_or_else(|| mismatch("array"))?;
            if let Some(count) = array.element_count {
                expect_len(path, count as usize, items.len())?;
            }
            items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    decode_node(&array.element_type, item, &format!("{}/{}", path, i), context)
                })
                .collect::<Result<Vec<_>>>()
                .map(Block::Array)
        }
        Component::Choice(choice) => {
            let object = json.as_object().ok_or_else(|| mismatch("object"))?;
            let mut entries = object.iter();
            let (key, value) = match (entries.next(), entries.next()) {
                (Some(entry), None) => entry,
                _ => {
                    return Err(SweError::mismatch(
                        path,
                        "object with one item",
                        format!("object with {} members", object.len()),
                    ));
                }
            };
            let index = component.child_index(key).ok_or_else(|| {
                SweError::mismatch(format!("{}/{}", path, key), "choice item", "unknown item")
            })?;
            let value = decode_node(&choice.items[index], value, &format!("{}/{}", path, key), context)?;
            Ok(Block::Choice {
                index,
                value: Box::new(value),
            })
        }
    }
}

fn from_context(field: &Component, property: EnvelopeProperty, context: &EnvelopeContext) -> Block {
    match (field, context.resolve(property)) {
        (Component::Time(_), Some(time)) => Block::Time(time),
        _ => {
            trace!(field = %field.name(), "Envelope field not available from context");
            Block::Absent
        }
    }
}

fn expect_len(path: &str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(SweError::mismatch(
            path,
            format!("{} elements", expected),
            format!("{} elements", found),
        ))
    }
}

/// Quantities are held as `f64`, so an integral value is written back as a
/// decimal (`30` decodes to `30.0` and is encoded as `30.0`). Non-finite
/// values have no JSON number form and travel as strings.
fn encode_decimal(value: f64) -> Value {
    match Number::from_f64(value) {
        Some(number) => Value::Number(number),
        None if value.is_nan() => Value::String("NaN".to_string()),
        None if value > 0.0 => Value::String("Infinity".to_string()),
        None => Value::String("-Infinity".to_string()),
    }
}

fn decode_decimal(json: &Value) -> Option<f64> {
    match json {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => match s.as_str() {
            "NaN" => Some(f64::NAN),
            "Infinity" | "+Infinity" => Some(f64::INFINITY),
            "-Infinity" => Some(f64::NEG_INFINITY),
            _ => None,
        },
        _ => None,
    }
}

fn parse_time(text: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(text, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(text, &Iso8601::DEFAULT))
        .ok()
}

fn json_kind(json: &Value) -> &'static str {
    match json {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
