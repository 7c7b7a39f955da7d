//! JSON encoding of result schemas
//!
//! [`encode`] drops record fields that duplicate envelope properties before
//! writing; [`decode`] guarantees the returned schema holds a locatable time
//! stamp, adding one when the server declared none.
//!
//! Parameter schemas are plain records and skip both steps: see
//! [`encode_record`] and [`decode_record`].

use serde_json::Value;
use tracing::{debug, trace};

use crate::component::{phenomenon_time_field, ComponentInfo, Record};
use crate::definitions::keep_field;
use crate::{Component, Result, SweError};

/// Name given to a nameless root when it has to be wrapped in a record
const DEFAULT_ROOT_NAME: &str = "result";

/// Encode a schema to its wire JSON, without envelope-duplicated fields
pub fn encode(component: &Component) -> Result<Value> {
    let mut filtered = component.clone();
    strip_envelope_fields(&mut filtered);
    Ok(serde_json::to_value(&filtered)?)
}

/// Encode a schema to a JSON string
pub fn to_string(component: &Component) -> Result<String> {
    Ok(serde_json::to_string(&encode(component)?)?)
}

/// Decode a schema from wire JSON and normalize its time stamp
pub fn decode(json: &Value) -> Result<Component> {
    check_variants(json, "")?;
    let component: Component = serde_json::from_value(json.clone())?;
    component.validate()?;
    Ok(ensure_time_stamp(component))
}

/// Decode a schema from a JSON string
pub fn from_str(json: &str) -> Result<Component> {
    let value: Value = serde_json::from_str(json)?;
    decode(&value)
}

/// Encode a parameters record unchanged
pub fn encode_record(record: &Record) -> Result<Value> {
    Ok(serde_json::to_value(Component::Record(record.clone()))?)
}

/// Decode a parameters record; the variant and naming checks of [`decode`]
/// apply, but neither the envelope filter nor time-stamp normalization does.
pub fn decode_record(json: &Value) -> Result<Record> {
    check_variants(json, "")?;
    let component: Component = serde_json::from_value(json.clone())?;
    component.validate()?;
    match component {
        Component::Record(record) => Ok(record),
        other => Err(SweError::mismatch("", "DataRecord", other.type_name())),
    }
}

fn strip_envelope_fields(component: &mut Component) {
    if let Component::Record(record) = component {
        let before = record.fields.len();
        record
            .fields
            .retain(|field| keep_field(true, field.definition()));
        if record.fields.len() != before {
            debug!(
                record = %record.info.name,
                dropped = before - record.fields.len(),
                "Dropped envelope-duplicated fields from schema"
            );
        }
    }

    for child in component.children_mut() {
        strip_envelope_fields(child);
    }
}

/// Reject unknown discriminators before handing the tree to serde, so they
/// surface as `UnsupportedVariant` instead of a generic parse failure.
fn check_variants(json: &Value, path: &str) -> Result<()> {
    let object = json.as_object().ok_or_else(|| {
        SweError::malformed(format!("component at {} is not a JSON object", display(path)))
    })?;

    let type_name = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            SweError::malformed(format!("component at {} has no type", display(path)))
        })?;

    if !Component::TYPE_NAMES.contains(&type_name) {
        return Err(SweError::unsupported(type_name));
    }

    for key in ["fields", "coordinates", "items"] {
        if let Some(children) = object.get(key) {
            let children = children.as_array().ok_or_else(|| {
                SweError::malformed(format!("'{}' at {} is not an array", key, display(path)))
            })?;
            for (i, child) in children.iter().enumerate() {
                check_variants(child, &format!("{}/{}/{}", path, key, i))?;
            }
        }
    }

    if let Some(element) = object.get("elementType") {
        check_variants(element, &format!("{}/elementType", path))?;
    }

    Ok(())
}

fn ensure_time_stamp(component: Component) -> Component {
    if component.has_time_stamp() {
        return component;
    }

    match component {
        Component::Record(mut record) => {
            let name = unique_name("time", &record.fields);
            trace!(record = %record.info.name, field = %name, "Inserting time stamp field");
            record.fields.insert(0, phenomenon_time_field(&name));
            Component::Record(record)
        }
        mut other => {
            if other.name().is_empty() {
                other.info_mut().name = DEFAULT_ROOT_NAME.to_string();
            }
            let wrapper = format!("{}_rec", other.name());
            debug!(root = %other.name(), wrapper = %wrapper, "Wrapping schema root with time stamp");

            let time = phenomenon_time_field(&unique_name("time", std::slice::from_ref(&other)));
            Component::Record(Record {
                info: ComponentInfo {
                    name: wrapper,
                    ..ComponentInfo::default()
                },
                fields: vec![time, other],
            })
        }
    }
}

fn unique_name(base: &str, siblings: &[Component]) -> String {
    let taken = |name: &str| siblings.iter().any(|c| c.name() == name);
    if !taken(base) {
        return base.to_string();
    }
    (1..)
        .map(|i| format!("{}_{}", base, i))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

fn display(path: &str) -> &str {
    if path.is_empty() { "/" } else { path }
}

/// Serde adapters applying the schema codec to resource fields, for use with
/// `#[serde(with = "swe_common::schema::serde")]`
pub mod serde {
    use serde::{de::Error as _, ser::Error as _, Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    use crate::Component;

    pub fn serialize<S: Serializer>(component: &Component, serializer: S) -> Result<S::Ok, S::Error> {
        super::encode(component)
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Component, D::Error> {
        let value = Value::deserialize(deserializer)?;
        super::decode(&value).map_err(D::Error::custom)
    }

    /// Same as the parent module, for optional fields
    pub mod option {
        use super::*;

        pub fn serialize<S: Serializer>(
            component: &Option<Component>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match component {
                Some(component) => super::serialize(component, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Component>, D::Error> {
            match Option::<Value>::deserialize(deserializer)? {
                Some(value) => crate::schema::decode(&value)
                    .map(Some)
                    .map_err(D::Error::custom),
                None => Ok(None),
            }
        }
    }

    /// Adapters for parameter records, which keep every field as declared
    pub mod record {
        use super::*;
        use crate::component::Record;

        pub fn serialize<S: Serializer>(record: &Record, serializer: S) -> Result<S::Ok, S::Error> {
            crate::schema::encode_record(record)
                .map_err(S::Error::custom)?
                .serialize(serializer)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Record, D::Error> {
            let value = Value::deserialize(deserializer)?;
            crate::schema::decode_record(&value).map_err(D::Error::custom)
        }

        pub mod option {
            use super::*;

            pub fn serialize<S: Serializer>(
                record: &Option<Record>,
                serializer: S,
            ) -> Result<S::Ok, S::Error> {
                match record {
                    Some(record) => super::serialize(record, serializer),
                    None => serializer.serialize_none(),
                }
            }

            pub fn deserialize<'de, D: Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Option<Record>, D::Error> {
                match Option::<Value>::deserialize(deserializer)? {
                    Some(value) => crate::schema::decode_record(&value)
                        .map(Some)
                        .map_err(D::Error::custom),
                    None => Ok(None),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::{DEF_PHENOMENON_TIME, DEF_SAMPLING_TIME};
    use crate::ComponentBuilder;
    use serde_json::json;

    fn cat_sensor() -> Component {
        ComponentBuilder::record()
            .name("cat_sensor_data")
            .label("Cat Sensor Data")
            .field(
                "time",
                ComponentBuilder::time()
                    .label("Time")
                    .as_sampling_time_iso_utc(),
            )
            .field(
                "pos",
                ComponentBuilder::vector()
                    .label("Position")
                    .definition("http://sensorml.com/ont/swe/property/Location")
                    .reference_frame("http://www.opengis.net/def/crs/EPSG/0/4979")
                    .field("lat", ComponentBuilder::quantity().uom_code("deg"))
                    .field("lon", ComponentBuilder::quantity().uom_code("deg"))
                    .field("alt", ComponentBuilder::quantity().uom_code("m")),
            )
            .build()
    }

    #[test]
    fn test_scalar_without_time_is_wrapped() {
        let decoded = decode(&json!({
            "type": "Quantity",
            "name": "temp",
            "uom": { "code": "Cel" }
        }))
        .unwrap();

        assert_eq!(decoded.name(), "temp_rec");
        assert_eq!(decoded.type_name(), "DataRecord");
        let fields = decoded.children();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name(), "time");
        assert_eq!(fields[0].type_name(), "Time");
        assert_eq!(fields[0].definition(), Some(DEF_PHENOMENON_TIME));
        assert_eq!(fields[1].name(), "temp");
        assert_eq!(fields[1].type_name(), "Quantity");
    }

    #[test]
    fn test_record_with_time_is_unchanged() {
        let json = json!({
            "type": "DataRecord",
            "name": "obs",
            "fields": [
                { "type": "Time", "name": "time", "definition": DEF_PHENOMENON_TIME },
                { "type": "Vector", "name": "pos", "coordinates": [
                    { "type": "Quantity", "name": "x" },
                    { "type": "Quantity", "name": "y" }
                ]}
            ]
        });
        let decoded = decode(&json).unwrap();
        let expected: Component = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_record_without_time_gets_first_field() {
        let decoded = decode(&json!({
            "type": "DataRecord",
            "name": "weather",
            "fields": [
                { "type": "Quantity", "name": "temp" },
                { "type": "Quantity", "name": "humidity" }
            ]
        }))
        .unwrap();

        let names: Vec<&str> = decoded.children().iter().map(Component::name).collect();
        assert_eq!(names, vec!["time", "temp", "humidity"]);
    }

    #[test]
    fn test_nested_time_stamp_counts() {
        let decoded = decode(&json!({
            "type": "DataChoice",
            "name": "msg",
            "items": [
                { "type": "DataRecord", "name": "fix", "fields": [
                    { "type": "Time", "name": "t", "definition": DEF_SAMPLING_TIME }
                ]}
            ]
        }))
        .unwrap();
        assert_eq!(decoded.type_name(), "DataChoice");
    }

    #[test]
    fn test_time_name_collision() {
        let decoded = decode(&json!({
            "type": "DataRecord",
            "fields": [ { "type": "Time", "name": "time" } ]
        }))
        .unwrap();
        let names: Vec<&str> = decoded.children().iter().map(Component::name).collect();
        assert_eq!(names, vec!["time_1", "time"]);
    }

    #[test]
    fn test_nameless_scalar_root() {
        let decoded = decode(&json!({ "type": "Boolean" })).unwrap();
        assert_eq!(decoded.name(), "result_rec");
        assert_eq!(decoded.children()[1].name(), "result");
    }

    #[test]
    fn test_encode_filters_nested_envelope_fields() {
        let encoded = encode(&cat_sensor()).unwrap();
        let fields = encoded["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0]["name"], "pos");
        assert_eq!(encoded["name"], "cat_sensor_data");
    }

    #[test]
    fn test_encode_keeps_root_with_envelope_definition() {
        let root = ComponentBuilder::time()
            .name("time")
            .as_phenomenon_time_iso_utc()
            .build();
        let encoded = encode(&root).unwrap();
        assert_eq!(encoded["type"], "Time");
        assert_eq!(encoded["definition"], DEF_PHENOMENON_TIME);
    }

    #[test]
    fn test_encode_omits_absent_optionals() {
        let encoded = encode(
            &ComponentBuilder::record()
                .field("flag", ComponentBuilder::boolean())
                .build(),
        )
        .unwrap();
        assert_eq!(
            encoded,
            json!({ "type": "DataRecord", "fields": [ { "type": "Boolean", "name": "flag" } ] })
        );
    }

    #[test]
    fn test_round_trip_preserves_order_and_definitions() {
        let schema = ComponentBuilder::record()
            .name("station")
            .field("time", ComponentBuilder::time().as_phenomenon_time_iso_utc())
            .field(
                "readings",
                ComponentBuilder::array(
                    ComponentBuilder::record()
                        .field("depth", ComponentBuilder::quantity().uom_code("m"))
                        .field("level", ComponentBuilder::quantity().uom_code("m")),
                )
                .element_count(3),
            )
            .field("status", ComponentBuilder::category().code_space("urn:x-status"))
            .field("ok", ComponentBuilder::boolean())
            .field("n", ComponentBuilder::count().definition("urn:x-count"))
            .build();

        let encoded = encode(&schema).unwrap();
        assert_eq!(encoded["fields"].as_array().unwrap().len(), 4);

        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded, schema);
    }

    #[test]
    fn test_serde_adapter_applies_codec() {
        #[derive(::serde::Serialize, ::serde::Deserialize)]
        struct Holder {
            #[serde(with = "crate::schema::serde")]
            schema: Component,
            #[serde(with = "crate::schema::serde::option", default)]
            extra: Option<Component>,
        }

        let holder: Holder = serde_json::from_value(json!({
            "schema": { "type": "Count", "name": "hits" }
        }))
        .unwrap();
        assert_eq!(holder.schema.name(), "hits_rec");
        assert!(holder.extra.is_none());

        let back = serde_json::to_value(&holder).unwrap();
        assert_eq!(back["schema"]["fields"].as_array().unwrap().len(), 1);
        assert_eq!(back["extra"], Value::Null);
    }

    #[test]
    fn test_unknown_type_is_unsupported() {
        let err = decode(&json!({
            "type": "DataRecord",
            "fields": [ { "type": "Matrix", "name": "m" } ]
        }))
        .unwrap_err();
        assert_eq!(err, SweError::unsupported("Matrix"));
    }

    #[test]
    fn test_malformed_inputs() {
        assert!(matches!(
            decode(&json!([1, 2])),
            Err(SweError::MalformedDocument { .. })
        ));
        assert!(matches!(
            decode(&json!({ "name": "x" })),
            Err(SweError::MalformedDocument { .. })
        ));
        assert!(matches!(
            decode(&json!({ "type": "DataRecord", "fields": [ { "type": "Count" } ] })),
            Err(SweError::MalformedDocument { .. })
        ));
        assert!(matches!(
            from_str("{\"type\": "),
            Err(SweError::MalformedDocument { .. })
        ));
    }

    #[test]
    fn test_parameters_record_is_not_normalized() {
        let json = json!({
            "type": "DataRecord",
            "name": "params",
            "fields": [
                { "type": "Time", "name": "run", "definition": DEF_SAMPLING_TIME },
                { "type": "Quantity", "name": "gain" }
            ]
        });
        let record = decode_record(&json).unwrap();
        assert_eq!(record.fields.len(), 2);
        assert_eq!(encode_record(&record).unwrap(), json);

        let untimed = decode_record(&json!({
            "type": "DataRecord",
            "fields": [ { "type": "Count", "name": "n" } ]
        }))
        .unwrap();
        assert_eq!(untimed.fields.len(), 1);
    }

    #[test]
    fn test_parameters_record_checks() {
        assert_eq!(
            decode_record(&json!({
                "type": "DataRecord",
                "fields": [ { "type": "Matrix", "name": "m" } ]
            })),
            Err(SweError::unsupported("Matrix"))
        );
        assert!(matches!(
            decode_record(&json!({
                "type": "DataRecord",
                "fields": [
                    { "type": "Count", "name": "a" },
                    { "type": "Count", "name": "a" }
                ]
            })),
            Err(SweError::MalformedDocument { .. })
        ));
        assert!(matches!(
            decode_record(&json!({ "type": "DataRecord", "fields": [ { "type": "Count" } ] })),
            Err(SweError::MalformedDocument { .. })
        ));
        assert_eq!(
            decode_record(&json!({ "type": "Boolean", "name": "on" })),
            Err(SweError::mismatch("", "DataRecord", "Boolean"))
        );
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = decode(&json!({
            "type": "DataRecord",
            "fields": [
                { "type": "Quantity", "name": "a" },
                { "type": "Count", "name": "a" }
            ]
        }))
        .unwrap_err();
        assert!(matches!(err, SweError::MalformedDocument { .. }));
    }
}
