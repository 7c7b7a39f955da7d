//! Well-known definition URIs and the envelope-field filter
//!
//! Observation resources already expose their timestamps as top-level
//! properties (`phenomenonTime`, `resultTime`). Schema fields carrying one of
//! the definitions below duplicate those properties and are kept out of the
//! embedded `result` payload.

/// Time at which the observed property applies
pub const DEF_PHENOMENON_TIME: &str = "http://www.opengis.net/def/property/OGC/0/PhenomenonTime";
/// Time at which the sample was taken
pub const DEF_SAMPLING_TIME: &str = "http://www.opengis.net/def/property/OGC/0/SamplingTime";
/// Time a forecast value applies to
pub const DEF_FORECAST_TIME: &str = "http://www.opengis.net/def/property/OGC/0/ForecastTime";
/// Time the producing model was run
pub const DEF_RUN_TIME: &str = "http://www.opengis.net/def/property/OGC/0/RunTime";

/// Unit of measure for ISO-8601 calendar timestamps
pub const UOM_ISO8601: &str = "http://www.opengis.net/def/uom/ISO-8601/0/Gregorian";
/// UTC temporal reference frame
pub const TIME_REF_UTC: &str = "http://www.opengis.net/def/trs/BIPM/0/UTC";

/// Definitions whose values are carried by the observation envelope
pub const ENVELOPE_DEFINITIONS: [&str; 4] = [
    DEF_PHENOMENON_TIME,
    DEF_SAMPLING_TIME,
    DEF_FORECAST_TIME,
    DEF_RUN_TIME,
];

/// Which observation property an envelope-duplicated field is recovered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeProperty {
    PhenomenonTime,
    ResultTime,
}

/// Check whether a definition belongs to the envelope-duplicated set
pub fn is_envelope_duplicated(definition: Option<&str>) -> bool {
    envelope_property(definition).is_some()
}

/// Map an envelope-duplicated definition to the property that carries it
pub fn envelope_property(definition: Option<&str>) -> Option<EnvelopeProperty> {
    match definition? {
        DEF_PHENOMENON_TIME | DEF_SAMPLING_TIME | DEF_FORECAST_TIME => {
            Some(EnvelopeProperty::PhenomenonTime)
        }
        DEF_RUN_TIME => Some(EnvelopeProperty::ResultTime),
        _ => None,
    }
}

/// Filter applied to the children of a record: keeps a field unless it has
/// a parent and duplicates an envelope property.
///
/// The root of a schema has no parent and is therefore always kept, even if
/// its own definition is in the envelope set.
pub fn keep_field(has_parent: bool, definition: Option<&str>) -> bool {
    !(has_parent && is_envelope_duplicated(definition))
}
