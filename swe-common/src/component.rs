//! SWE Common data components
//!
//! A [`Component`] is one node of a self-describing result schema. Scalar
//! variants describe a single value; aggregate variants (`DataRecord`,
//! `Vector`, `DataArray`, `DataChoice`) carry ordered children. Child order is
//! significant: value trees are positionally aligned with it.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::definitions::{self, is_envelope_duplicated};
use crate::{Result, SweError};

/// Properties shared by every component variant
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComponentInfo {
    /// Local identifier, unique among siblings
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Semantic definition URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,

    /// Human-readable label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Unit of measure, given either as a UCUM code or as a reference URI
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitOfMeasure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl UnitOfMeasure {
    pub fn code<S: Into<String>>(code: S) -> Self {
        Self {
            code: Some(code.into()),
            href: None,
        }
    }

    pub fn href<S: Into<String>>(href: S) -> Self {
        Self {
            code: None,
            href: Some(href.into()),
        }
    }
}

/// Scalar without extra attributes (`Boolean`, `Text`, `Count`)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scalar {
    #[serde(flatten)]
    pub info: ComponentInfo,
}

/// Categorical value drawn from an optional code space
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(flatten)]
    pub info: ComponentInfo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_space: Option<String>,
}

/// Decimal measurement with a unit
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Quantity {
    #[serde(flatten)]
    pub info: ComponentInfo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uom: Option<UnitOfMeasure>,
}

/// Timestamp; values travel as ISO-8601 strings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeComponent {
    #[serde(flatten)]
    pub info: ComponentInfo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_frame: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uom: Option<UnitOfMeasure>,
}

/// Fixed-length tuple of coordinates in a reference frame
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vector {
    #[serde(flatten)]
    pub info: ComponentInfo,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_frame: Option<String>,

    #[serde(default)]
    pub coordinates: Vec<Component>,
}

/// Named, ordered fields
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(flatten)]
    pub info: ComponentInfo,

    #[serde(default)]
    pub fields: Vec<Component>,
}

/// Homogeneous sequence of an element type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataArray {
    #[serde(flatten)]
    pub info: ComponentInfo,

    /// Fixed number of elements, if the array is not variable-size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_count: Option<u32>,

    pub element_type: Box<Component>,
}

/// Exactly one of several alternative items
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Choice {
    #[serde(flatten)]
    pub info: ComponentInfo,

    #[serde(default)]
    pub items: Vec<Component>,
}

/// A node of a result schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Component {
    Boolean(Scalar),
    Text(Scalar),
    Category(Category),
    Count(Scalar),
    Quantity(Quantity),
    Time(TimeComponent),
    Vector(Vector),
    #[serde(rename = "DataRecord")]
    Record(Record),
    #[serde(rename = "DataArray")]
    Array(DataArray),
    #[serde(rename = "DataChoice")]
    Choice(Choice),
}

impl Component {
    /// Wire discriminators of every supported variant
    pub const TYPE_NAMES: [&'static str; 10] = [
        "Boolean",
        "Text",
        "Category",
        "Count",
        "Quantity",
        "Time",
        "Vector",
        "DataRecord",
        "DataArray",
        "DataChoice",
    ];

    /// Wire discriminator of this component
    pub fn type_name(&self) -> &'static str {
        match self {
            Component::Boolean(_) => "Boolean",
            Component::Text(_) => "Text",
            Component::Category(_) => "Category",
            Component::Count(_) => "Count",
            Component::Quantity(_) => "Quantity",
            Component::Time(_) => "Time",
            Component::Vector(_) => "Vector",
            Component::Record(_) => "DataRecord",
            Component::Array(_) => "DataArray",
            Component::Choice(_) => "DataChoice",
        }
    }

    pub fn info(&self) -> &ComponentInfo {
        match self {
            Component::Boolean(c) | Component::Text(c) | Component::Count(c) => &c.info,
            Component::Category(c) => &c.info,
            Component::Quantity(c) => &c.info,
            Component::Time(c) => &c.info,
            Component::Vector(c) => &c.info,
            Component::Record(c) => &c.info,
            Component::Array(c) => &c.info,
            Component::Choice(c) => &c.info,
        }
    }

    pub fn info_mut(&mut self) -> &mut ComponentInfo {
        match self {
            Component::Boolean(c) | Component::Text(c) | Component::Count(c) => &mut c.info,
            Component::Category(c) => &mut c.info,
            Component::Quantity(c) => &mut c.info,
            Component::Time(c) => &mut c.info,
            Component::Vector(c) => &mut c.info,
            Component::Record(c) => &mut c.info,
            Component::Array(c) => &mut c.info,
            Component::Choice(c) => &mut c.info,
        }
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }

    pub fn definition(&self) -> Option<&str> {
        self.info().definition.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.info().label.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.info().description.as_deref()
    }

    /// Ordered children; a `DataArray` has exactly one, its element type
    pub fn children(&self) -> &[Component] {
        match self {
            Component::Vector(v) => &v.coordinates,
            Component::Record(r) => &r.fields,
            Component::Array(a) => std::slice::from_ref(a.element_type.as_ref()),
            Component::Choice(c) => &c.items,
            _ => &[],
        }
    }

    pub fn children_mut(&mut self) -> &mut [Component] {
        match self {
            Component::Vector(v) => &mut v.coordinates,
            Component::Record(r) => &mut r.fields,
            Component::Array(a) => std::slice::from_mut(a.element_type.as_mut()),
            Component::Choice(c) => &mut c.items,
            _ => &mut [],
        }
    }

    /// Direct child with the given name
    pub fn child(&self, name: &str) -> Option<&Component> {
        self.children().iter().find(|c| c.name() == name)
    }

    /// Position of the direct child with the given name
    pub fn child_index(&self, name: &str) -> Option<usize> {
        self.children().iter().position(|c| c.name() == name)
    }

    /// Depth-first, pre-order traversal starting with this component
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// First component in the tree carrying the given definition
    pub fn find_by_definition(&self, definition: &str) -> Option<&Component> {
        self.iter().find(|c| c.definition() == Some(definition))
    }

    /// Whether the tree holds a `Time` carrying an envelope-duplicated definition
    pub fn has_time_stamp(&self) -> bool {
        self.iter()
            .any(|c| matches!(c, Component::Time(_)) && is_envelope_duplicated(c.definition()))
    }

    /// Check that sibling names are unique and that record fields and choice
    /// items are named.
    pub fn validate(&self) -> Result<()> {
        self.validate_at("")
    }

    fn validate_at(&self, path: &str) -> Result<()> {
        let keyed = matches!(self, Component::Record(_) | Component::Choice(_));
        let mut seen = HashSet::new();

        for (i, child) in self.children().iter().enumerate() {
            let name = child.name();
            if name.is_empty() {
                if keyed {
                    return Err(SweError::malformed(format!(
                        "{} child at {}/{} has no name",
                        self.type_name(),
                        path,
                        i
                    )));
                }
            } else if !seen.insert(name) {
                return Err(SweError::malformed(format!(
                    "duplicate component name '{}' under {}",
                    name,
                    if path.is_empty() { "/" } else { path }
                )));
            }

            let segment = if name.is_empty() { i.to_string() } else { name.to_string() };
            child.validate_at(&format!("{}/{}", path, segment))?;
        }

        Ok(())
    }
}

impl Default for Component {
    fn default() -> Self {
        Component::Record(Record::default())
    }
}

/// Pre-order iterator over a component tree
#[derive(Debug)]
pub struct Iter<'a> {
    stack: Vec<&'a Component>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Component;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children().iter().rev());
        Some(next)
    }
}

impl<'a> IntoIterator for &'a Component {
    type Item = &'a Component;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Synthetic phenomenon-time field used when a schema declares none
pub(crate) fn phenomenon_time_field(name: &str) -> Component {
    Component::Time(TimeComponent {
        info: ComponentInfo {
            name: name.to_string(),
            definition: Some(definitions::DEF_PHENOMENON_TIME.to_string()),
            label: None,
            description: None,
        },
        reference_frame: Some(definitions::TIME_REF_UTC.to_string()),
        uom: Some(UnitOfMeasure::href(definitions::UOM_ISO8601)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ComponentBuilder;

    fn sample() -> Component {
        ComponentBuilder::record()
            .name("weather")
            .field(
                "time",
                ComponentBuilder::time().as_sampling_time_iso_utc(),
            )
            .field("temp", ComponentBuilder::quantity().uom_code("Cel"))
            .field(
                "wind",
                ComponentBuilder::vector()
                    .field("speed", ComponentBuilder::quantity())
                    .field("dir", ComponentBuilder::quantity()),
            )
            .build()
    }

    #[test]
    fn test_preorder_iteration() {
        let schema = sample();
        let names: Vec<&str> = schema.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["weather", "time", "temp", "wind", "speed", "dir"]);
    }

    #[test]
    fn test_has_time_stamp() {
        assert!(sample().has_time_stamp());

        let no_def = ComponentBuilder::record()
            .field("t", ComponentBuilder::time())
            .build();
        assert!(!no_def.has_time_stamp());
    }

    #[test]
    fn test_array_children_is_element_type() {
        let array = ComponentBuilder::array(ComponentBuilder::count().name("n"))
            .name("counts")
            .build();
        assert_eq!(array.children().len(), 1);
        assert_eq!(array.children()[0].name(), "n");
    }

    #[test]
    fn test_validate_rejects_duplicate_siblings() {
        let schema = ComponentBuilder::record()
            .field("a", ComponentBuilder::quantity())
            .field("a", ComponentBuilder::count())
            .build();
        assert!(matches!(
            schema.validate(),
            Err(SweError::MalformedDocument { .. })
        ));
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_find_by_definition() {
        let schema = sample();
        let time = schema
            .find_by_definition(definitions::DEF_SAMPLING_TIME)
            .unwrap();
        assert_eq!(time.name(), "time");
        assert!(schema.find_by_definition(definitions::DEF_RUN_TIME).is_none());
    }

    #[test]
    fn test_child_lookup() {
        let schema = sample();
        assert_eq!(schema.child_index("temp"), Some(1));
        assert_eq!(schema.child("wind").map(|c| c.type_name()), Some("Vector"));
        assert!(schema.child("missing").is_none());
    }
}
