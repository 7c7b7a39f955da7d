//! Builder pattern for creating result schemas

use crate::component::{
    Category, Choice, Component, ComponentInfo, DataArray, Quantity, Record, Scalar,
    TimeComponent, UnitOfMeasure, Vector,
};
use crate::definitions;

/// Builder for [`Component`] trees with a fluent API
///
/// Attribute setters that do not apply to the variant being built are ignored.
///
/// ```rust
/// use swe_common::ComponentBuilder;
///
/// let schema = ComponentBuilder::record()
///     .name("weather")
///     .field("time", ComponentBuilder::time().as_phenomenon_time_iso_utc())
///     .field("temp", ComponentBuilder::quantity().uom_code("Cel"))
///     .build();
///
/// assert_eq!(schema.children().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ComponentBuilder {
    component: Component,
}

impl ComponentBuilder {
    fn from_component(component: Component) -> Self {
        Self { component }
    }

    pub fn boolean() -> Self {
        Self::from_component(Component::Boolean(Scalar::default()))
    }

    pub fn text() -> Self {
        Self::from_component(Component::Text(Scalar::default()))
    }

    pub fn category() -> Self {
        Self::from_component(Component::Category(Category::default()))
    }

    pub fn count() -> Self {
        Self::from_component(Component::Count(Scalar::default()))
    }

    pub fn quantity() -> Self {
        Self::from_component(Component::Quantity(Quantity::default()))
    }

    pub fn time() -> Self {
        Self::from_component(Component::Time(TimeComponent::default()))
    }

    pub fn vector() -> Self {
        Self::from_component(Component::Vector(Vector::default()))
    }

    pub fn record() -> Self {
        Self::from_component(Component::Record(Record::default()))
    }

    pub fn choice() -> Self {
        Self::from_component(Component::Choice(Choice::default()))
    }

    /// Start an array of the given element type
    pub fn array<C: Into<Component>>(element_type: C) -> Self {
        Self::from_component(Component::Array(DataArray {
            info: ComponentInfo::default(),
            element_count: None,
            element_type: Box::new(element_type.into()),
        }))
    }

    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.component.info_mut().name = name.into();
        self
    }

    pub fn definition<S: Into<String>>(mut self, definition: S) -> Self {
        self.component.info_mut().definition = Some(definition.into());
        self
    }

    pub fn label<S: Into<String>>(mut self, label: S) -> Self {
        self.component.info_mut().label = Some(label.into());
        self
    }

    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.component.info_mut().description = Some(description.into());
        self
    }

    /// Set a UCUM unit code on a `Quantity` or `Time`
    pub fn uom_code<S: Into<String>>(self, code: S) -> Self {
        self.uom(UnitOfMeasure::code(code))
    }

    /// Set a unit reference URI on a `Quantity` or `Time`
    pub fn uom_href<S: Into<String>>(self, href: S) -> Self {
        self.uom(UnitOfMeasure::href(href))
    }

    fn uom(mut self, uom: UnitOfMeasure) -> Self {
        match &mut self.component {
            Component::Quantity(q) => q.uom = Some(uom),
            Component::Time(t) => t.uom = Some(uom),
            _ => {}
        }
        self
    }

    /// Set the code space of a `Category`
    pub fn code_space<S: Into<String>>(mut self, code_space: S) -> Self {
        if let Component::Category(c) = &mut self.component {
            c.code_space = Some(code_space.into());
        }
        self
    }

    /// Set the reference frame of a `Time` or `Vector`
    pub fn reference_frame<S: Into<String>>(mut self, frame: S) -> Self {
        match &mut self.component {
            Component::Time(t) => t.reference_frame = Some(frame.into()),
            Component::Vector(v) => v.reference_frame = Some(frame.into()),
            _ => {}
        }
        self
    }

    /// Fix the number of elements of a `DataArray`
    pub fn element_count(mut self, count: u32) -> Self {
        if let Component::Array(a) = &mut self.component {
            a.element_count = Some(count);
        }
        self
    }

    /// Append a named child: a record field, vector coordinate or choice item
    pub fn field<S: Into<String>, C: Into<Component>>(mut self, name: S, child: C) -> Self {
        let mut child = child.into();
        child.info_mut().name = name.into();
        match &mut self.component {
            Component::Record(r) => r.fields.push(child),
            Component::Vector(v) => v.coordinates.push(child),
            Component::Choice(c) => c.items.push(child),
            _ => {}
        }
        self
    }

    /// ISO-8601 UTC timestamp carrying the phenomenon time definition
    pub fn as_phenomenon_time_iso_utc(self) -> Self {
        self.iso_utc(definitions::DEF_PHENOMENON_TIME)
    }

    /// ISO-8601 UTC timestamp carrying the sampling time definition
    pub fn as_sampling_time_iso_utc(self) -> Self {
        self.iso_utc(definitions::DEF_SAMPLING_TIME)
    }

    fn iso_utc(self, definition: &str) -> Self {
        self.definition(definition)
            .reference_frame(definitions::TIME_REF_UTC)
            .uom_href(definitions::UOM_ISO8601)
    }

    pub fn build(self) -> Component {
        self.component
    }
}

impl From<ComponentBuilder> for Component {
    fn from(builder: ComponentBuilder) -> Self {
        builder.build()
    }
}
