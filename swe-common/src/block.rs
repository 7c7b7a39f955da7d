//! Value trees bound to a result schema

use time::OffsetDateTime;

use crate::Component;

/// Concrete values of one result, aligned node-for-node with the
/// [`Component`] tree it was decoded against.
///
/// A block carries no schema information: interpreting it requires the
/// schema it was produced from.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Field not carried by the payload and not supplied by the envelope
    Absent,
    Boolean(bool),
    /// Value of a `Text` or `Category`
    Text(String),
    Count(i64),
    Quantity(f64),
    Time(OffsetDateTime),
    Record(Vec<Block>),
    Vector(Vec<Block>),
    /// One value per array element, each bound to the element type
    Array(Vec<Block>),
    /// Selected item index and its value
    Choice { index: usize, value: Box<Block> },
}

impl Block {
    /// Short name of the value kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Absent => "absent",
            Block::Boolean(_) => "boolean",
            Block::Text(_) => "text",
            Block::Count(_) => "count",
            Block::Quantity(_) => "quantity",
            Block::Time(_) => "time",
            Block::Record(_) => "record",
            Block::Vector(_) => "vector",
            Block::Array(_) => "array",
            Block::Choice { .. } => "choice",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Block::Absent)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Block::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Block::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Block::Count(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value of a `Quantity` or `Count`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Block::Quantity(v) => Some(*v),
            Block::Count(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<OffsetDateTime> {
        match self {
            Block::Time(t) => Some(*t),
            _ => None,
        }
    }

    /// Ordered child values of an aggregate
    pub fn children(&self) -> &[Block] {
        match self {
            Block::Record(v) | Block::Vector(v) | Block::Array(v) => v,
            Block::Choice { value, .. } => std::slice::from_ref(value.as_ref()),
            _ => &[],
        }
    }

    /// Value of the named child, resolved through the schema this block was
    /// decoded against
    pub fn field<'a>(&'a self, schema: &Component, name: &str) -> Option<&'a Block> {
        match (schema, self) {
            (Component::Choice(choice), Block::Choice { index, value }) => choice
                .items
                .get(*index)
                .filter(|item| item.name() == name)
                .map(|_| value.as_ref()),
            (Component::Array(_), _) => None,
            _ => schema
                .child_index(name)
                .and_then(|index| self.children().get(index)),
        }
    }

    /// Follow a `/`-separated path of child names, e.g. `"location/lat"`
    pub fn lookup<'a>(&'a self, schema: &Component, path: &str) -> Option<&'a Block> {
        let mut schema = schema;
        let mut block = self;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            block = block.field(schema, segment)?;
            schema = schema.child(segment)?;
        }
        Some(block)
    }
}
