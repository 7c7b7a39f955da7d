//! # SWE Common - self-describing observation results
//!
//! Data streams of a Connected Systems server advertise the shape of their
//! observation results as a tree of SWE Common data components. This crate
//! models that tree and provides the two JSON codecs a client needs:
//!
//! - **Schema codec** ([`schema`]): [`Component`] ⇄ JSON. Encoding drops record
//!   fields that duplicate the observation envelope (phenomenon, sampling,
//!   forecast and run times); decoding guarantees a time stamp field exists.
//! - **Value codec** ([`ValueCodec`]): [`Block`] ⇄ JSON, bound to one schema at
//!   construction. Filtered fields are recovered from an [`EnvelopeContext`].
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use swe_common::{schema, Block, Result, ValueCodec};
//!
//! fn example() -> Result<()> {
//!     let schema = schema::decode(&json!({
//!         "type": "Quantity",
//!         "name": "temp",
//!         "uom": { "code": "Cel" }
//!     }))?;
//!     assert_eq!(schema.name(), "temp_rec");
//!
//!     let codec = ValueCodec::new(&schema);
//!     let block = codec.decode(&json!({ "temp": 21.5 }))?;
//!     assert_eq!(block.field(&schema, "temp"), Some(&Block::Quantity(21.5)));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod block;
pub mod builder;
pub mod component;
pub mod definitions;
pub mod error;
pub mod schema;
pub mod value;

pub use block::Block;
pub use builder::ComponentBuilder;
pub use component::{Component, ComponentInfo, Record, UnitOfMeasure};
pub use error::{Result, SweError};
pub use value::{EnvelopeContext, ValueCodec};

/// Media types for observation encodings
pub mod media_type {
    /// application/om+json
    pub const OM_JSON: &str = "application/om+json";
}
