//! Resource models exchanged with a Connected Systems server

mod datastream;
mod link;
mod observation;
mod system;
mod time_extent;
mod types;

pub use datastream::{
    DataStreamResource, ObservationSchema, ObservationSchemaBuilder, ObservedProperty,
};
pub use link::Link;
pub use observation::ObservationResource;
pub(crate) use observation::ObservationDocument;
pub use system::{SystemProperties, SystemResource};
pub use time_extent::{TimeBound, TimeExtent};
pub use types::{DataStreamType, FeatureType, ResultType};
