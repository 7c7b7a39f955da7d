//! Query parameter builders for collection requests
//!
//! Parameters with empty keys or values are dropped, so setters can be called
//! unconditionally.

use std::collections::BTreeMap;
use std::fmt::Display;

use tracing::warn;

use crate::models::TimeExtent;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryStringBuilder {
    parameters: BTreeMap<String, String>,
}

impl QueryStringBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut builder = Self::new();
        for (key, value) in entries {
            builder.add(key, value);
        }
        builder
    }

    pub fn add<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) -> &mut Self {
        let (key, value) = (key.into(), value.into());
        if !key.is_empty() && !value.is_empty() {
            self.parameters.insert(key, value);
        }
        self
    }

    pub fn add_value<T: Display>(&mut self, key: &str, value: T) -> &mut Self {
        self.add(key, value.to_string())
    }

    /// Comma-separated list
    pub fn add_list<I>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        let csv = values
            .into_iter()
            .map(|v| v.to_string())
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        self.add(key, csv)
    }

    pub fn add_time_extent(&mut self, key: &str, extent: &TimeExtent) -> &mut Self {
        match extent.to_iso_string() {
            Ok(iso) => self.add(key, iso),
            Err(e) => {
                warn!(key = key, error = %e, "Dropping unformattable time parameter");
                self
            }
        }
    }

    pub fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// `?k=v&...` without percent-encoding, or an empty string
    pub fn query_string(&self) -> String {
        if self.parameters.is_empty() {
            return String::new();
        }
        let pairs = self
            .parameters
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{pairs}")
    }
}

macro_rules! query_builder {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            query: QueryStringBuilder,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            pub fn limit(mut self, limit: u32) -> Self {
                self.query.add_value("limit", limit);
                self
            }

            pub fn parameters(&self) -> &BTreeMap<String, String> {
                self.query.parameters()
            }
        }

        impl From<$name> for QueryStringBuilder {
            fn from(builder: $name) -> Self {
                builder.query
            }
        }
    };
}

query_builder!(
    /// Filters for `/datastreams/{id}/observations`
    ObservationsQuery
);

query_builder!(
    /// Filters for `/datastreams` and `/systems/{id}/datastreams`
    DataStreamsQuery
);

query_builder!(
    /// Filters for `/systems` and `/systems/{id}/subsystems`
    SystemsQuery
);

impl ObservationsQuery {
    pub fn id<I: IntoIterator<Item = S>, S: Display>(mut self, ids: I) -> Self {
        self.query.add_list("id", ids);
        self
    }

    pub fn phenomenon_time(mut self, extent: &TimeExtent) -> Self {
        self.query.add_time_extent("phenomenonTime", extent);
        self
    }

    pub fn result_time(mut self, extent: &TimeExtent) -> Self {
        self.query.add_time_extent("resultTime", extent);
        self
    }

    /// Features of interest
    pub fn foi<I: IntoIterator<Item = S>, S: Display>(mut self, ids: I) -> Self {
        self.query.add_list("foi", ids);
        self
    }

    pub fn observed_property<I: IntoIterator<Item = S>, S: Display>(mut self, uris: I) -> Self {
        self.query.add_list("observedProperty", uris);
        self
    }
}

impl DataStreamsQuery {
    /// Full-text keywords
    pub fn q<I: IntoIterator<Item = S>, S: Display>(mut self, keywords: I) -> Self {
        self.query.add_list("q", keywords);
        self
    }

    pub fn phenomenon_time(mut self, extent: &TimeExtent) -> Self {
        self.query.add_time_extent("phenomenonTime", extent);
        self
    }

    pub fn result_time(mut self, extent: &TimeExtent) -> Self {
        self.query.add_time_extent("resultTime", extent);
        self
    }
}

impl SystemsQuery {
    pub fn id<I: IntoIterator<Item = S>, S: Display>(mut self, ids: I) -> Self {
        self.query.add_list("id", ids);
        self
    }

    /// Exact match on the system's unique identifier
    pub fn uid<S: Into<String>>(mut self, uid: S) -> Self {
        self.query.add("uid", uid);
        self
    }

    /// `minLon,minLat,maxLon,maxLat`
    pub fn bbox(mut self, bbox: [f64; 4]) -> Self {
        self.query.add_list("bbox", bbox);
        self
    }

    pub fn datetime(mut self, extent: &TimeExtent) -> Self {
        self.query.add_time_extent("datetime", extent);
        self
    }

    /// WKT geometry the system location must intersect
    pub fn geom<S: Into<String>>(mut self, wkt: S) -> Self {
        self.query.add("geom", wkt);
        self
    }

    pub fn q<I: IntoIterator<Item = S>, S: Display>(mut self, keywords: I) -> Self {
        self.query.add_list("q", keywords);
        self
    }

    pub fn parent<I: IntoIterator<Item = S>, S: Display>(mut self, ids: I) -> Self {
        self.query.add_list("parent", ids);
        self
    }

    pub fn foi<I: IntoIterator<Item = S>, S: Display>(mut self, ids: I) -> Self {
        self.query.add_list("foi", ids);
        self
    }

    pub fn observed_property<I: IntoIterator<Item = S>, S: Display>(mut self, uris: I) -> Self {
        self.query.add_list("observedProperty", uris);
        self
    }

    /// Include nested subsystems
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.query.add_value("recursive", recursive);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeBound;
    use time::macros::datetime;

    #[test]
    fn test_empty_values_are_dropped() {
        let mut builder = QueryStringBuilder::new();
        builder.add("", "x").add("a", "").add_list("ids", Vec::<String>::new());
        assert!(builder.is_empty());
        assert_eq!(builder.query_string(), "");
    }

    #[test]
    fn test_list_is_comma_joined() {
        let query = ObservationsQuery::new()
            .id(["obs1", "obs2"])
            .foi(["f1"])
            .limit(50);
        assert_eq!(query.parameters()["id"], "obs1,obs2");
        assert_eq!(query.parameters()["foi"], "f1");
        assert_eq!(query.parameters()["limit"], "50");
    }

    #[test]
    fn test_time_extent_parameter() {
        let query = ObservationsQuery::new().phenomenon_time(&TimeExtent::period(
            datetime!(2024-01-01 0:00 UTC),
            TimeBound::Now,
        ));
        assert_eq!(query.parameters()["phenomenonTime"], "2024-01-01T00:00:00Z/now");
    }

    #[test]
    fn test_query_string_is_sorted() {
        let builder = QueryStringBuilder::from_map([("uid", "urn:x"), ("cascade", "true")]);
        assert_eq!(builder.query_string(), "?cascade=true&uid=urn:x");
    }

    #[test]
    fn test_systems_query() {
        let query = SystemsQuery::new()
            .bbox([-10.0, 40.5, 5.0, 52.0])
            .recursive(true)
            .uid("urn:osh:sensor:1");
        assert_eq!(query.parameters()["bbox"], "-10,40.5,5,52");
        assert_eq!(query.parameters()["recursive"], "true");
        assert_eq!(query.parameters()["uid"], "urn:osh:sensor:1");
    }
}
