//! Routing keys and the burst tracker table.

use crate::WindowTracker;
use derive_getters::Getters;
use reqwest::Method;
use std::collections::HashMap;

/// The (resource type, operation) pair selecting a burst tracker.
///
/// # Example
///
/// ```
/// use layerpace_rate_limit::RoutingKey;
/// use reqwest::Method;
///
/// let key = RoutingKey::extract("/api/skus/xYZkjABcde", &Method::PATCH, "/api/").unwrap();
/// assert_eq!(key.resource_type(), "skus");
/// assert_eq!(key.to_string(), "skus:PATCH");
///
/// assert!(RoutingKey::extract("/oauth/token", &Method::POST, "/api/").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Getters, derive_more::Display)]
#[display("{}:{}", resource_type, operation)]
pub struct RoutingKey {
    /// First path segment after the API marker.
    resource_type: String,
    /// HTTP method of the request.
    operation: Method,
}

impl RoutingKey {
    /// Create a key directly.
    pub fn new(resource_type: impl Into<String>, operation: Method) -> Self {
        Self {
            resource_type: resource_type.into(),
            operation,
        }
    }

    /// Classify a request path.
    ///
    /// Returns `None` when the marker does not occur in `path` or nothing
    /// follows it. Such requests are not throttled.
    pub fn extract(path: &str, method: &Method, marker: &str) -> Option<Self> {
        let start = path.find(marker)? + marker.len();
        let resource_type = path[start..].split('/').next().filter(|s| !s.is_empty())?;
        Some(Self::new(resource_type, method.clone()))
    }
}

/// Burst trackers keyed by resource type, then by operation.
///
/// Entries are created on first use and never removed.
#[derive(Debug, Default)]
pub struct BurstTable {
    trackers: HashMap<String, HashMap<Method, WindowTracker>>,
}

impl BurstTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker for `key`, created and anchored now if missing.
    pub fn tracker_mut(&mut self, key: &RoutingKey) -> &mut WindowTracker {
        self.trackers
            .entry(key.resource_type.clone())
            .or_default()
            .entry(key.operation.clone())
            .or_insert_with(WindowTracker::starting_now)
    }

    /// Tracker for `key`, if one exists.
    pub fn get(&self, key: &RoutingKey) -> Option<&WindowTracker> {
        self.trackers.get(&key.resource_type)?.get(&key.operation)
    }

    /// Every key with a tracker, ordered by resource type then method.
    pub fn routes(&self) -> Vec<RoutingKey> {
        let mut routes: Vec<RoutingKey> = self
            .trackers
            .iter()
            .flat_map(|(resource_type, by_method)| {
                by_method
                    .keys()
                    .map(|method| RoutingKey::new(resource_type.clone(), method.clone()))
            })
            .collect();
        routes.sort_by(|a, b| {
            a.resource_type
                .cmp(&b.resource_type)
                .then_with(|| a.operation.as_str().cmp(b.operation.as_str()))
        });
        routes
    }

    /// Number of trackers across all resource types.
    pub fn len(&self) -> usize {
        self.trackers.values().map(HashMap::len).sum()
    }

    /// True when no tracker has been created yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const MARKER: &str = "/api/";

    #[test]
    fn test_extract_resource_type() {
        let key = RoutingKey::extract("/api/orders", &Method::GET, MARKER).unwrap();
        assert_eq!(key, RoutingKey::new("orders", Method::GET));

        let key = RoutingKey::extract("/api/orders/abc/line_items", &Method::DELETE, MARKER)
            .unwrap();
        assert_eq!(key, RoutingKey::new("orders", Method::DELETE));
    }

    #[test]
    fn test_extract_with_prefix_before_marker() {
        let key = RoutingKey::extract("/tenant/api/skus/1", &Method::GET, MARKER).unwrap();
        assert_eq!(key.resource_type(), "skus");
    }

    #[test]
    fn test_extract_without_marker() {
        assert!(RoutingKey::extract("/oauth/token", &Method::POST, MARKER).is_none());
        assert!(RoutingKey::extract("/api", &Method::GET, MARKER).is_none());
        assert!(RoutingKey::extract("", &Method::GET, MARKER).is_none());
    }

    #[test]
    fn test_extract_empty_segment_after_marker() {
        assert!(RoutingKey::extract("/api/", &Method::GET, MARKER).is_none());
        assert!(RoutingKey::extract("/api//skus", &Method::GET, MARKER).is_none());
    }

    #[test]
    fn test_table_creates_once_per_key() {
        let mut table = BurstTable::new();
        let skus_get = RoutingKey::new("skus", Method::GET);
        let skus_post = RoutingKey::new("skus", Method::POST);

        table.tracker_mut(&skus_get).register(true, Duration::from_secs(10));
        table.tracker_mut(&skus_get);
        table.tracker_mut(&skus_post);

        assert_eq!(table.len(), 2);
        assert!(table.get(&skus_get).unwrap().is_locked());
        assert!(!table.get(&skus_post).unwrap().is_locked());
        assert!(table.get(&RoutingKey::new("orders", Method::GET)).is_none());
    }

    #[test]
    fn test_routes_are_sorted() {
        let mut table = BurstTable::new();
        for key in [
            RoutingKey::new("skus", Method::POST),
            RoutingKey::new("orders", Method::GET),
            RoutingKey::new("skus", Method::GET),
        ] {
            table.tracker_mut(&key);
        }

        let routes: Vec<String> = table.routes().iter().map(ToString::to_string).collect();
        assert_eq!(routes, vec!["orders:GET", "skus:GET", "skus:POST"]);
    }
}
