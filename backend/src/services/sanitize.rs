//! Strip sensitive fields from upstream payloads before they leave the proxy

use std::collections::HashSet;

use serde_json::Value;

/// Removes configured keys from JSON objects at any depth
#[derive(Debug, Clone)]
pub struct Sanitizer {
    keys: HashSet<String>,
}

impl Sanitizer {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keys: keys
                .into_iter()
                .map(|key| key.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    fn is_sensitive(&self, key: &str) -> bool {
        self.keys.contains(&key.to_ascii_lowercase())
    }

    /// Remove sensitive keys in place, returning how many were removed
    pub fn sanitize(&self, value: &mut Value) -> usize {
        match value {
            Value::Object(map) => {
                let before = map.len();
                map.retain(|key, _| !self.is_sensitive(key));
                let mut removed = before - map.len();
                for child in map.values_mut() {
                    removed += self.sanitize(child);
                }
                removed
            }
            Value::Array(items) => items.iter_mut().map(|item| self.sanitize(item)).sum(),
            _ => 0,
        }
    }

    pub fn sanitized(&self, mut value: Value) -> Value {
        let removed = self.sanitize(&mut value);
        if removed > 0 {
            tracing::debug!(removed, "Removed sensitive fields from upstream response");
        }
        value
    }
}
