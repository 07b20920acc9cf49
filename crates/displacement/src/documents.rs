//! In-memory store of raw signal documents.

use std::collections::BTreeMap;

use displacement_traits::SignalId;
use displacement_traits::probe;
use serde_json::Value;

/// One optional JSON document per signal.
///
/// A signal without an entry is a missing source; the engine still scores
/// every month for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalDocuments {
    documents: BTreeMap<SignalId, Value>,
}

impl SignalDocuments {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the document for `id`, returning any previous one.
    pub fn insert(&mut self, id: SignalId, document: Value) -> Option<Value> {
        self.documents.insert(id, document)
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, id: SignalId, document: Value) -> Self {
        self.documents.insert(id, document);
        self
    }

    /// Removes the document for `id`.
    pub fn remove(&mut self, id: SignalId) -> Option<Value> {
        self.documents.remove(&id)
    }

    /// The document for `id`, if loaded.
    pub fn get(&self, id: SignalId) -> Option<&Value> {
        self.documents.get(&id)
    }

    /// Number of loaded documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// True when nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Loaded documents in signal order.
    pub fn iter(&self) -> impl Iterator<Item = (SignalId, &Value)> {
        self.documents.iter().map(|(id, doc)| (*id, doc))
    }

    /// True when any loaded document declares `metadata.mock = true`.
    pub fn is_mock(&self) -> bool {
        self.documents.values().any(|doc| {
            probe::lookup(doc, &["metadata", "mock"])
                .and_then(Value::as_bool)
                .unwrap_or(false)
        })
    }
}

impl FromIterator<(SignalId, Value)> for SignalDocuments {
    fn from_iter<I: IntoIterator<Item = (SignalId, Value)>>(iter: I) -> Self {
        Self {
            documents: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_and_get() {
        let mut docs = SignalDocuments::new();
        assert!(docs.is_empty());
        assert!(docs.insert(SignalId::Github, json!({"monthly": []})).is_none());
        assert!(docs.insert(SignalId::Github, json!({})).is_some());
        assert_eq!(docs.len(), 1);
        assert_eq!(docs.get(SignalId::Github), Some(&json!({})));
        assert!(docs.get(SignalId::Trends).is_none());
    }

    #[test]
    fn test_iter_in_signal_order() {
        let docs: SignalDocuments = [
            (SignalId::Regulatory, json!({})),
            (SignalId::Employment, json!({})),
        ]
        .into_iter()
        .collect();
        let ids: Vec<SignalId> = docs.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, [SignalId::Employment, SignalId::Regulatory]);
    }

    #[test]
    fn test_mock_flag() {
        let docs = SignalDocuments::new()
            .with(SignalId::Employment, json!({"metadata": {"mock": false}}))
            .with(SignalId::VcFunding, json!({"aggregate": []}));
        assert!(!docs.is_mock());

        let docs = docs.with(SignalId::Trends, json!({"metadata": {"mock": true}}));
        assert!(docs.is_mock());

        // Only a real boolean counts.
        let docs = SignalDocuments::new().with(SignalId::Github, json!({"metadata": {"mock": "yes"}}));
        assert!(!docs.is_mock());
    }
}
