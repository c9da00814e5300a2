//! Named attribute storage shared by a context and its resources.

use crate::Error;
use parking_lot::RwLock;
use std::any::{Any, type_name};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

type Value = Arc<dyn Any + Send + Sync>;

/// Thread-safe, string-keyed attribute map shared by a context's users.
#[derive(Default)]
pub struct Attributes {
    values: RwLock<HashMap<String, Value>>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Typed lookup. `None` if absent or stored with another type.
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        self.get_raw(key).and_then(|value| value.downcast::<T>().ok())
    }

    pub fn get_raw(&self, key: &str) -> Option<Value> {
        self.values.read().get(key).cloned()
    }

    /// Store a value, returning the previous one.
    pub fn insert<T: Any + Send + Sync>(&self, key: impl Into<String>, value: T) -> Option<Value> {
        self.insert_arc(key, Arc::new(value))
    }

    pub fn insert_arc(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        trace!(key = %key, "Setting context attribute");
        self.values.write().insert(key, value)
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.values.write().remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.values.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    /// Return the value under `key`, computing and storing it first if
    /// absent. `init` runs at most once per key and must not touch this
    /// attribute map.
    pub fn get_or_insert_with<T, F>(&self, key: &str, init: F) -> Result<Arc<T>, Error>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> T,
    {
        self.get_or_try_insert_with(key, || Ok::<T, Error>(init()))
    }

    /// Fallible [`get_or_insert_with`](Self::get_or_insert_with). Nothing
    /// is stored when `init` fails.
    pub fn get_or_try_insert_with<T, E, F>(&self, key: &str, init: F) -> Result<Arc<T>, E>
    where
        T: Any + Send + Sync,
        E: From<Error>,
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(existing) = self.get_raw(key) {
            trace!(key = key, "Context attribute hit");
            return downcast(key, existing);
        }

        let mut values = self.values.write();
        if let Some(existing) = values.get(key) {
            return downcast(key, existing.clone());
        }

        let value = Arc::new(init()?);
        values.insert(key.to_string(), value.clone());
        trace!(key = key, "Context attribute computed");
        Ok(value)
    }
}

fn downcast<T: Any + Send + Sync, E: From<Error>>(key: &str, value: Value) -> Result<Arc<T>, E> {
    value.downcast::<T>().map_err(|_| {
        Error::IllegalArgument(format!(
            "attribute {} does not hold a {}",
            key,
            type_name::<T>()
        ))
        .into()
    })
}

impl std::fmt::Debug for Attributes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attributes")
            .field("keys", &self.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_insert_get_remove() {
        let attributes = Attributes::new();
        assert!(attributes.is_empty());

        attributes.insert("answer", 42u32);
        assert_eq!(attributes.get::<u32>("answer").as_deref(), Some(&42));
        assert!(attributes.get::<String>("answer").is_none());
        assert_eq!(attributes.len(), 1);

        assert!(attributes.remove("answer").is_some());
        assert!(!attributes.contains_key("answer"));
    }

    #[test]
    fn test_get_or_insert_computes_once() {
        let attributes = Arc::new(Attributes::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let attributes = attributes.clone();
                let calls = calls.clone();
                thread::spawn(move || {
                    attributes
                        .get_or_insert_with("shared", || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            vec![1, 2, 3]
                        })
                        .unwrap()
                })
            })
            .collect();

        let results: Vec<Arc<Vec<i32>>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }

    #[test]
    fn test_failed_init_stores_nothing() {
        let attributes = Attributes::new();
        let result: Result<Arc<u8>, Error> =
            attributes.get_or_try_insert_with("broken", || Err(Error::UnknownVerb("BREW".into())));
        assert!(result.is_err());
        assert!(!attributes.contains_key("broken"));
    }

    #[test]
    fn test_type_mismatch() {
        let attributes = Attributes::new();
        attributes.insert("name", "trellis".to_string());
        let err = attributes.get_or_insert_with("name", || 7u8).unwrap_err();
        assert!(matches!(err, Error::IllegalArgument(_)));
    }
}
