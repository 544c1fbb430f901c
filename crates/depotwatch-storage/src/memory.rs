use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value;

use crate::traits::StateStore;

/// In-memory store for tests. Not durable, but good for unit/scenario tests.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<HashMap<String, Value>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for InMemoryStore {
    fn load(&self, key: &str) -> anyhow::Result<Option<Value>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.get(key).cloned())
    }

    fn save(&self, key: &str, record: &Value) -> anyhow::Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.insert(key.to_string(), record.clone());
        Ok(())
    }
}
