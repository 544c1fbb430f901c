use serde_json::Value;

/// Small persisted key/value record store shared with external processes.
///
/// Records are whole JSON documents: `load` returns the full record (or None
/// if the key has never been written) and `save` replaces it atomically, so a
/// concurrent reader never observes a torn write. Callers that share a record
/// with an external writer must re-read before rewriting and only touch the
/// fields they own.
pub trait StateStore: Send + Sync {
    fn load(&self, key: &str) -> anyhow::Result<Option<Value>>;
    fn save(&self, key: &str, record: &Value) -> anyhow::Result<()>;
}
