use crate::{AnalyticsEvent, StorageError};

/// A durable string key-value store holding the persisted quiz blob.
///
/// Implementations must be cheap to call repeatedly; the engine writes the
/// full state after every mutation.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the value under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// A fire-and-forget receiver of funnel analytics events.
///
/// Sinks must not fail the caller; any delivery problem is theirs to swallow.
pub trait AnalyticsSink: Send + Sync {
    fn emit(&self, event: &AnalyticsEvent);
}
