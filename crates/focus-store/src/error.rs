use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Another thread held the store for longer than the caller was willing to wait.
    #[error("store is busy: lock not acquired within {waited:?}")]
    Contended { waited: Duration },
}
