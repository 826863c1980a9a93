//! Types d'erreurs pour pmoplaylist

/// Input that could not be turned into any source identifier
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("No entry with a \"url\" field in batch")]
    NoValidEntries,
}

/// Queue contract violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("Playlist queue is empty")]
    EmptyQueue,
}
