use thiserror::Error;

/// Broad category of a [`DomainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any I/O.
    Validation,
    Transport,
    /// The reply could not be trusted or read.
    Protocol,
    Cache,
    Config,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Label too long ({length} bytes, max 63): {label}")]
    LabelTooLong { label: String, length: usize },

    #[error("Unsupported record type: {0}")]
    UnsupportedRecordType(String),

    #[error("Invalid IPv4 address: {0}")]
    InvalidAddress(String),

    #[error("DNS query to {server} timed out after {timeout_ms}ms")]
    QueryTimeout { server: String, timeout_ms: u64 },

    #[error("DNS query to {server} failed: {reason}")]
    Transport { server: String, reason: String },

    #[error("DNS packet truncated: need {needed} bytes, got {actual}")]
    TruncatedPacket { needed: usize, actual: usize },

    #[error("Transaction ID mismatch: expected {expected:#06x}, got {actual:#06x}")]
    TransactionMismatch { expected: u16, actual: u16 },

    #[error("Compression loop detected at offset {offset}")]
    CompressionLoopDetected { offset: usize },

    #[error("Failed to import cache from {path}: {reason}")]
    CacheImport { path: String, reason: String },

    #[error("Failed to export cache to {path}: {reason}")]
    CacheExport { path: String, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::InvalidDomainName(_)
            | DomainError::LabelTooLong { .. }
            | DomainError::UnsupportedRecordType(_)
            | DomainError::InvalidAddress(_) => ErrorKind::Validation,

            DomainError::QueryTimeout { .. } | DomainError::Transport { .. } => {
                ErrorKind::Transport
            }

            DomainError::TruncatedPacket { .. }
            | DomainError::TransactionMismatch { .. }
            | DomainError::CompressionLoopDetected { .. } => ErrorKind::Protocol,

            DomainError::CacheImport { .. } | DomainError::CacheExport { .. } => ErrorKind::Cache,

            DomainError::ConfigError(_) => ErrorKind::Config,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, DomainError::QueryTimeout { .. })
    }
}
