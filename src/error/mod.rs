//! Error handling for the ledger
//!
//! Two families live here. `LedgerError` covers operational failures
//! (key handling, serialization, configuration, I/O, overspending wallets).
//! `ValidationError` is the reason a candidate chain was turned away; it is
//! reported to the caller and never aborts anything.

use std::fmt;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Operational error types
#[derive(Debug, Clone)]
pub enum LedgerError {
    /// Cryptographic operation errors
    Crypto(String),
    /// Transaction construction errors
    Transaction(String),
    /// Configuration errors
    Config(String),
    /// Serialization/deserialization errors
    Serialization(String),
    /// File I/O errors
    Io(String),
    /// Amount requested is above the wallet balance
    InsufficientFunds { required: u64, available: u64 },
}

impl fmt::Display for LedgerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerError::Crypto(msg) => write!(f, "Cryptographic error: {msg}"),
            LedgerError::Transaction(msg) => write!(f, "Transaction error: {msg}"),
            LedgerError::Config(msg) => write!(f, "Configuration error: {msg}"),
            LedgerError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            LedgerError::Io(msg) => write!(f, "I/O error: {msg}"),
            LedgerError::InsufficientFunds {
                required,
                available,
            } => {
                write!(
                    f,
                    "Insufficient funds: required {required}, available {available}"
                )
            }
        }
    }
}

impl std::error::Error for LedgerError {}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for LedgerError {
    fn from(err: toml::de::Error) -> Self {
        LedgerError::Config(err.to_string())
    }
}

/// Broad category of a rejected chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Genesis mismatch, broken linkage or a stored hash that does not recompute
    Structural,
    /// Adjacent blocks whose difficulties differ by more than one
    Difficulty,
    /// Bad transaction data inside an otherwise well-formed chain
    Ledger,
}

/// Why a chain failed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyChain,
    GenesisMismatch,
    BrokenLink { index: usize },
    HashMismatch { index: usize },
    InsufficientWork { index: usize },
    DifficultyJump {
        index: usize,
        previous: u32,
        current: u32,
    },
    DuplicateTransaction { block: usize },
    RewardLimitExceeded { block: usize },
    InvalidRewardAmount { block: usize },
    InvalidTransaction { block: usize, id: String },
    InvalidInputAmount {
        block: usize,
        id: String,
        claimed: u64,
        actual: u64,
    },
}

impl ValidationError {
    pub fn kind(&self) -> ValidationErrorKind {
        match self {
            ValidationError::EmptyChain
            | ValidationError::GenesisMismatch
            | ValidationError::BrokenLink { .. }
            | ValidationError::HashMismatch { .. }
            | ValidationError::InsufficientWork { .. } => ValidationErrorKind::Structural,
            ValidationError::DifficultyJump { .. } => ValidationErrorKind::Difficulty,
            ValidationError::DuplicateTransaction { .. }
            | ValidationError::RewardLimitExceeded { .. }
            | ValidationError::InvalidRewardAmount { .. }
            | ValidationError::InvalidTransaction { .. }
            | ValidationError::InvalidInputAmount { .. } => ValidationErrorKind::Ledger,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyChain => write!(f, "chain has no blocks"),
            ValidationError::GenesisMismatch => {
                write!(f, "first block is not the canonical genesis block")
            }
            ValidationError::BrokenLink { index } => {
                write!(f, "block {index} does not reference the previous block hash")
            }
            ValidationError::HashMismatch { index } => {
                write!(f, "block {index} hash does not match its contents")
            }
            ValidationError::InsufficientWork { index } => {
                write!(f, "block {index} hash does not satisfy its difficulty")
            }
            ValidationError::DifficultyJump {
                index,
                previous,
                current,
            } => write!(
                f,
                "block {index} difficulty jumped from {previous} to {current}"
            ),
            ValidationError::DuplicateTransaction { block } => {
                write!(f, "duplicate transaction in block {block}")
            }
            ValidationError::RewardLimitExceeded { block } => {
                write!(f, "reward limit exceeded in block {block}")
            }
            ValidationError::InvalidRewardAmount { block } => {
                write!(f, "invalid reward amount in block {block}")
            }
            ValidationError::InvalidTransaction { block, id } => {
                write!(f, "invalid transaction {id} in block {block}")
            }
            ValidationError::InvalidInputAmount {
                block,
                id,
                claimed,
                actual,
            } => write!(
                f,
                "invalid input amount for transaction {id} in block {block}: claimed {claimed}, balance {actual}"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}
