//! # pow-ledger - a minimal proof-of-work ledger
//!
//! An append-only chain of blocks held together by hash links, a mining
//! difficulty that retargets on every block, and account-style transactions
//! whose balances are rebuilt from history instead of stored.
//!
//! ## How the code is organized
//! - `core/`: blocks, mining, difficulty, chain validation, replacement and ledger rules
//! - `wallet/`: key pairs, signing and building transfers
//! - `config/`: protocol constants and per-process settings
//! - `utils/`: hashing, signature and encoding primitives
//! - `cli/`: command-line interface
//!
//! ## Where to start
//! 1. `core/block.rs` and `core/proof_of_work.rs` for how a block is mined
//! 2. `core/validation.rs` for what makes a chain acceptable
//! 3. `core/blockchain.rs` for the replacement rule
//! 4. `core/ledger.rs` for balances and transaction checks
//!
//! Validation never panics or aborts: a rejected chain comes back as a
//! [`ValidationError`] or a [`RejectReason`] and the current chain stays put.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;
pub mod wallet;

// Re-export commonly used types for convenience
pub use cli::{Command, Opt};
pub use config::{Config, INITIAL_DIFFICULTY, MINE_RATE, MINING_REWARD, STARTING_BALANCE};
pub use core::{
    balance_of, is_valid_chain, validate_chain, validate_chain_with_work, validate_ledger_data,
    Block, Blockchain, DifficultyAdjustment, OutputMap, Payload, ProofOfWork, RejectReason,
    ReplaceOutcome, Transaction, TransactionInput,
};
pub use error::{LedgerError, Result, ValidationError, ValidationErrorKind};
pub use utils::{crypto_hash, current_timestamp, verify_signature};
pub use wallet::Wallet;
