//! Key management and signing
//!
//! Wallets hold a P-256 key pair, sign output maps and build transfers
//! against a reconstructed balance.

#[allow(clippy::module_inception)]
pub mod wallet;

pub use wallet::Wallet;
