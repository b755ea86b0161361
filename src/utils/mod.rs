//! Utility functions and helpers
//!
//! Hashing, signing and encoding primitives the ledger consumes.

pub mod crypto;

pub use crypto::{
    crypto_hash, current_timestamp, ecdsa_p256_sha256_sign_digest, ecdsa_p256_sha256_sign_verify,
    hex_decode, hex_encode, new_key_pair, sha256_digest, verify_signature,
};
