use crate::core::{ledger, Block, Transaction};
use crate::error::ValidationError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Anything a block can carry.
///
/// The genesis block holds `Self::default()`. Payloads with transaction
/// shape override `validate_ledger`; opaque payloads keep the default,
/// which accepts every chain.
pub trait Payload: Serialize + DeserializeOwned + Clone + PartialEq + Debug + Default {
    fn validate_ledger(_chain: &[Block<Self>]) -> Result<(), ValidationError> {
        Ok(())
    }
}

impl Payload for Vec<Transaction> {
    fn validate_ledger(chain: &[Block<Self>]) -> Result<(), ValidationError> {
        ledger::validate_ledger_data(chain)
    }
}

impl Payload for String {}

impl Payload for serde_json::Value {}
