// Account-style transfers: a sender signs a map of recipient -> amount that
// spends its whole claimed balance, paying the remainder back to itself.

use crate::config::params::{MINING_REWARD, REWARD_INPUT_ADDRESS};
use crate::error::{LedgerError, Result};
use crate::utils::{current_timestamp, verify_signature};
use crate::wallet::Wallet;
use log::error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Recipient address -> amount. Ordered so the signed JSON is canonical.
pub type OutputMap = BTreeMap<String, u64>;

/// Where a transaction's value comes from, fixed when it is built
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransactionInput {
    /// Newly minted coins for a block's miner
    Reward { address: String },
    /// A wallet spending its balance
    Ordinary {
        timestamp: u64,
        /// Sender balance claimed at signing time
        amount: u64,
        /// Hex-encoded public key of the sender
        address: String,
        /// Hex-encoded signature over the output map
        signature: String,
    },
}

impl TransactionInput {
    pub fn get_address(&self) -> &str {
        match self {
            TransactionInput::Reward { address } => address,
            TransactionInput::Ordinary { address, .. } => address,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    id: String,
    output_map: OutputMap,
    input: TransactionInput,
}

impl Transaction {
    /// Build a signed transfer of `amount` from the wallet's current balance
    pub fn new(sender: &Wallet, recipient: &str, amount: u64) -> Result<Transaction> {
        let sender_address = sender.get_address();
        if recipient == sender_address {
            return Err(LedgerError::Transaction(
                "Recipient must differ from the sender".to_string(),
            ));
        }

        let balance = sender.balance();
        if amount > balance {
            return Err(LedgerError::InsufficientFunds {
                required: amount,
                available: balance,
            });
        }

        let mut output_map = OutputMap::new();
        output_map.insert(recipient.to_string(), amount);
        output_map.insert(sender_address, balance - amount);

        let input = Self::signed_input(sender, balance, &output_map)?;
        Ok(Transaction {
            id: Uuid::new_v4().to_string(),
            output_map,
            input,
        })
    }

    /// Reward paying `MINING_REWARD` to the miner
    pub fn reward(miner_address: &str) -> Transaction {
        let mut output_map = OutputMap::new();
        output_map.insert(miner_address.to_string(), MINING_REWARD);

        Transaction {
            id: Uuid::new_v4().to_string(),
            output_map,
            input: TransactionInput::Reward {
                address: REWARD_INPUT_ADDRESS.to_string(),
            },
        }
    }

    /// Assemble a transaction from known parts without signing or checking anything
    pub fn from_parts(id: String, output_map: OutputMap, input: TransactionInput) -> Transaction {
        Transaction {
            id,
            output_map,
            input,
        }
    }

    fn signed_input(sender: &Wallet, amount: u64, output_map: &OutputMap) -> Result<TransactionInput> {
        Ok(TransactionInput::Ordinary {
            timestamp: current_timestamp(),
            amount,
            address: sender.get_address(),
            signature: sender.sign(output_map)?,
        })
    }

    /// Pay another `amount` out of the sender's change and sign again.
    pub fn update(&mut self, sender: &Wallet, recipient: &str, amount: u64) -> Result<()> {
        let claimed = match &self.input {
            TransactionInput::Ordinary {
                amount, address, ..
            } if *address == sender.get_address() => *amount,
            _ => {
                return Err(LedgerError::Transaction(
                    "Only the original sender can update a transaction".to_string(),
                ))
            }
        };

        let sender_address = sender.get_address();
        if recipient == sender_address {
            return Err(LedgerError::Transaction(
                "Recipient must differ from the sender".to_string(),
            ));
        }

        let change = self.output_map.get(&sender_address).copied().unwrap_or(0);
        if amount > change {
            return Err(LedgerError::InsufficientFunds {
                required: amount,
                available: change,
            });
        }

        *self.output_map.entry(recipient.to_string()).or_insert(0) += amount;
        self.output_map.insert(sender_address, change - amount);
        self.input = Self::signed_input(sender, claimed, &self.output_map)?;
        Ok(())
    }

    /// Check the transaction on its own, without any chain history.
    ///
    /// Ordinary: outputs sum to the claimed amount and the signature verifies.
    /// Reward: sent by the reward identity, with a single output of exactly
    /// `MINING_REWARD`.
    pub fn is_valid(&self) -> bool {
        match &self.input {
            TransactionInput::Reward { address } => {
                if address != REWARD_INPUT_ADDRESS {
                    error!("Invalid reward transaction {}: sender {address}", self.id);
                    return false;
                }
                self.has_reward_output()
            }
            TransactionInput::Ordinary {
                amount,
                address,
                signature,
                ..
            } => {
                let total = self
                    .output_map
                    .values()
                    .try_fold(0u64, |acc, value| acc.checked_add(*value));
                if total != Some(*amount) {
                    error!("Invalid transaction {}: outputs do not sum to {amount}", self.id);
                    return false;
                }

                if !verify_signature(address, &self.output_map, signature) {
                    error!("Invalid signature on transaction {} from {address}", self.id);
                    return false;
                }

                true
            }
        }
    }

    pub(crate) fn has_reward_output(&self) -> bool {
        self.output_map.len() == 1 && self.output_map.values().all(|v| *v == MINING_REWARD)
    }

    pub fn is_reward(&self) -> bool {
        matches!(self.input, TransactionInput::Reward { .. })
    }

    pub fn get_id(&self) -> &str {
        self.id.as_str()
    }

    pub fn get_input(&self) -> &TransactionInput {
        &self.input
    }

    pub fn get_output_map(&self) -> &OutputMap {
        &self.output_map
    }

    /// Amount this transaction pays to `address`, if any
    pub fn output_for(&self, address: &str) -> Option<u64> {
        self.output_map.get(address).copied()
    }
}
