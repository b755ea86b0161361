use crate::config::params::STARTING_BALANCE;
use crate::core::{ledger, Block, Transaction};
use crate::error::{LedgerError, Result};
use crate::utils::{ecdsa_p256_sha256_sign_digest, hex_encode, new_key_pair};
use ring::rand::SystemRandom;
use ring::signature::{EcdsaKeyPair, KeyPair, ECDSA_P256_SHA256_FIXED_SIGNING};
use serde::Serialize;

/// A P-256 key pair plus the balance it last saw.
///
/// The address is the hex-encoded public key, so anyone holding a
/// transaction can verify its signature without a lookup.
#[derive(Clone)]
pub struct Wallet {
    pkcs8: Vec<u8>,
    public_key: Vec<u8>,
    balance: u64,
}

impl Wallet {
    pub fn new() -> Result<Wallet> {
        let pkcs8 = new_key_pair()?;
        let rng = SystemRandom::new();
        let key_pair =
            EcdsaKeyPair::from_pkcs8(&ECDSA_P256_SHA256_FIXED_SIGNING, pkcs8.as_ref(), &rng)
                .map_err(|e| {
                    LedgerError::Crypto(format!("Failed to create key pair from PKCS8: {e}"))
                })?;
        let public_key = key_pair.public_key().as_ref().to_vec();
        Ok(Wallet {
            pkcs8,
            public_key,
            balance: STARTING_BALANCE,
        })
    }

    pub fn get_address(&self) -> String {
        hex_encode(&self.public_key)
    }

    pub fn get_public_key(&self) -> &[u8] {
        self.public_key.as_slice()
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Sign the JSON encoding of `data`; returns the hex signature
    pub fn sign<T: Serialize + ?Sized>(&self, data: &T) -> Result<String> {
        let message = serde_json::to_vec(data)?;
        let signature = ecdsa_p256_sha256_sign_digest(&self.pkcs8, &message)?;
        Ok(hex_encode(&signature))
    }

    /// Create a transfer. When a chain is given the balance is first
    /// reconstructed from it.
    pub fn create_transaction(
        &mut self,
        recipient: &str,
        amount: u64,
        chain: Option<&[Block<Vec<Transaction>>]>,
    ) -> Result<Transaction> {
        if let Some(chain) = chain {
            self.balance = ledger::balance_of(chain, &self.get_address());
        }

        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                required: amount,
                available: self.balance,
            });
        }

        Transaction::new(self, recipient, amount)
    }
}
