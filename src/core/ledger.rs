// Ledger rules over a chain of transaction blocks.
//
// There is no stored account state: a balance is rebuilt by walking the
// chain backwards until the address's own most recent spend.

use crate::config::params::{REWARD_INPUT_ADDRESS, STARTING_BALANCE};
use crate::core::{Block, Transaction, TransactionInput};
use crate::error::ValidationError;
use log::error;
use std::collections::HashSet;

/// Reconstruct the spendable balance of `address`.
///
/// Blocks are scanned from newest to oldest, genesis excluded. Every output
/// paid to `address` is added. Once a block containing a transaction sent
/// by `address` has been scanned, the walk stops: that transaction's change
/// plus everything received from that block onward is the balance. With no
/// such transaction the starting balance is added on top.
pub fn balance_of(chain: &[Block<Vec<Transaction>>], address: &str) -> u64 {
    let mut has_conducted_transaction = false;
    let mut outputs_total: u64 = 0;

    for block in chain.iter().skip(1).rev() {
        for transaction in block.get_payload() {
            if transaction.get_input().get_address() == address {
                has_conducted_transaction = true;
            }
            if let Some(value) = transaction.output_for(address) {
                outputs_total = outputs_total.saturating_add(value);
            }
        }

        if has_conducted_transaction {
            break;
        }
    }

    if has_conducted_transaction {
        outputs_total
    } else {
        STARTING_BALANCE.saturating_add(outputs_total)
    }
}

/// Check every non-genesis block's transactions.
///
/// Per block: no transaction twice, at most one reward sent by the reward
/// identity and paying exactly the mining reward, every transfer well formed and signed, and every sender
/// claiming exactly the balance it had before the block. Two transfers from
/// the same sender in one block are each checked against that same balance.
pub fn validate_ledger_data(chain: &[Block<Vec<Transaction>>]) -> Result<(), ValidationError> {
    for (index, block) in chain.iter().enumerate().skip(1) {
        let mut seen: HashSet<&Transaction> = HashSet::new();
        let mut reward_count = 0usize;

        for transaction in block.get_payload() {
            if !seen.insert(transaction) {
                error!(
                    "Transaction {} appears more than once in block {index}",
                    transaction.get_id()
                );
                return Err(ValidationError::DuplicateTransaction { block: index });
            }

            match transaction.get_input() {
                TransactionInput::Reward { address } => {
                    if address != REWARD_INPUT_ADDRESS {
                        error!(
                            "Reward transaction {} in block {index} has sender {address}",
                            transaction.get_id()
                        );
                        return Err(ValidationError::InvalidTransaction {
                            block: index,
                            id: transaction.get_id().to_string(),
                        });
                    }

                    reward_count += 1;
                    if reward_count > 1 {
                        error!("Miner rewards exceed limit in block {index}");
                        return Err(ValidationError::RewardLimitExceeded { block: index });
                    }

                    if !transaction.has_reward_output() {
                        error!("Miner reward amount invalid in block {index}");
                        return Err(ValidationError::InvalidRewardAmount { block: index });
                    }
                }
                TransactionInput::Ordinary {
                    amount, address, ..
                } => {
                    if !transaction.is_valid() {
                        return Err(ValidationError::InvalidTransaction {
                            block: index,
                            id: transaction.get_id().to_string(),
                        });
                    }

                    let true_balance = balance_of(&chain[..index], address);
                    if *amount != true_balance {
                        error!(
                            "Invalid input amount on transaction {}: claimed {amount}, balance {true_balance}",
                            transaction.get_id()
                        );
                        return Err(ValidationError::InvalidInputAmount {
                            block: index,
                            id: transaction.get_id().to_string(),
                            claimed: *amount,
                            actual: true_balance,
                        });
                    }
                }
            }
        }
    }

    Ok(())
}
