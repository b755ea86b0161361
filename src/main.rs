use clap::Parser;
use log::{error, info};
use pow_ledger::core::count_leading_zero_bits;
use pow_ledger::utils::hex_decode;
use pow_ledger::{
    balance_of, validate_ledger_data, Block, Blockchain, Command, Config, Opt, Transaction,
    Wallet,
};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::process;

type LedgerChain = Vec<Block<Vec<Transaction>>>;

fn main() {
    let opt = Opt::parse();

    let config = match Config::load(opt.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let level = match config.log_level_filter() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    env_logger::builder().filter_level(level).init();

    if let Err(e) = run_command(opt.command, &config) {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn run_command(command: Command, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Mine { blocks } => {
            let mut blockchain: Blockchain<String> = Blockchain::new();
            blockchain.add_block("initial".to_string())?;

            let mut times: Vec<u64> = Vec::with_capacity(blocks);
            for i in 0..blocks {
                let previous_timestamp = blockchain.last_block().get_timestamp();
                let block = blockchain.add_block(format!("block{i}"))?;

                let time_diff = block.get_timestamp().saturating_sub(previous_timestamp);
                times.push(time_diff);
                let average = times.iter().sum::<u64>() as f64 / times.len() as f64;
                let zero_bits = hex_decode(block.get_hash())
                    .map(|bytes| count_leading_zero_bits(&bytes))
                    .unwrap_or(0);

                println!(
                    "Time to mine block: {time_diff}ms. Difficulty: {}. Leading zero bits: {zero_bits}. Average time: {average:.2}ms. Hash: {}",
                    block.get_difficulty(),
                    block.get_hash()
                );
            }
        }
        Command::Demo { blocks, out } => {
            let miner_address = match &config.miner.address {
                Some(address) => address.clone(),
                None => Wallet::new()?.get_address(),
            };
            let mut alice = Wallet::new()?;
            let mut bob = Wallet::new()?;

            let mut blockchain: Blockchain = Blockchain::new();
            for i in 0..blocks {
                let amount = 10 * (i as u64 + 1);
                let to_bob =
                    alice.create_transaction(&bob.get_address(), amount, Some(blockchain.blocks()))?;
                let to_alice =
                    bob.create_transaction(&alice.get_address(), amount / 2, Some(blockchain.blocks()))?;
                let reward = Transaction::reward(&miner_address);
                let block = blockchain.add_block(vec![to_bob, to_alice, reward])?;
                println!("{block}");
            }

            let mut verifier: Blockchain = Blockchain::new()
                .with_work_enforcement(config.validation.enforce_work);
            let outcome = verifier.replace_chain(blockchain.blocks(), config.validation.validate_ledger);
            println!("Replacement outcome: {outcome:?}");

            println!("Alice: {}", blockchain.balance_of(&alice.get_address()));
            println!("Bob:   {}", blockchain.balance_of(&bob.get_address()));
            println!("Miner: {}", blockchain.balance_of(&miner_address));

            if let Some(path) = out {
                let writer = BufWriter::new(File::create(&path)?);
                serde_json::to_writer_pretty(writer, blockchain.blocks())?;
                info!("Wrote {} blocks to {}", blockchain.len(), path.display());
            }
        }
        Command::Validate { chain } => {
            let blocks = read_chain(&chain)?;
            let checker: Blockchain = Blockchain::new()
                .with_work_enforcement(config.validation.enforce_work);

            checker
                .check_chain(&blocks)
                .map_err(|e| format!("chain is invalid: {e}"))?;
            if config.validation.validate_ledger {
                validate_ledger_data(&blocks)
                    .map_err(|e| format!("transaction data is invalid: {e}"))?;
            }
            println!("Chain of {} blocks is valid", blocks.len());
        }
        Command::Balance { chain, address } => {
            let blocks = read_chain(&chain)?;
            println!("Balance of '{address}': {}", balance_of(&blocks, &address));
        }
    }
    Ok(())
}

fn read_chain(path: &Path) -> Result<LedgerChain, Box<dyn std::error::Error>> {
    let reader = BufReader::new(File::open(path)?);
    let blocks: LedgerChain = serde_json::from_reader(reader)?;
    Ok(blocks)
}
