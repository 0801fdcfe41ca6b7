#![forbid(unsafe_code)]
use std::env;
use tallychain::node::NodeContext;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let context = NodeContext::init()?;
    println!("⛓️  Ledger session for node {}\n", context.node_id());

    // Sample traffic so a sealed block has something to carry.
    context.queue_transaction("alice", "bob", 5)?;
    context.queue_transaction("bob", "carol", 2)?;

    match args.get(1) {
        Some(proof_arg) => {
            let proof: u64 = proof_arg.parse()?;
            match context.accept_proof_and_seal(proof, context.node_id()) {
                Ok(block) => println!(
                    "✅ Proof accepted - sealed block #{} with {} transaction(s)",
                    block.index,
                    block.transactions.len()
                ),
                Err(e) => println!("❌ {}", e),
            }
        }
        None => {
            println!("No proof supplied; queued transactions stay pending.");
            println!("Usage: {} [proof]", args[0]);
        }
    }

    let snapshot = context.chain_snapshot();
    println!("\nChain ({} block(s)):", snapshot.length);
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    let pending = context.pending_transactions();
    if !pending.is_empty() {
        println!("\nPending ({} transaction(s)):", pending.len());
        println!("{}", serde_json::to_string_pretty(&pending)?);
    }

    Ok(())
}
