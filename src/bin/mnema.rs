//! Inspection CLI for mnema-core.
//!
//! `mnema order <vault>` prints the canonical review order for a vault
//! folder; `mnema graph <vault>` summarizes the link graph it was derived
//! from.

use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use mnema_core::{
    error::MnemaError,
    links::VaultAnalyzer,
    store::FsContentStore,
};

#[derive(Parser)]
#[command(name = "mnema", version, about = "Review order inspection for markdown vaults")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the canonical review order for a vault folder.
    Order {
        /// Vault root directory.
        vault: PathBuf,
        /// Vault-relative folder to analyze (defaults to the whole vault).
        #[arg(long, default_value = "")]
        scope: String,
        /// Do not descend into subfolders.
        #[arg(long)]
        flat: bool,
    },
    /// Summarize the link graph for a vault folder.
    Graph {
        /// Vault root directory.
        vault: PathBuf,
        /// Vault-relative folder to analyze (defaults to the whole vault).
        #[arg(long, default_value = "")]
        scope: String,
        /// Do not descend into subfolders.
        #[arg(long)]
        flat: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), MnemaError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Order { vault, scope, flat } => {
            let analyzer = VaultAnalyzer::new(Arc::new(FsContentStore::new(vault)));
            if let Some(hierarchy) = analyzer.analyze_collection(&scope, !flat).await? {
                for (idx, path) in hierarchy.order.iter().enumerate() {
                    println!("{:>4}  {path}", idx + 1);
                }
            }
        }
        Command::Graph { vault, scope, flat } => {
            let analyzer = VaultAnalyzer::new(Arc::new(FsContentStore::new(vault)));
            if let Some(hierarchy) = analyzer.analyze_collection(&scope, !flat).await? {
                println!(
                    "{} documents, {} roots: {}",
                    hierarchy.nodes.len(),
                    hierarchy.roots.len(),
                    hierarchy.roots.join(", ")
                );
                for node in hierarchy.nodes.values() {
                    println!(
                        "{}  out: {} ({} regular, {} embeds)  in: {}",
                        node.path,
                        node.outgoing.len(),
                        node.regular.len(),
                        node.embeds.len(),
                        node.incoming_count
                    );
                }
            }
        }
    }
    Ok(())
}
