//! CLI entry point: pick a structure and a mode, then either interpret
//! I/D/S commands from stdin or run the preload-and-probe analysis loop.

use std::io;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rand::Rng;

use thicket::{repl, ScapegoatTree, SkipList};

#[derive(Parser)]
#[command(name = "thicket")]
#[command(about = "Ordered search structures: a scapegoat tree and a skip list")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Interactive scapegoat tree session reading I/D/S lines from stdin
	Tree {
		/// Balance factor, strictly between 0.5 and 1
		#[arg(long, default_value_t = 0.57)]
		alpha: f64,
	},
	/// Interactive skip list session reading I/D/S lines from stdin
	List {
		/// Promotion probability, strictly between 0 and 1
		#[arg(long, default_value_t = 0.5)]
		probability: f64,
		/// Hard upper bound on drawn node levels
		#[arg(long, default_value_t = 32)]
		level_cap: usize,
	},
	/// Preload a tree with n random keys, then report comparisons per search
	TreeAnalysis {
		/// Number of keys to preload
		n: usize,
		/// Number of searches to run
		rounds: usize,
	},
	/// Preload a list with n sequential keys, then report comparisons per search
	ListAnalysis {
		/// Number of keys to preload
		n: usize,
		/// Number of searches to run
		rounds: usize,
	},
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	let stdin = io::stdin();
	let mut stdout = io::stdout().lock();

	match cli.command {
		Commands::Tree { alpha } => {
			let mut tree = ScapegoatTree::with_alpha(alpha)?;
			repl::run_tree_session(&mut tree, stdin.lock(), &mut stdout)?;
		}
		Commands::List {
			probability,
			level_cap,
		} => {
			let mut list = SkipList::with_probability(level_cap, probability)?;
			repl::run_list_session(&mut list, stdin.lock(), &mut stdout)?;
		}
		Commands::TreeAnalysis { n, rounds } => {
			anyhow::ensure!(n > 0, "analysis needs at least one preloaded key");
			let mut tree = ScapegoatTree::with_alpha(0.60)?;
			let mut rng = rand::rng();
			for _ in 0..n {
				tree.insert(rng.random_range(0..n as i64));
			}
			for _ in 0..rounds {
				let probe = rng.random_range(0..n as i64);
				tree.get(&probe);
				println!(
					"Tree size: {} - Searching for: {} - Comparisons: {} - Restructs: {}",
					n,
					probe,
					tree.comparisons(),
					tree.restructure_count()
				);
				tree.reset_comparisons();
			}
		}
		Commands::ListAnalysis { n, rounds } => {
			anyhow::ensure!(n > 0, "analysis needs at least one preloaded key");
			let mut list = SkipList::new(32);
			for key in 0..n {
				list.insert(key as i64, 1);
			}
			let mut rng = rand::rng();
			for _ in 0..rounds {
				list.reset_comparisons();
				let probe = rng.random_range(0..n as i64);
				list.get(&probe);
				println!(
					"List size: {} - Searching for: {} - Comparisons: {}",
					n,
					probe,
					list.comparisons()
				);
			}
		}
	}
	Ok(())
}
