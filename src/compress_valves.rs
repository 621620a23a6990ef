use anyhow::{anyhow, Context, Result};
use clap::Parser;
use heapsearch::compress::Strategy;
use heapsearch::valves::Valves;
use std::fs;
use std::io::{self, Read};

#[derive(Parser, Debug)]
#[command(name = "valves")]
#[command(about = "Compress a valve/tunnel network to distances between valves with flow.", long_about = None)]
struct Cli {
    /// Path to the valve list. Reads stdin if omitted.
    #[arg(short, long)]
    input: Option<String>,

    /// "search" (one Dijkstra per valve) or "dense" (Floyd-Warshall)
    #[arg(short, long, default_value_t = String::from("search"))]
    strategy: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let strategy = Strategy::from(&cli.strategy).ok_or_else(|| {
        anyhow!(
            "Strategy not found for input string: {}, possible options are: (\"search\", \"dense\")",
            cli.strategy
        )
    })?;

    let text = match &cli.input {
        Some(path) => fs::read_to_string(path).with_context(|| format!("reading {}", path))?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text).context("reading stdin")?;
            text
        }
    };

    let valves = Valves::parse(&text).context("parsing valves")?;
    eprintln!("Loaded {} valves", valves.len());

    let matrix = valves.compress(strategy)?;
    eprintln!("Kept {} valves", matrix.len());

    // The table itself goes to stdout for the next stage.
    print!("{}", valves.render(&matrix));
    Ok(())
}
