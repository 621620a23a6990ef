use anyhow::{Context, Result};
use clap::Parser;
use heapsearch::grid::HeightMap;
use std::fs;

#[derive(Parser, Debug)]
#[command(name = "hill")]
#[command(about = "Find the fewest steps up a height map from S to E.", long_about = None)]
struct Cli {
    /// Path to the height map (rows of a-z with one S and one E)
    #[arg(short, long)]
    input: String,

    /// Start from whichever 'a' cell is closest to E instead of from S
    #[arg(long, default_value_t = false)]
    any_start: bool,

    /// Print the cells along the path
    #[arg(long, default_value_t = false)]
    show_path: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.input).with_context(|| format!("reading {}", &cli.input))?;
    let map = HeightMap::parse(&text).with_context(|| format!("parsing {}", &cli.input))?;

    println!(
        "Height map: {} x {}, start {:?}, end {:?}",
        map.height(),
        map.width(),
        map.start,
        map.end
    );

    use std::time::SystemTime;
    let now = SystemTime::now();
    let reached = if cli.any_start {
        map.shortest_hike()
    } else {
        map.climb()
    }
    .context("searching for a route")?;
    if let Ok(elapsed) = now.elapsed() {
        println!("{} s", elapsed.as_secs_f64());
    }

    println!("Settled {} cells", reached.settled);
    if cli.show_path {
        for c in &reached.path {
            println!("{},{} {}", c.row, c.col, map.level(*c) as char);
        }
    }
    println!("{}", reached.distance);

    Ok(())
}
