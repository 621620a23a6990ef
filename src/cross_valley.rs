use anyhow::{Context, Result};
use clap::Parser;
use heapsearch::blizzard::Valley;
use std::fs;

#[derive(Parser, Debug)]
#[command(name = "blizzard")]
#[command(about = "Find the earliest tick a blizzard valley can be crossed.", long_about = None)]
struct Cli {
    /// Path to the valley map (walls '#', blizzards '<', '>', '^', 'v')
    #[arg(short, long)]
    input: String,

    /// Number of crossings, alternating entrance -> exit and exit -> entrance
    #[arg(short, long, default_value_t = 1)]
    trips: usize,

    /// Print every position along each crossing
    #[arg(long, default_value_t = false)]
    show_path: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.input).with_context(|| format!("reading {}", &cli.input))?;
    let valley = Valley::parse(&text).with_context(|| format!("parsing {}", &cli.input))?;

    println!(
        "Valley: {} x {}, blizzards repeat every {} ticks",
        valley.width(),
        valley.height(),
        valley.period()
    );

    use std::time::SystemTime;
    let now = SystemTime::now();
    let legs = valley.trips(cli.trips).context("crossing the valley")?;
    if let Ok(elapsed) = now.elapsed() {
        println!("{} s", elapsed.as_secs_f64());
    }

    for (i, leg) in legs.iter().enumerate() {
        println!(
            "Leg {}: ticks {} -> {}, settled {} states",
            i + 1,
            leg.departure,
            leg.arrival,
            leg.settled
        );
        if cli.show_path {
            for s in &leg.path {
                println!("{} {},{}", s.t, s.x, s.y);
            }
        }
    }
    println!("{}", legs.last().map_or(0, |leg| leg.arrival));

    Ok(())
}
