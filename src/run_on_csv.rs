use anyhow::{anyhow, Context, Result};
use clap::Parser;
use csv::{ReaderBuilder, Writer};
use heapsearch::baseline::{build_adjacency_list, Adjacency, SspAlgorithm};
use heapsearch::search::shortest_path;
use ordered_float::OrderedFloat;

type Weight = OrderedFloat<f64>;

#[derive(Parser, Debug)]
#[command(name = "csv")]
#[command(about = "Build a graph from a CSV with node_id, neighbor_id and weight per row and run single-source shortest paths.", long_about = None)]
struct Cli {
    /// Path to the .csv file
    #[arg(short, long)]
    csv: String,

    /// Number of runs. Picks a new (deterministic) source id per run (0, 1, 2, 3, ...num_runs).
    #[arg(short, long, default_value_t = 1)]
    num_runs: usize,

    #[arg(short, long, default_value_t = String::from("indexed"))]
    algorithm: String,

    /// Search from node 0 to this node only and print the path
    #[arg(short, long)]
    target: Option<usize>,

    /// Output CSV (node_id, distance) for the run from node 0.
    #[arg(short, long)]
    out: Option<String>,
}

fn parse_csv_and_build_adjacency_list(path: &str) -> Result<Adjacency<Weight>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true) // important: skip header line
        .from_path(path)
        .with_context(|| format!("opening {}", path))?;

    let mut edges = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let field = |k: usize| {
            record
                .get(k)
                .ok_or_else(|| anyhow!("record {}: missing column {}", i + 1, k))
        };
        let node_id: usize = field(0)?.trim().parse()?;
        let neighbor_node_id: usize = field(1)?.trim().parse()?;
        let weight: f64 = field(2)?.trim().parse()?;
        if !(weight >= 0.0) {
            return Err(anyhow!("record {}: weight {} is not a nonnegative number", i + 1, weight));
        }
        edges.push((node_id, neighbor_node_id, OrderedFloat(weight)));
    }

    Ok(build_adjacency_list(&edges))
}

fn write_distances(path: &str, dist: &[Option<Weight>]) -> Result<()> {
    let mut wtr = Writer::from_path(path).with_context(|| format!("creating CSV {}", path))?;
    wtr.write_record(["node_id", "distance"])?;
    for (idx, d) in dist.iter().enumerate() {
        if let Some(d) = d {
            wtr.write_record(&[idx.to_string(), format!("{:.6}", d.0)])?;
        }
    }
    wtr.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set the algorithm.
    let ssp = SspAlgorithm::from(&cli.algorithm).ok_or_else(|| {
        anyhow!(
            "Algorithm not found for input string: {}, possible options are: (\"indexed\", \"lazy\", \"orx\")",
            cli.algorithm
        )
    })?;

    let adj = parse_csv_and_build_adjacency_list(&cli.csv)?;
    let edge_count: usize = adj.iter().map(Vec::len).sum();
    println!("Graph: {} nodes, {} directed edges", adj.len(), edge_count);

    if let Some(target) = cli.target {
        let reached = shortest_path(
            [(0usize, OrderedFloat(0.0))],
            |&u: &usize| adj[u].iter().copied(),
            |&u| u == target,
        )
        .with_context(|| format!("searching from 0 to {}", target))?;
        println!("Settled {} nodes", reached.settled);
        let path: Vec<String> = reached.path.iter().map(usize::to_string).collect();
        println!("Path: {}", path.join(" -> "));
        println!("Distance: {:.6}", reached.distance.0);
        return Ok(());
    }

    let mut duration_millis = Vec::new();
    for src_idx in 0..cli.num_runs.min(adj.len()) {
        use std::time::SystemTime;
        let now = SystemTime::now();
        let dist = ssp.run(&adj, src_idx);
        if let Ok(elapsed) = now.elapsed() {
            duration_millis.push(elapsed.as_secs_f64() * 1000.0);
        }

        if src_idx == 0 {
            let reachable = dist.iter().filter(|d| d.is_some()).count();
            println!("Reachable from 0: {}", reachable);
            if let Some(out_path) = &cli.out {
                write_distances(out_path, &dist)?;
                println!("Wrote distances for {} nodes to {}", reachable, out_path);
            }
        }
    }
    println!("{:?}", duration_millis);

    Ok(())
}
