use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::fmt::SubscriberBuilder;

use hullstep::gen::{sample_points, SamplerCfg};
use hullstep::registry::{Algorithm, Driver};
use hullstep::scene::Scene;

#[derive(Parser)]
#[command(name = "hullstep")]
#[command(about = "Stepwise convex hull runner")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// List the registered algorithms
    List,
    /// Run one algorithm over a sampled point set, narrating every step
    Run {
        #[arg(long)]
        algo: String,
        /// Number of points to sample
        #[arg(long, default_value_t = 16)]
        points: usize,
        /// Seed for the sampler and the randomized engine
        #[arg(long, default_value_t = 42)]
        seed: u64,
        /// Emit one JSON document instead of step lines
        #[arg(long)]
        json: bool,
    },
    /// Run every algorithm over one sampled set and check they agree
    Compare {
        #[arg(long, default_value_t = 16)]
        points: usize,
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::List => list(),
        Action::Run {
            algo,
            points,
            seed,
            json,
        } => run(&algo, points, seed, json),
        Action::Compare { points, seed } => compare(points, seed),
    }
}

fn list() -> Result<()> {
    for algo in Algorithm::ALL {
        println!("{algo}");
    }
    Ok(())
}

fn parse_algo(name: &str) -> Result<Algorithm> {
    Algorithm::from_name(name).with_context(|| format!("unknown algorithm {name:?}; see `list`"))
}

fn run(algo: &str, points: usize, seed: u64, json: bool) -> Result<()> {
    let algo = parse_algo(algo)?;
    let pts = sample_points(points, &SamplerCfg::default(), seed);
    tracing::info!(%algo, points = pts.len(), seed, "run");
    let mut driver = Driver::new(Scene::new(&pts));
    driver.start(algo, seed);
    let mut steps = Vec::new();
    let moves = driver.run_to_end(|s| {
        if !json {
            println!("[{algo}] {}", s.message);
        }
        steps.push(s.message.clone());
    });
    let result = driver.last_result().cloned().unwrap_or_default();
    if json {
        let doc = serde_json::json!({
            "algo": algo.name(),
            "seed": seed,
            "points": pts.iter().map(|p| [p.x, p.y]).collect::<Vec<_>>(),
            "moves": moves,
            "steps": steps,
            "hull": {
                "edges": result.edges,
                "cycle": result.cycle(),
            },
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!("{moves} moves; hull vertices {:?}", result.vertices());
    }
    Ok(())
}

fn compare(points: usize, seed: u64) -> Result<()> {
    let pts = sample_points(points, &SamplerCfg::default(), seed);
    tracing::info!(points = pts.len(), seed, "compare");
    let mut reference: Option<(Algorithm, Vec<usize>)> = None;
    for algo in Algorithm::ALL {
        let mut driver = Driver::new(Scene::new(&pts));
        driver.start(algo, seed);
        let moves = driver.run_to_end(|_| {});
        let result = driver.last_result().cloned().unwrap_or_default();
        let vertices = result.vertices();
        println!(
            "{:>18}: {moves:4} moves, {} hull vertices",
            algo.name(),
            vertices.len()
        );
        match &reference {
            None => reference = Some((algo, vertices)),
            Some((first, expect)) => {
                if &vertices != expect {
                    bail!("{algo} disagrees with {first}: {vertices:?} vs {expect:?}");
                }
            }
        }
    }
    Ok(())
}
