//! corridor — a small swarm crossing two staggered walls to reach a target.
//!
//! Ten agents start in two loose groups on the west side of the grid.  Each
//! wall has a one-cell gap, so clusters have to route around obstacles and
//! agree on a heading to get through.
//!
//! Run with:
//!   cargo run -p corridor --release
//!   cargo run -p corridor -- --scenario my_scenario.json --output out/run1
//!
//! Set `RUST_LOG=debug` to see cluster resolution and obstacle recovery.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use hx_behavior::{AgentBehavior, AgentMessage};
use hx_core::{HexCoord, Tick};
use hx_output::{CsvWriter, JsonSummaryWriter, OutputWriter, SimOutputObserver};
use hx_sim::{ClusteringMethod, Scenario, SimObserver, TickSummary};

// ── Built-in scenario ─────────────────────────────────────────────────────────

const CORRIDOR_JSON: &str = include_str!("../scenarios/corridor.json");

// ── Command line ──────────────────────────────────────────────────────────────

/// Run a hex-grid swarm scenario and write CSV + JSON output.
#[derive(Parser, Debug)]
#[command(name = "corridor")]
struct Args {
    /// Scenario JSON file; the built-in corridor is used when omitted
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Directory for agent_snapshots.csv, tick_summaries.csv and result.json
    #[arg(long, default_value = "output/corridor")]
    output: PathBuf,

    /// Override the scenario's target cell, as `row,column`
    #[arg(long, allow_hyphen_values = true)]
    target: Option<HexCoord>,

    /// Override the scenario's tick count
    #[arg(long)]
    steps: Option<u64>,

    /// Override the scenario's seed
    #[arg(long)]
    seed: Option<u64>,

    /// Use radius-bounded linkage with this radius instead of the scenario's
    /// clustering method
    #[arg(long)]
    radius: Option<u32>,
}

// ── Progress observer ─────────────────────────────────────────────────────────

/// Counts written rows and logs progress, forwarding everything to the
/// output observer.
struct ProgressObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    last:          Option<TickSummary>,
    /// Agent messages from the latest snapshot.  Taken before the epoch
    /// reset, so cluster ids are still set.
    last_snapshot: Option<(Tick, Vec<AgentMessage>)>,
}

impl<W: OutputWriter> ProgressObserver<W> {
    fn new(inner: SimOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, last: None, last_snapshot: None }
    }

    /// Cluster column for agent `index` from the latest snapshot.
    fn cluster_label(&self, index: usize) -> String {
        match self.last_snapshot.as_ref().and_then(|(_, agents)| agents.get(index)) {
            Some(msg) if msg.cluster_defined => msg.cluster_id.0.to_string(),
            _ => "-".to_string(),
        }
    }
}

impl<W: OutputWriter> SimObserver for ProgressObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        if summary.tick.0 % 25 == 0 {
            info!(
                tick = %summary.tick,
                mean_target_distance = summary.mean_target_distance,
                diameter = summary.diameter,
                clusters = summary.num_clusters,
                at_target = summary.agents_at_target,
                "progress"
            );
        }
        self.last = Some(*summary);
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &[AgentMessage]) {
        self.snapshot_rows += agents.len();
        self.last_snapshot = Some((tick, agents.to_vec()));
        self.inner.on_snapshot(tick, agents);
    }

    fn on_sim_end(&mut self, final_tick: Tick, agents: &[AgentMessage]) {
        self.inner.on_sim_end(final_tick, agents);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    // 1. Load the scenario and apply overrides.
    let mut scenario = match &args.scenario {
        Some(path) => Scenario::from_path(path)
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => Scenario::from_reader(CORRIDOR_JSON.as_bytes())?,
    };
    if let Some(target) = args.target {
        scenario.target_location = target;
    }
    if let Some(steps) = args.steps {
        scenario.num_of_steps = steps;
    }
    if let Some(seed) = args.seed {
        scenario.seed = seed;
    }
    if let Some(radius) = args.radius {
        scenario.clustering = ClusteringMethod::Radius;
        scenario.cluster_radius = radius;
    }

    println!("=== corridor — hexswarm ===");
    println!(
        "Agents: {}  |  Walls: {}  |  Target: {}  |  Ticks: {}  |  Seed: {}  |  Clustering: {:?}",
        scenario.agent_locations.len(),
        scenario.wall_locations.len(),
        scenario.target_location,
        scenario.num_of_steps,
        scenario.seed,
        scenario.clustering,
    );
    println!();

    // 2. Build sim.
    let mut sim = scenario.build_sim()?;

    // 3. Set up output.
    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let writer = (CsvWriter::new(&args.output)?, JsonSummaryWriter::new(&args.output)?);
    let mut obs = ProgressObserver::new(SimOutputObserver::new(writer));

    // 4. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 5. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  agent_snapshots.csv : {} rows", obs.snapshot_rows);
    println!("  output directory    : {}", args.output.display());
    if let Some(last) = obs.last {
        println!(
            "  final tick {}: mean distance {:.2}, diameter {}, {} at target",
            last.tick, last.mean_target_distance, last.diameter, last.agents_at_target
        );
    }
    println!();

    // 6. Final agent positions table; clusters come from the last snapshot
    //    since an epoch boundary on the final tick clears them.
    let target = scenario.target_location;
    if let Some((tick, _)) = &obs.last_snapshot {
        println!("Clusters as of snapshot {tick}");
    }
    println!("{:<8} {:<12} {:<10} {:<8}", "Agent", "Cell", "Cluster", "Dist");
    println!("{}", "-".repeat(40));
    for (i, agent) in sim.agents.iter().enumerate() {
        println!(
            "{:<8} {:<12} {:<10} {:<8}",
            agent.agent_id().0,
            agent.location().to_string(),
            obs.cluster_label(i),
            agent.location().distance(target),
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests;
