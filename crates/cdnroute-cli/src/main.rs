use std::path::PathBuf;

use anyhow::Context;
use cdnroute_core::Outcome;
use clap::Parser;
use log::{info, warn};

/// Routes content from a provider to its clients without exceeding node bandwidth.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Problem instance (.json or .msgpack)
    input: PathBuf,

    /// Where to write the solution (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the solution
    #[arg(long)]
    pretty: bool,

    /// Exit with an error if any clash is left unresolved
    #[arg(long)]
    strict: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let problem = cdnroute_utils::read_problem(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    info!(
        "Loaded {} nodes, {} links and {} clients",
        problem.nodes.len(),
        problem.links.len(),
        problem.clients.len()
    );
    let solution = cdnroute_core::run(problem).context("failed to route clients")?;

    match &args.output {
        Some(path) => cdnroute_utils::write_solution_file(&solution, path, args.pretty)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => cdnroute_utils::write_solution(&solution, std::io::stdout().lock(), args.pretty)
            .context("failed to write solution")?,
    }

    if let Outcome::Unresolved { count } = solution.outcome() {
        for &client in solution.unresolved() {
            let payment = solution.payment(client).unwrap_or_default();
            warn!("Client {client} ({payment}) keeps an over-capacity path");
        }
        for v in solution.violations() {
            warn!(
                "Node {} carries {} at step {} (capacity {})",
                v.node, v.load, v.time, v.capacity
            );
        }
        if args.strict {
            anyhow::bail!("{count} clients could not be rerouted");
        }
    }
    Ok(())
}
