use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use pqb_bench_commands::script::read_script;
use pqb_bench_commands::{
    Clock, CommandGenerator, CommandRunner, ReplaySummary, SystemClock, VirtualClock,
};
use pqb_bench_config::BenchConfig;
use pqb_bench_core::{NodeConfiguration, NodeListLayout};
use pqb_bench_manifest::DeploymentManifest;
use pqb_bench_stats::StatExtractor;
use pqb_bench_telemetry::EventLogger;

#[derive(Parser, Debug)]
#[command(name = "pqb-bench", version, about)]
pub struct Cli {
    /// Tool configuration (YAML). Defaults to config/pqb-bench.yaml when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve transaction receivers in a command script to node addresses
    Commands(GenerateArgs),
    /// Collect cycles, memory and traffic figures from benchmark logs
    Stats(StatsArgs),
    /// Print a compose manifest for the configured nodes
    Compose(ComposeArgs),
    /// Play the commands of one node from a generated script
    Replay(ReplayArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Node configuration: header line, then `<id> <address>` per node
    pub node_configuration: PathBuf,
    /// Command script with `node<N>` receivers
    pub command_script: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    /// Signature algorithm the logs were recorded with
    pub algorithm_name: String,
    /// Directory holding the stats and round logs
    pub directory: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ComposeArgs {
    /// Node list: one `<ip> ...` line per node
    pub config_file: PathBuf,
    /// Signature algorithm pqb is started with
    pub signature_algorithm: String,
}

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Generated command script
    pub command_script: PathBuf,
    /// Node whose commands are played, e.g. node3
    pub node_name: String,
    /// Print the commands without waiting and report the planned duration
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run_command<W: Write>(cli: Cli, config: &BenchConfig, out: &mut W) -> Result<()> {
    match cli.command {
        Commands::Commands(args) => run_generate(&args, config, out),
        Commands::Stats(args) => run_stats(&args, config),
        Commands::Compose(args) => run_compose(&args, config, out),
        Commands::Replay(args) => run_replay(&args, config, out),
    }
}

fn run_generate<W: Write>(args: &GenerateArgs, config: &BenchConfig, out: &mut W) -> Result<()> {
    let _span = EventLogger::tool_span("commands").entered();

    let nodes = NodeConfiguration::load(&args.node_configuration, NodeListLayout::Headered)
        .with_context(|| {
            format!(
                "loading node configuration {}",
                args.node_configuration.display()
            )
        })?;
    let script = read_script(&args.command_script)?;
    let generated = CommandGenerator::new(&nodes, config.commands.exit_settle_ms)
        .generate(&script)
        .with_context(|| format!("parsing {}", args.command_script.display()))?;

    for dropped in generated.dropped() {
        warn!(
            line = dropped.line,
            command = %dropped.command,
            reason = %dropped.reason,
            "Command dropped"
        );
    }

    writeln!(out, "{}", generated.text())?;
    info!(
        nodes = nodes.len(),
        emitted = generated.lines().len(),
        dropped = generated.dropped().len(),
        "Command script generated"
    );
    Ok(())
}

fn run_stats(args: &StatsArgs, config: &BenchConfig) -> Result<()> {
    let _span = EventLogger::tool_span("stats").entered();

    StatExtractor::new(&args.algorithm_name, &args.directory, &config.topology)
        .extract()
        .with_context(|| format!("extracting statistics from {}", args.directory.display()))?;
    Ok(())
}

fn run_compose<W: Write>(args: &ComposeArgs, config: &BenchConfig, out: &mut W) -> Result<()> {
    let _span = EventLogger::tool_span("compose").entered();

    let nodes = NodeConfiguration::load(&args.config_file, NodeListLayout::Plain)
        .with_context(|| format!("loading node list {}", args.config_file.display()))?;
    let manifest = DeploymentManifest::build(&nodes, &args.signature_algorithm, &config.manifest)?;

    writeln!(out, "{}", manifest.render())?;
    info!(
        services = manifest.services.len(),
        algorithm = %args.signature_algorithm,
        "Manifest generated"
    );
    Ok(())
}

fn run_replay<W: Write>(args: &ReplayArgs, config: &BenchConfig, out: &mut W) -> Result<()> {
    let _span = EventLogger::tool_span("replay").entered();

    let script = read_script(&args.command_script)?;
    let delay = Duration::from_millis(config.commands.command_delay_ms);

    if args.dry_run {
        let summary = replay_with(&args.node_name, delay, VirtualClock::new(), &script, out)?;
        info!(
            commands = summary.commands,
            planned_ms = summary.waited.as_millis() as u64,
            "Dry run finished"
        );
    } else {
        replay_with(&args.node_name, delay, SystemClock, &script, out)?;
    }
    Ok(())
}

fn replay_with<C: Clock, W: Write>(
    node: &str,
    delay: Duration,
    clock: C,
    script: &str,
    out: &mut W,
) -> Result<ReplaySummary> {
    let summary = CommandRunner::new(node, delay, clock)
        .replay(script, out)
        .with_context(|| format!("replaying commands for {}", node))?;
    Ok(summary)
}
