//! `choreo`: plan a choreography and optionally perform it.
//!
//! ```text
//! choreo plan    [--profile P] [--output FILE] [--no-save]
//! choreo perform --address A --port P [--track T] [--profile P]
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use choreo_harness::config::DEFAULT_PROFILE;
use choreo_harness::execution::{
    perform_sequence, AudioPlayer, CommandAudioPlayer, RobotEndpoint, ScriptExecutor,
};
use choreo_harness::plan_dir::{write_plan, DEFAULT_PLAN_FILENAME};
use choreo_harness::runner::{run, PlanRun};

#[derive(Parser, Debug)]
#[command(author, version, about = "Choreography planner for a humanoid robot")]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search for a plan and print the report.
    Plan(PlanArgs),
    /// Plan, then perform the best plan on the robot.
    Perform(PerformArgs),
}

#[derive(Args, Debug)]
struct ProfileArgs {
    /// Built-in profile name (classic, ranged) or path to a TOML profile.
    #[arg(long, default_value = DEFAULT_PROFILE)]
    profile: String,
    /// Where to save the best plan.
    #[arg(long, default_value = DEFAULT_PLAN_FILENAME)]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct PlanArgs {
    #[command(flatten)]
    common: ProfileArgs,
    /// Print the report without writing the plan file.
    #[arg(long)]
    no_save: bool,
}

#[derive(Args, Debug)]
struct PerformArgs {
    #[command(flatten)]
    common: ProfileArgs,
    /// Robot IP address.
    #[arg(long)]
    address: String,
    /// Robot port.
    #[arg(long)]
    port: u16,
    /// Audio track to start before the first move.
    #[arg(long)]
    track: Option<String>,
    /// Interpreter used to run move scripts.
    #[arg(long, default_value = "python2")]
    interpreter: String,
    /// Directory holding one `<move>.py` script per move.
    #[arg(long, default_value = "./moves")]
    moves_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match cli.command {
        Command::Plan(args) => {
            let plan = plan(&args.common, !args.no_save)?;
            if !plan.outcome.is_solved() {
                std::process::exit(2);
            }
            Ok(())
        }
        Command::Perform(args) => perform(&args),
    }
}

fn init_tracing(verbose: u8) -> Result<()> {
    let fallback = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(fallback))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn plan(args: &ProfileArgs, save: bool) -> Result<PlanRun> {
    let run = run(&args.profile).with_context(|| format!("planning with {}", args.profile))?;
    print!("{}", run.report.render());

    if save {
        if let Some(best) = &run.report.best {
            write_plan(&best.record, &args.output)
                .with_context(|| format!("saving plan to {}", args.output.display()))?;
            println!("\nPlan saved to {}", args.output.display());
        }
    }
    Ok(run)
}

fn perform(args: &PerformArgs) -> Result<()> {
    let run = plan(&args.common, true)?;
    let Some(best) = &run.report.best else {
        bail!("no plan to perform");
    };

    let endpoint = RobotEndpoint {
        address: args.address.clone(),
        port: args.port,
    };
    if let Some(track) = &args.track {
        CommandAudioPlayer::default()
            .play(track)
            .with_context(|| format!("starting track {track}"))?;
    }

    let mut executor = ScriptExecutor {
        interpreter: args.interpreter.clone(),
        moves_dir: args.moves_dir.clone(),
    };
    let log = perform_sequence(&mut executor, &best.moves(), &endpoint)
        .with_context(|| format!("performing on {endpoint}"))?;

    println!("\nPerformed {} moves in {:.2}s", log.len(), log.total.as_secs_f64());
    Ok(())
}
