use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "curtain", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scenario and write its trace as JSON.
    Run(RunArgs),
    /// Print the default session configuration as JSON.
    Defaults,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Input scenario JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output trace path (stdout if omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Run(args) => cmd_run(args),
        Command::Defaults => cmd_defaults(),
    }
}

fn read_scenario_json(path: &Path) -> anyhow::Result<curtain::Scenario> {
    let f = File::open(path).with_context(|| format!("open scenario '{}'", path.display()))?;
    let r = BufReader::new(f);
    let scenario: curtain::Scenario =
        serde_json::from_reader(r).with_context(|| "parse scenario JSON")?;
    Ok(scenario)
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let scenario = read_scenario_json(&args.in_path)?;
    let trace = curtain::run_scenario(&scenario)?;
    let json = serde_json::to_string_pretty(&trace).context("serialize trace")?;

    match args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(&out, json)
                .with_context(|| format!("write trace '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("write trace to stdout")?;
        }
    }
    Ok(())
}

fn cmd_defaults() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&curtain::SessionConfig::default())
        .context("serialize default config")?;
    println!("{json}");
    Ok(())
}
