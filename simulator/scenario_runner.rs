// Scenario Runner - Load and execute scenario YAML files
//
// Usage:
//   cargo run --bin scenario_runner scenarios/reference.yaml
//   cargo run --bin scenario_runner scenarios/  (runs all .yaml files in directory)
//   cargo run --bin scenario_runner scenarios/reference.yaml --seed 0x1234...

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;

use gossip_emu::{parse_seed_hex, ConfigError, EmulatorRunner, Scenario};

#[derive(Parser, Debug)]
#[command(about = "Run gossip emulation scenarios from YAML files")]
struct Args {
    /// Scenario file, or a directory of .yaml/.yml files
    path: PathBuf,

    /// Seed as hex, overrides the seed of every scenario
    #[arg(long)]
    seed: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new().with_level(level).init().unwrap();

    let seed = match args.seed.as_deref().map(parse_seed_hex).transpose() {
        Ok(seed) => seed,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let scenarios = if args.path.is_file() {
        vec![args.path.clone()]
    } else if args.path.is_dir() {
        find_scenarios(&args.path)
    } else {
        error!("path does not exist: {}", args.path.display());
        std::process::exit(1);
    };

    if scenarios.is_empty() {
        error!("no .yaml files found in {}", args.path.display());
        std::process::exit(1);
    }

    let mut failed = 0;
    for (i, path) in scenarios.iter().enumerate() {
        info!("{}/{} running {}", i + 1, scenarios.len(), path.display());
        if let Err(e) = run_scenario_file(path, seed) {
            error!("{}: {}", path.display(), e);
            failed += 1;
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

fn find_scenarios(dir: &Path) -> Vec<PathBuf> {
    let mut scenarios = Vec::new();

    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            let ext = path.extension().and_then(|s| s.to_str());
            if ext == Some("yaml") || ext == Some("yml") {
                scenarios.push(path);
            }
        }
    }

    scenarios.sort();
    scenarios
}

fn run_scenario_file(path: &Path, seed: Option<[u8; 32]>) -> Result<(), ConfigError> {
    let mut scenario = Scenario::load(path)?;
    if seed.is_some() {
        scenario.config.seed = seed;
    }

    let title = scenario.meta.name.clone().unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    });
    println!("== {} ==", title);
    if let Some(ref desc) = scenario.meta.description {
        println!("{}", desc);
    }
    println!();

    info!(
        "population {}, max rounds {}, reset between trials: {}",
        scenario.config.population_size,
        scenario.config.max_rounds,
        scenario.config.reset_between_trials
    );

    let runner = EmulatorRunner::new(scenario.config);
    info!("seed {:?}", runner.seed());
    let result = runner.run();

    result.print_summary();
    println!();

    Ok(())
}
