use clap::Parser;
use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;

use gossip_emu::{parse_seed_hex, EmulatorConfig, EmulatorRunner};

/// Compare random and pair gossip on the reference population
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Fixed seed as hex, random when omitted
    #[arg(long)]
    seed: Option<String>,

    /// Number of hosts
    #[arg(long)]
    population: Option<usize>,

    /// Safety bound on rounds per trial
    #[arg(long)]
    max_rounds: Option<usize>,

    /// Clear host history before every trial
    #[arg(long)]
    reset_between_trials: bool,

    /// Debug logging, plus per-round trace with -vv
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    SimpleLogger::new().with_level(level).init().unwrap();

    let mut config = EmulatorConfig {
        reset_between_trials: args.reset_between_trials,
        ..Default::default()
    };
    if let Some(n) = args.population {
        config.population_size = n;
    }
    if let Some(n) = args.max_rounds {
        config.max_rounds = n;
    }
    if let Some(ref hex) = args.seed {
        match parse_seed_hex(hex) {
            Ok(seed) => config.seed = Some(seed),
            Err(e) => {
                error!("{}", e);
                std::process::exit(1);
            }
        }
    }
    if let Err(e) = config.validate() {
        error!("{}", e);
        std::process::exit(1);
    }

    info!("starting");

    let runner = EmulatorRunner::new(config).with_event_trace(args.verbose > 1);
    let result = runner.run();
    result.print_summary();
}
