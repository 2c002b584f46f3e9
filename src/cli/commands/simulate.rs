//! Simulate command - Play batches of games with an automated seeker

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::{
    adapters::SeekerKind,
    app::App,
    cli::{
        config::GameArgs,
        output::{format_number, format_percent, print_kv, print_section},
    },
    ports::Observer,
    simulation::{self, CsvObserver, ProgressObserver},
};

#[derive(Parser, Debug)]
#[command(about = "Play many games with an automated seeker")]
pub struct SimulateArgs {
    /// Number of games to play
    #[arg(long, short = 'g', default_value_t = 1000)]
    pub games: usize,

    /// Seeker strategy (greedy, random)
    #[arg(long, short = 's', default_value = "greedy")]
    pub seeker: SeekerKind,

    /// Base random seed; game `i` uses `seed + i`
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub game: GameArgs,

    /// Write one CSV row per game to this file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    // The per-session seed comes from the app, not the config.
    let config = args.game.resolve(None)?;

    let mut builder = App::for_testing().with_config(config);
    if let Some(seed) = args.seed {
        builder = builder.with_default_seed(seed);
    }
    let app = builder.build();
    let mut seeker = args.seeker.build(args.seed);

    let mut observers: Vec<Box<dyn Observer>> = Vec::new();
    if !args.no_progress && !args.json {
        observers.push(Box::new(ProgressObserver::new()));
    }
    if let Some(path) = &args.export {
        observers.push(Box::new(CsvObserver::create(path)?));
    }

    let summary = simulation::run(&app, seeker.as_mut(), args.games, &mut observers)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let config = app.config();
    print_section("Simulation Summary");
    print_kv("Seeker", &summary.seeker);
    print_kv("Grid", &format!("{0}x{0}", config.grid_size));
    print_kv("Update mode", &config.update_mode.to_string());
    print_kv("Signal scheme", &config.signal_scheme.to_string());
    print_kv("Games", &format_number(summary.games));
    print_kv(
        "Wins",
        &format!(
            "{} ({})",
            format_number(summary.wins),
            format_percent(summary.win_rate)
        ),
    );
    let (low, high) = summary.win_rate_interval;
    print_kv(
        "95% interval",
        &format!("{} - {}", format_percent(low), format_percent(high)),
    );
    print_kv("Mean inquiries", &format!("{:.2}", summary.mean_inquiries));
    print_kv("Mean relocations", &format!("{:.2}", summary.mean_relocations));
    if let Some(path) = &args.export {
        print_kv("Exported", &path.display().to_string());
    }
    Ok(())
}
