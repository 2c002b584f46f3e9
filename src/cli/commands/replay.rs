//! Replay command - Play a scripted game and show every step

use anyhow::Result;
use clap::Parser;

use super::parse_position;
use crate::{
    GameEngine,
    cli::{
        config::GameArgs,
        output::{print_kv, print_section, print_subsection, render_grid},
    },
    types::Position,
};

#[derive(Parser, Debug)]
#[command(about = "Replay a scripted sequence of inquiries")]
pub struct ReplayArgs {
    /// Cells to inquire, in order, as ROW,COL
    #[arg(value_parser = parse_position)]
    pub inquiries: Vec<Position>,

    /// Random seed for ghost placement and relocation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Start the ghost on this cell instead of a random one
    #[arg(long, value_parser = parse_position)]
    pub ghost: Option<Position>,

    /// Finish with a burst attempt on this cell
    #[arg(long, value_parser = parse_position)]
    pub burst: Option<Position>,

    #[command(flatten)]
    pub game: GameArgs,

    /// Print the final status snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: ReplayArgs) -> Result<()> {
    let config = args.game.resolve(args.seed)?;
    let mut builder = GameEngine::builder().config(config);
    if let Some(ghost) = args.ghost {
        builder = builder.ghost_at(ghost);
    }
    let mut engine = builder.build()?;

    if !args.json {
        print_section("Replay");
    }
    for &(row, col) in &args.inquiries {
        let line = match engine.submit_inquiry(row, col) {
            Ok(report) if report.relocated => format!("{} (ghost relocated)", report.signal),
            Ok(report) => report.signal.to_string(),
            Err(err) => format!("rejected: {err}"),
        };
        if !args.json {
            print_kv(&format!("({row}, {col})"), &line);
        }
    }

    if let Some((row, col)) = args.burst {
        engine.switch_to_burst_mode();
        engine.submit_burst(row, col)?;
    }

    let status = engine.status();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    print_subsection("Board");
    print!("{}", render_grid(&status));
    print_subsection("State");
    print_kv("Mode", status.mode.as_str());
    print_kv("Moves left", &status.moves_left.to_string());
    print_kv("Entropy", &format!("{:.3} nats", engine.belief_entropy()));
    if let Some((row, col)) = status.agent_position {
        print_kv("Ghost", &format!("({row}, {col})"));
    }
    Ok(())
}
