//! Batch simulation, CSV export and the simulate/replay commands.

use clap::Parser;
use ghostbuster::{
    App, GameConfig, UpdateMode,
    adapters::{GreedySeeker, RandomSeeker, SeekerKind},
    cli::commands::{
        replay::{self, ReplayArgs},
        simulate::{self, SimulateArgs},
    },
    ports::Observer,
    simulation::{self, CsvObserver, GameRecord},
};
use tempfile::tempdir;

fn small_app(seed: u64) -> App {
    App::for_testing()
        .with_config(GameConfig::default().with_grid_size(6))
        .with_default_seed(seed)
        .build()
}

#[test]
fn seeded_runs_are_reproducible() {
    let first = simulation::run(&small_app(7), &mut GreedySeeker::default(), 20, &mut []).unwrap();
    let second = simulation::run(&small_app(7), &mut GreedySeeker::default(), 20, &mut []).unwrap();
    assert_eq!(first, second);
}

#[test]
fn greedy_beats_random_on_a_static_ghost() {
    let config = GameConfig::default().with_grid_size(6).with_move_budget(0);
    let app = |seed| {
        App::for_testing()
            .with_config(config.clone())
            .with_default_seed(seed)
            .build()
    };

    let greedy = simulation::run(&app(3), &mut GreedySeeker::new(0.99, 36), 30, &mut []).unwrap();
    let mut random = RandomSeeker::new(Some(3)).with_inquiries_before_burst(3);
    let random = simulation::run(&app(3), &mut random, 30, &mut []).unwrap();

    assert_eq!(greedy.wins, 30);
    assert!(greedy.win_rate > random.win_rate);
}

#[test]
fn csv_observer_writes_one_row_per_game() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("games.csv");

    let mut observers: Vec<Box<dyn Observer>> = vec![Box::new(CsvObserver::create(&path).unwrap())];
    let summary =
        simulation::run(&small_app(11), &mut GreedySeeker::default(), 15, &mut observers).unwrap();
    drop(observers);

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let records: Vec<GameRecord> = reader.deserialize().collect::<Result<_, _>>().unwrap();
    assert_eq!(records.len(), 15);
    assert_eq!(records.iter().filter(|record| record.won()).count(), summary.wins);
    assert_eq!(records[0].game, 1);
    assert!(records.iter().all(|record| record.ghost_row < 6 && record.ghost_col < 6));
}

#[test]
fn seeker_names_parse() {
    assert_eq!("greedy".parse::<SeekerKind>().unwrap(), SeekerKind::Greedy);
    assert_eq!("Random".parse::<SeekerKind>().unwrap(), SeekerKind::Random);
    assert!("oracle".parse::<SeekerKind>().is_err());
}

#[test]
fn simulate_command_exports_csv() {
    let tmp = tempdir().unwrap();
    let export = tmp.path().join("run.csv");

    let args = SimulateArgs::parse_from([
        "ghostbuster-simulate",
        "--games",
        "5",
        "--seeker",
        "random",
        "--seed",
        "9",
        "--grid-size",
        "5",
        "--mode",
        "region",
        "--no-progress",
        "--export",
        export.to_str().unwrap(),
    ]);
    simulate::execute(args).expect("simulation should succeed");

    let contents = std::fs::read_to_string(&export).unwrap();
    assert_eq!(contents.lines().count(), 6, "header plus one row per game");
    assert!(contents.starts_with("game,outcome,inquiries"));
}

#[test]
fn simulate_accepts_contiguous_mode() {
    let args = SimulateArgs::parse_from([
        "ghostbuster-simulate",
        "--games",
        "4",
        "--seed",
        "2",
        "--grid-size",
        "5",
        "--mode",
        "contiguous",
        "--json",
    ]);
    assert_eq!(args.game.mode, Some(UpdateMode::ContiguousRegion));
    simulate::execute(args).expect("contiguous simulation should succeed");
}

#[test]
fn simulate_rejects_invalid_threshold() {
    let args = SimulateArgs::parse_from([
        "ghostbuster-simulate",
        "--games",
        "1",
        "--threshold",
        "1.5",
        "--no-progress",
    ]);
    assert!(simulate::execute(args).is_err());
}

#[test]
fn replay_command_accepts_script() {
    let args = ReplayArgs::parse_from([
        "ghostbuster-replay",
        "--seed",
        "1",
        "--ghost",
        "4,4",
        "--move-budget",
        "0",
        "--burst",
        "4,4",
        "--json",
        "0,0",
        "4,4",
        "4,4",
    ]);
    assert_eq!(args.inquiries, vec![(0, 0), (4, 4), (4, 4)]);
    replay::execute(args).expect("replay should succeed");
}

#[test]
fn replay_rejects_ghost_outside_grid() {
    let args = ReplayArgs::parse_from(["ghostbuster-replay", "--grid-size", "3", "--ghost", "5,5"]);
    assert!(replay::execute(args).is_err());
}
