//! Property-based tests for belief and feasibility invariants.

mod common;

use common::{EPS, approx_eq};
use ghostbuster::{
    GameConfig, GameEngine, RegionWeighting, SignalScheme, UpdateMode, grid::Grid,
    observation::ObservationModel, types::chebyshev_distance,
};
use proptest::prelude::*;

const SIZE: usize = 8;

/// Strategy: a sequence of inquiry coordinates, repeats and all.
fn inquiries_strategy() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..SIZE, 0..SIZE), 1..40)
}

/// Strategy: one of the supported game configurations.
fn config_strategy() -> impl Strategy<Value = GameConfig> {
    (0u8..3, any::<bool>(), any::<bool>(), 0u32..5).prop_map(
        |(mode, proximity, constraint_layer, budget)| {
            let mode = match mode {
                0 => UpdateMode::Bayesian,
                1 => UpdateMode::RegionWeighting(RegionWeighting::default()),
                _ => UpdateMode::ContiguousRegion,
            };
            let scheme = if proximity {
                SignalScheme::Proximity
            } else {
                SignalScheme::Graded
            };
            GameConfig::default()
                .with_grid_size(SIZE)
                .with_move_budget(budget)
                .with_update_mode(mode)
                .with_signal_scheme(scheme)
                .with_constraint_layer(constraint_layer)
        },
    )
}

proptest! {
    // 1. Beliefs stay a probability distribution after every inquiry
    #[test]
    fn beliefs_stay_normalized(
        config in config_strategy(),
        seed in any::<u64>(),
        inquiries in inquiries_strategy(),
    ) {
        let mut engine = GameEngine::new(config.with_seed(seed)).unwrap();
        for (row, col) in inquiries {
            engine.inquire(row, col);
            let total = engine.grid().total_probability();
            prop_assert!(approx_eq(total, 1.0, EPS), "total={total}");
            prop_assert!(engine.grid().all().all(|cell| cell.probability() >= 0.0));
        }
    }

    // 2. The ghost is always inside the constraint set, and with the layer on
    //    no belief mass sits outside it
    #[test]
    fn ghost_stays_feasible(
        config in config_strategy(),
        seed in any::<u64>(),
        inquiries in inquiries_strategy(),
    ) {
        let layer = config.constraint_layer;
        let mut engine = GameEngine::new(config.with_seed(seed)).unwrap();
        for (row, col) in inquiries {
            engine.inquire(row, col);
            prop_assert!(engine.constraints().contains(engine.ghost().position()));
            if layer {
                for cell in engine.grid().all() {
                    if !engine.constraints().contains(cell.position()) {
                        prop_assert_eq!(cell.probability(), 0.0);
                    }
                }
            }
        }
    }

    // 3. Relocations never exceed the budget and inquiries are counted once
    #[test]
    fn budget_and_counters_are_consistent(
        config in config_strategy(),
        seed in any::<u64>(),
        inquiries in inquiries_strategy(),
    ) {
        let budget = config.move_budget;
        let mut engine = GameEngine::new(config.with_seed(seed)).unwrap();
        for (row, col) in inquiries {
            engine.inquire(row, col);
        }
        prop_assert!(engine.relocations() as u32 <= budget);
        prop_assert_eq!(engine.moves_left() + engine.relocations() as u32, budget);
        prop_assert_eq!(engine.inquiries(), engine.grid().inquired_count());
    }

    // 4. Inquired cells never change their signal
    #[test]
    fn signals_are_write_once(
        seed in any::<u64>(),
        inquiries in inquiries_strategy(),
    ) {
        let config = GameConfig::default().with_grid_size(SIZE);
        let mut engine = GameEngine::new(config.with_seed(seed)).unwrap();
        let mut seen = Vec::new();
        for (row, col) in inquiries {
            engine.inquire(row, col);
            let signal = engine.grid().get(row, col).unwrap().signal();
            if let Some((_, first)) = seen.iter().find(|(pos, _)| *pos == (row, col)) {
                prop_assert_eq!(*first, signal);
            } else {
                seen.push(((row, col), signal));
            }
        }
    }

    // 5. A Bayesian update is proportional to prior times likelihood
    #[test]
    fn bayesian_update_is_proportional(
        at in (0..SIZE, 0..SIZE),
        ghost in (0..SIZE, 0..SIZE),
    ) {
        let model = ObservationModel::default();
        let scheme = model.scheme();
        let signal = scheme.signal_for(chebyshev_distance(at, ghost));
        let mut grid = Grid::new(SIZE);
        model.update(&mut grid, at, signal);

        let weights: Vec<f64> = grid
            .positions()
            .map(|pos| model.table().likelihood(signal, chebyshev_distance(at, pos), scheme))
            .collect();
        let total: f64 = weights.iter().sum();
        for (cell, weight) in grid.all().zip(&weights) {
            prop_assert!(approx_eq(cell.probability(), weight / total, 1e-12));
        }
    }
}
