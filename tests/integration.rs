// Integration tests (native) for the `ladder-game` crate.
// These tests avoid wasm-specific functionality and exercise the pure ladder
// logic so they can run under `cargo test` on the host.

use ladder_game::ladder::{Violation, generate};
use ladder_game::{
    Animator, Grid, GridGenerator, Ladder, LadderConfig, Outcome, RepairPolicy, Tick,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn is_permutation(mapping: &[usize]) -> bool {
    let mut seen = vec![false; mapping.len()];
    for &end in mapping {
        if end >= mapping.len() || seen[end] {
            return false;
        }
        seen[end] = true;
    }
    true
}

#[test]
fn every_column_pair_gets_a_rung() {
    for seed in 0..300u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = generate(8, 10, &mut rng);
        for column in 0..grid.columns() {
            assert!(
                grid.rung_count(column) >= 1,
                "seed {} left column pair {} empty",
                seed,
                column
            );
        }
    }
}

#[test]
fn no_slot_has_two_rungs_on_one_rail() {
    for seed in 0..300u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = generate(6, 10, &mut rng);
        for column in 1..grid.columns() {
            for slot in 0..grid.slots() {
                assert!(
                    !(grid.is_connected(column, slot) && grid.is_connected(column - 1, slot)),
                    "seed {} shares rail {} at slot {}",
                    seed,
                    column,
                    slot
                );
            }
        }
    }
}

#[test]
fn results_form_a_permutation() {
    for participants in 1..12usize {
        let mut rng = StdRng::seed_from_u64(participants as u64 * 31);
        let grid = generate(participants, 10, &mut rng);
        let mapping = grid.result_mapping();
        assert_eq!(mapping.len(), participants);
        assert!(is_permutation(&mapping), "{:?}", mapping);
    }
}

#[test]
fn last_slot_grids_still_permute() {
    let generator = GridGenerator { probability: 0.5, repair: RepairPolicy::LastSlot };
    for seed in 0..100u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = generator.generate(7, 10, &mut rng);
        assert!(
            !grid
                .violations()
                .iter()
                .any(|v| matches!(v, Violation::Disconnected { .. }))
        );
        assert!(is_permutation(&grid.result_mapping()));
    }
}

#[test]
fn traversal_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(99);
    let grid = generate(9, 10, &mut rng);
    for start in 0..9 {
        let first = grid.terminal_column(start);
        for _ in 0..5 {
            assert_eq!(grid.terminal_column(start), first);
        }
    }
}

#[test]
fn reference_ladder_lands_on_column_two() {
    let grid = Grid::from_rungs(5, 10, [(0, 2), (1, 5), (2, 0), (3, 9)]).unwrap();
    assert!(grid.violations().is_empty());
    assert_eq!(grid.terminal_column(0), 2);
    assert_eq!(grid.result_mapping(), vec![2, 0, 4, 1, 3]);
}

#[test]
fn same_seed_same_ladder() {
    let config = LadderConfig::default();
    let a = Ladder::generate(&config, &mut StdRng::seed_from_u64(5)).unwrap();
    let b = Ladder::generate(&config, &mut StdRng::seed_from_u64(5)).unwrap();
    assert_eq!(a.grid(), b.grid());
    assert_eq!(a.outcomes(), b.outcomes());
}

#[test]
fn exactly_one_winner_regardless_of_size() {
    for n in 1..20usize {
        let config = LadderConfig {
            participants: (0..n).map(|i| format!("player-{}", i)).collect(),
            ..LadderConfig::default()
        };
        let ladder = Ladder::generate(&config, &mut StdRng::seed_from_u64(n as u64)).unwrap();
        let winners = ladder.outcomes().iter().filter(|o| *o == Outcome::Winner).count();
        assert_eq!(winners, 1);
    }
}

#[test]
fn single_participant_always_wins() {
    let config = LadderConfig {
        participants: vec!["solo".to_string()],
        ..LadderConfig::default()
    };
    let ladder = Ladder::generate(&config, &mut StdRng::seed_from_u64(0)).unwrap();
    assert!(ladder.grid().rungs().is_empty());
    assert_eq!(ladder.terminal_column(0), Ok(0));
    assert_eq!(ladder.outcome_for(0), Ok(Outcome::Winner));
}

#[test]
fn animation_reveals_the_computed_outcome() {
    let config = LadderConfig::default();
    let ladder = Ladder::generate(&config, &mut StdRng::seed_from_u64(2024)).unwrap();
    for start in 0..ladder.len() {
        let mut animator = Animator::new(config.step_delay_ms);
        animator.start(start, 0.0);
        let mut now = 0.0;
        let finished = loop {
            if let Tick::Finished { terminal, .. } = animator.tick(ladder.grid(), now) {
                break terminal;
            }
            now += 50.0;
        };
        assert_eq!(Ok(finished), ladder.terminal_column(start));
    }
}
