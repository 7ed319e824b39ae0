use std::collections::HashSet;
use std::num::NonZero;

use ladderboard::placement::{coverage_budget, reserve_footprints};
use ladderboard::{build_graph, generate, shortest_path, Board, ConnectorKind, GeneratorConfig, PlacementPolicy};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn board(rows: usize, columns: usize) -> Board {
    Board::new(NonZero::new(rows).unwrap(), NonZero::new(columns).unwrap())
}

#[test]
fn generated_boards_hold_their_invariants() {
    let shapes = [(10, 10), (8, 12), (12, 6), (5, 5)];
    for policy in [PlacementPolicy::Footprint, PlacementPolicy::RetryUntilPlaced] {
        let config = GeneratorConfig { policy, ..GeneratorConfig::default() };
        for (rows, columns) in shapes {
            for seed in 0..40 {
                let mut board = board(rows, columns);
                let placed = generate(&mut board, &config, &mut StdRng::seed_from_u64(seed));

                let mut endpoints = HashSet::new();
                for connector in placed.climbs.iter().chain(placed.slides.iter()) {
                    assert_ne!(connector.start(), connector.end());
                    match connector.kind() {
                        ConnectorKind::Climb => assert!(connector.end() > connector.start()),
                        ConnectorKind::Slide => assert!(connector.end() < connector.start()),
                    }
                    assert!(endpoints.insert(connector.start()));
                    assert!(endpoints.insert(connector.end()));
                }
                assert!(!endpoints.contains(&1));
            }
        }
    }
}

#[test]
fn footprint_coverage_never_exceeds_the_target() {
    for target in [0.3, 0.5, 0.7, 1.0] {
        let config = GeneratorConfig { coverage_target: target, ..GeneratorConfig::default() };
        let board = board(10, 10);
        for seed in 0..50 {
            let reserved = reserve_footprints(board.indexer(), &config, &mut StdRng::seed_from_u64(seed));
            let covered = reserved.iter().map(|footprint| footprint.len()).sum::<usize>();
            assert!(covered <= coverage_budget(100, target));
            assert!(covered as f64 <= (100.0 * target).ceil());
        }
    }
}

#[test]
fn graph_matches_the_board() {
    let config = GeneratorConfig::default();
    for seed in 0..40 {
        let mut board = board(10, 10);
        generate(&mut board, &config, &mut StdRng::seed_from_u64(seed));
        let graph = build_graph(&board);
        let adjacency = graph.adjacency();
        assert_eq!(adjacency.len(), 100);

        for climb in board.climbs() {
            assert_eq!(adjacency[&climb.start()], vec![climb.end()]);
        }
        for (cell, moves) in &adjacency {
            assert!(moves.len() <= 6);
            if board.connector_at(*cell).is_none() && *cell < 100 {
                assert!(!moves.is_empty());
            }
        }

        assert_eq!(build_graph(&board).adjacency(), adjacency);
        assert_eq!(shortest_path(&graph, 1, 1), Ok(Some(0)));
    }
}

#[test]
fn furnish_reports_what_it_stores() {
    let config = GeneratorConfig { seed: Some(99), ..GeneratorConfig::default() };
    let mut first = board(10, 10);
    let mut second = board(10, 10);

    let a = first.furnish(&config, &mut config.rng()).unwrap();
    let b = second.furnish(&config, &mut config.rng()).unwrap();
    assert_eq!(a, b);
    assert_eq!(first.shortest_distance(), a);
    assert_eq!(first.to_string(), second.to_string());
}
