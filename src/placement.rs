//! Reserving rectangular footprints within the coverage budget, and picking connector endpoints from them.

use itertools::Itertools;
use ndarray::{s, Array2};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, instrument, trace};

use crate::config::{GeneratorConfig, SizeRange};
use crate::location::{CellNumber, GridIndexer};

// marks a matrix position taken by an accepted footprint; cell numbers start at 1
const RESERVED: CellNumber = 0;

/// The size of a rectangular region reserved for one connector.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Footprint {
    /// Rows covered.
    pub height: usize,
    /// Columns covered.
    pub width: usize,
}

impl Footprint {
    /// Cells covered.
    #[inline]
    pub fn area(&self) -> usize {
        self.height * self.width
    }
}

/// Every `height x width` combination within the two ranges, heights varying slowest.
pub fn candidate_footprints(heights: SizeRange, widths: SizeRange) -> Vec<Footprint> {
    heights.iter()
        .cartesian_product(widths.iter())
        .map(|(height, width)| Footprint { height, width })
        .collect_vec()
}

/// Reserves disjoint footprints on a numbered matrix, keeping the first and last cells free.
pub(crate) struct Reserver {
    matrix: Array2<CellNumber>,
    restricted: [CellNumber; 2],
    reserved: Vec<Array2<CellNumber>>,
}

impl Reserver {
    pub(crate) fn new(indexer: &GridIndexer) -> Self {
        Self {
            matrix: indexer.matrix(),
            restricted: [1, indexer.last_cell()],
            reserved: Vec::new(),
        }
    }

    /// Make one attempt at reserving `footprint` at a random anchor. A failed attempt changes nothing.
    pub(crate) fn try_reserve<R: Rng + ?Sized>(&mut self, footprint: Footprint, rng: &mut R) -> bool {
        let (rows, columns) = self.matrix.dim();
        if footprint.area() == 0 || footprint.height > rows || footprint.width > columns {
            return false;
        }

        let row = rng.random_range(0..=rows - footprint.height);
        let column = rng.random_range(0..=columns - footprint.width);

        let restricted = self.restricted;
        let mut window = self.matrix.slice_mut(s![row..row + footprint.height, column..column + footprint.width]);
        if window.iter().any(|number| *number == RESERVED || restricted.contains(number)) {
            trace!(row, column, ?footprint, "footprint overlaps");
            return false;
        }

        self.reserved.push(window.to_owned());
        window.fill(RESERVED);
        true
    }

    pub(crate) fn into_reserved(self) -> Vec<Array2<CellNumber>> {
        self.reserved
    }
}

/// Reserve footprints on a fresh matrix for `indexer`, up to the coverage budget of `config`.
///
/// Candidates are tried once each in random order. The pass stops at the first candidate that would overrun the budget,
/// and a candidate whose single random anchor collides is skipped rather than re-anchored, so coverage often ends below target.
///
/// Each returned matrix holds the original cell numbers under an accepted footprint.
#[instrument(skip_all, fields(target = config.coverage_target))]
pub fn reserve_footprints<R: Rng + ?Sized>(indexer: &GridIndexer, config: &GeneratorConfig, rng: &mut R) -> Vec<Array2<CellNumber>> {
    let budget = coverage_budget(indexer.last_cell(), config.coverage_target);
    let mut candidates = candidate_footprints(config.heights, config.widths);
    candidates.shuffle(rng);

    let mut reserver = Reserver::new(indexer);
    let mut covered = 0;
    for footprint in candidates {
        if covered + footprint.area() > budget {
            break;
        }

        if reserver.try_reserve(footprint, rng) {
            covered += footprint.area();
        }
    }

    let reserved = reserver.into_reserved();
    debug!(footprints = reserved.len(), covered, budget, "footprints reserved");
    reserved
}

/// Most cells a generation pass may cover.
pub fn coverage_budget(cells: usize, coverage_target: f64) -> usize {
    (cells as f64 * coverage_target).floor() as usize
}

/// Pick the two connector endpoints of a reserved footprint as `(lower, upper)`, or [`None`] for an empty one.
///
/// A one-column footprint yields its top and bottom cells.
/// Wider footprints yield the top of a randomly chosen outer column and the bottom of the opposite one, so the connector always runs diagonally.
pub fn corners<R: Rng + ?Sized>(footprint: &Array2<CellNumber>, rng: &mut R) -> Option<(CellNumber, CellNumber)> {
    let (height, width) = footprint.dim();
    let bottom = height.checked_sub(1)?;
    let right = width.checked_sub(1)?;

    if right == 0 {
        return Some((footprint[[bottom, 0]], footprint[[0, 0]]));
    }

    let side = if rng.random_bool(0.5) { 0 } else { right };
    let top = footprint[[0, side]];
    let lower = footprint[[bottom, right - side]];
    Some((lower, top))
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use itertools::Itertools;
    use ndarray::{array, Array2};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;

    use super::{candidate_footprints, corners, coverage_budget, reserve_footprints, Footprint, Reserver};
    use crate::config::{GeneratorConfig, SizeRange};
    use crate::location::GridIndexer;

    fn indexer(rows: usize, columns: usize) -> GridIndexer {
        GridIndexer::new(NonZero::new(rows).unwrap(), NonZero::new(columns).unwrap())
    }

    #[test]
    fn candidates_cover_both_ranges() {
        let candidates = candidate_footprints(SizeRange { min: 3, max: 5 }, SizeRange { min: 2, max: 5 });
        assert_eq!(candidates.len(), 12);
        assert_eq!(candidates[0], Footprint { height: 3, width: 2 });
        assert_eq!(candidates[11], Footprint { height: 5, width: 5 });
        assert_eq!(candidates.iter().unique().count(), 12);
    }

    #[test]
    fn budget_rounds_down() {
        assert_eq!(coverage_budget(100, 0.7), 70);
        assert_eq!(coverage_budget(36, 0.7), 25);
        assert_eq!(coverage_budget(9, 1.0), 9);
    }

    #[test]
    fn footprints_are_disjoint_and_avoid_the_ends() {
        let idx = indexer(10, 10);
        let config = GeneratorConfig::default();
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let reserved = reserve_footprints(&idx, &config, &mut rng);

            let cells = reserved.iter().flat_map(|fp| fp.iter().copied()).collect_vec();
            assert_eq!(cells.iter().unique().count(), cells.len(), "seed {seed}: overlapping footprints");
            assert!(!cells.contains(&1) && !cells.contains(&100), "seed {seed}: footprint on an end cell");
            assert!(cells.len() <= 70, "seed {seed}: covered {} cells", cells.len());
        }
    }

    #[test]
    fn footprints_are_rectangles_of_the_grid() {
        let idx = indexer(10, 10);
        let mut rng = StdRng::seed_from_u64(7);
        for fp in reserve_footprints(&idx, &GeneratorConfig::default(), &mut rng) {
            let (height, width) = fp.dim();
            assert!((3..=5).contains(&height) && (2..=5).contains(&width));
            // columns ascend by one, rows descend by a full board row
            for row in fp.rows() {
                assert!(row.iter().tuple_windows().all(|(a, b)| *b == *a + 1));
            }
            for column in fp.columns() {
                assert!(column.iter().tuple_windows().all(|(a, b)| *a == *b + 10));
            }
        }
    }

    #[test]
    fn oversized_footprints_never_fit() {
        let idx = indexer(2, 2);
        let mut reserver = Reserver::new(&idx);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(!reserver.try_reserve(Footprint { height: 3, width: 1 }, &mut rng));
        assert!(reserver.into_reserved().is_empty());
    }

    #[test]
    fn empty_footprints_never_fit() {
        let idx = indexer(10, 10);
        let mut reserver = Reserver::new(&idx);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(!reserver.try_reserve(Footprint { height: 0, width: 3 }, &mut rng));
        assert!(!reserver.try_reserve(Footprint { height: 4, width: 0 }, &mut rng));
        assert!(reserver.into_reserved().is_empty());
    }

    #[test]
    fn pass_stops_at_the_first_candidate_over_budget() {
        // 1 x 4 board with a budget of one cell: a 1 x 2 drawn first ends the pass before the 1 x 1 is tried
        let idx = indexer(1, 4);
        let config = GeneratorConfig {
            coverage_target: 0.25,
            heights: SizeRange { min: 1, max: 1 },
            widths: SizeRange { min: 1, max: 2 },
            ..GeneratorConfig::default()
        };
        let wide = Footprint { height: 1, width: 2 };

        let (mut wide_first, mut narrow_reserved) = (0, 0);
        for seed in 0..64 {
            let mut order = candidate_footprints(config.heights, config.widths);
            order.shuffle(&mut StdRng::seed_from_u64(seed));

            let reserved = reserve_footprints(&idx, &config, &mut StdRng::seed_from_u64(seed));
            if order[0] == wide {
                wide_first += 1;
                assert!(reserved.is_empty(), "seed {seed}: pass went on after an over-budget candidate");
            } else {
                assert!(reserved.len() <= 1);
                narrow_reserved += reserved.len();
            }
        }
        assert!(wide_first > 0);
        assert!(narrow_reserved > 0);
    }

    #[test]
    fn reserved_positions_block_later_footprints() {
        // 3 x 1 board: only the middle cell is ever available
        let idx = indexer(3, 1);
        let mut reserver = Reserver::new(&idx);
        let mut rng = StdRng::seed_from_u64(3);

        let fp = Footprint { height: 1, width: 1 };
        let accepted = (0..50).filter(|_| reserver.try_reserve(fp, &mut rng)).count();
        assert_eq!(accepted, 1);
        assert_eq!(reserver.into_reserved(), vec![array![[2]]]);
    }

    #[test]
    fn single_column_corners() {
        let mut rng = StdRng::seed_from_u64(0);
        let fp = array![[75], [65], [55], [45]];
        assert_eq!(corners(&fp, &mut rng), Some((45, 75)));
    }

    #[test]
    fn empty_footprint_has_no_corners() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(corners(&Array2::<usize>::zeros((0, 3)), &mut rng), None);
        assert_eq!(corners(&Array2::<usize>::zeros((3, 0)), &mut rng), None);
    }

    #[test]
    fn wide_corners_are_diagonal() {
        let fp = array![[23, 24, 25], [13, 14, 15], [3, 4, 5]];
        let mut seen = Vec::new();
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pair = corners(&fp, &mut rng).unwrap();
            assert!(pair == (5, 23) || pair == (3, 25), "unexpected corners {pair:?}");
            seen.push(pair);
        }
        assert_eq!(seen.into_iter().unique().count(), 2);
    }
}
