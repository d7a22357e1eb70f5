//! Matcher module - connected-region detection and the chain resolver
//!
//! A resolution sequence runs once per piece lock:
//!
//! ```text
//! Idle -> Gravity -> Scan --(matches)--> Clear -> [delay] -> Gravity -> Scan -> ...
//!                      \--(no matches)--> Settled
//! ```
//!
//! [`ChainResolver`] is the explicit state machine for that loop. It is driven by the
//! session tick: each call to [`ChainResolver::advance`] either waits out the step
//! delay, performs one pass, or reports that the board has settled. Every clearing
//! pass strictly shrinks the occupied-cell count, so a sequence always ends.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::scoring::chain_score;
use crate::types::{FruitType, BOARD_CELLS, BOARD_HEIGHT, BOARD_WIDTH, MIN_MATCH_SIZE};

/// Cell coordinates of one region, in discovery order
pub type RegionCells = ArrayVec<(u8, u8), BOARD_CELLS>;

/// Connected same-fruit region of at least [`MIN_MATCH_SIZE`] cells
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGroup {
    pub fruit: FruitType,
    pub cells: RegionCells,
}

impl MatchGroup {
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

const NEIGHBORS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Breadth-first flood fill from (x, y) over cells holding the same fruit.
///
/// Marks every reached cell in `visited`. Returns an empty region if the start
/// cell is empty or already visited.
fn flood_region(grid: &Grid, x: u8, y: u8, visited: &mut [bool; BOARD_CELLS]) -> RegionCells {
    let width = BOARD_WIDTH as usize;
    let mut region = RegionCells::new();

    let start = y as usize * width + x as usize;
    let fruit = match grid.get(x as i8, y as i8) {
        Some(Some(fruit)) if !visited[start] => fruit,
        _ => return region,
    };

    // `region` doubles as the BFS queue: cells are appended once and read in order.
    visited[start] = true;
    region.push((x, y));
    let mut head = 0usize;

    while head < region.len() {
        let (cx, cy) = region[head];
        head += 1;

        for (dx, dy) in NEIGHBORS {
            let nx = cx as i8 + dx;
            let ny = cy as i8 + dy;
            if grid.get(nx, ny) != Some(Some(fruit)) {
                continue;
            }
            let idx = ny as usize * width + nx as usize;
            if !visited[idx] {
                visited[idx] = true;
                region.push((nx as u8, ny as u8));
            }
        }
    }

    region
}

/// Scan the grid in row-major order and collect every region of at least
/// [`MIN_MATCH_SIZE`] same-fruit cells (4-directional adjacency).
pub fn find_matches(grid: &Grid) -> Vec<MatchGroup> {
    let mut visited = [false; BOARD_CELLS];
    let mut groups = Vec::new();

    for y in 0..BOARD_HEIGHT {
        for x in 0..BOARD_WIDTH {
            let region = flood_region(grid, x, y, &mut visited);
            if region.len() < MIN_MATCH_SIZE {
                continue;
            }
            if let Some(Some(fruit)) = grid.get(x as i8, y as i8) {
                groups.push(MatchGroup {
                    fruit,
                    cells: region,
                });
            }
        }
    }

    groups
}

/// Collapse columns until a pass moves nothing. Returns the number of passes that
/// moved at least one cell.
pub fn settle_gravity(grid: &mut Grid) -> u32 {
    let mut passes = 0u32;
    while grid.collapse_columns() {
        passes += 1;
    }
    passes
}

/// Outcome of one clearing pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearReport {
    /// 1 for the first pass after a lock
    pub chain: u32,
    /// Total cells removed this pass (sum over all groups)
    pub cleared: u32,
    pub groups: u32,
    pub score_delta: u32,
    /// Every removed cell, group by group
    pub cells: Vec<(u8, u8)>,
}

/// Result of [`ChainResolver::advance`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveStep {
    /// Step delay still running
    Waiting,
    /// A pass cleared cells; the next pass runs after the step delay
    Cleared(ClearReport),
    /// The last scan found nothing; the sequence is over
    Settled { passes: u32 },
}

/// Resolution sequence for one lock event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainResolver {
    chain: u32,
    wait_ms: u32,
    step_delay_ms: u32,
}

impl ChainResolver {
    /// Start a sequence; the first pass runs on the first `advance` call
    pub fn new(step_delay_ms: u32) -> Self {
        Self {
            chain: 1,
            wait_ms: 0,
            step_delay_ms,
        }
    }

    /// Chain index of the next pass
    pub fn chain(&self) -> u32 {
        self.chain
    }

    /// Remaining step delay before the next pass
    pub fn wait_ms(&self) -> u32 {
        self.wait_ms
    }

    /// Advance the sequence by `elapsed_ms`.
    ///
    /// A pass settles gravity, scans for matches and clears every matched cell,
    /// scoring `cleared * 10 * level * 2^chain`.
    pub fn advance(&mut self, grid: &mut Grid, elapsed_ms: u32, level: u32) -> ResolveStep {
        self.wait_ms = self.wait_ms.saturating_sub(elapsed_ms);
        if self.wait_ms > 0 {
            return ResolveStep::Waiting;
        }

        settle_gravity(grid);
        let groups = find_matches(grid);
        if groups.is_empty() {
            return ResolveStep::Settled {
                passes: self.chain - 1,
            };
        }

        let mut cells = Vec::with_capacity(groups.iter().map(MatchGroup::len).sum());
        for group in &groups {
            for &(x, y) in &group.cells {
                grid.clear(x as i8, y as i8);
                cells.push((x, y));
            }
        }

        let cleared = cells.len() as u32;
        let report = ClearReport {
            chain: self.chain,
            cleared,
            groups: groups.len() as u32,
            score_delta: chain_score(cleared, level, self.chain),
            cells,
        };

        self.chain += 1;
        self.wait_ms = self.step_delay_ms;
        ResolveStep::Cleared(report)
    }
}

/// Run a whole sequence without delays, returning every clearing pass
pub fn resolve_all(grid: &mut Grid, level: u32) -> Vec<ClearReport> {
    let mut resolver = ChainResolver::new(0);
    let mut reports = Vec::new();
    while let ResolveStep::Cleared(report) = resolver.advance(grid, 0, level) {
        reports.push(report);
    }
    reports
}
