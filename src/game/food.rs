use std::collections::HashSet;

use rand::Rng;

use super::grid::Cell;

/// Food on the grid: the single respawning primary cell plus transient bonus
/// cells left behind by dead rivals.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodManager {
    pub primary: Cell,
    pub bonus: HashSet<Cell>,
}

impl FoodManager {
    pub fn new(primary: Cell) -> Self {
        Self {
            primary,
            bonus: HashSet::new(),
        }
    }

    pub fn is_food(&self, cell: Cell) -> bool {
        cell == self.primary || self.bonus.contains(&cell)
    }

    /// Consume a bonus cell; returns false if there was none at `cell`
    pub fn take_bonus(&mut self, cell: Cell) -> bool {
        self.bonus.remove(&cell)
    }

    pub fn add_bonus<I: IntoIterator<Item = Cell>>(&mut self, cells: I) {
        self.bonus.extend(cells);
    }
}

/// Uniformly sample cells until one satisfies `is_free`, giving up after
/// `attempts` tries.
pub fn sample_free_cell<R: Rng>(
    rng: &mut R,
    width: usize,
    height: usize,
    attempts: usize,
    is_free: impl Fn(Cell) -> bool,
) -> Option<Cell> {
    for _ in 0..attempts {
        let cell = Cell::new(
            rng.gen_range(0..width) as i32,
            rng.gen_range(0..height) as i32,
        );
        if is_free(cell) {
            return Some(cell);
        }
    }
    None
}

/// Deterministic row-major scan for the first free cell. Returns None only
/// when the grid is completely occupied.
pub fn scan_free_cell(
    width: usize,
    height: usize,
    is_free: impl Fn(Cell) -> bool,
) -> Option<Cell> {
    for y in 0..height {
        for x in 0..width {
            let cell = Cell::new(x as i32, y as i32);
            if is_free(cell) {
                return Some(cell);
            }
        }
    }
    None
}
