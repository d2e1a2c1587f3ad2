//! Per-cell combustion state machine
//!
//! A cell is a tree that heats up next to fire, burns through its fuel, lies as
//! ash for a while and then regrows. Walls sit outside that cycle entirely.
//!
//! Transitions are computed by [`Cell::next_tick`], which never mutates the
//! cell it reads from. The grid feeds it a neighbour count taken from the
//! pre-tick buffer and stores the result in the next buffer.

use serde::{Deserialize, Serialize};

use super::config::CombustionParams;

/// Externally visible state of a cell. Exactly one holds at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Unburnt tree, possibly carrying some heat
    Dormant,
    /// Actively burning
    Ignited,
    /// Burnt out, waiting to regrow
    Ash,
    /// Inert fire break
    Wall,
}

impl CellState {
    /// Single character used by text drivers
    pub fn glyph(self) -> char {
        match self {
            Self::Dormant => 'T',
            Self::Ignited => '*',
            Self::Ash => '.',
            Self::Wall => '#',
        }
    }
}

impl std::fmt::Display for CellState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dormant => f.write_str("dormant"),
            Self::Ignited => f.write_str("ignited"),
            Self::Ash => f.write_str("ash"),
            Self::Wall => f.write_str("wall"),
        }
    }
}

/// One grid square
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    fuel_remaining: u32,
    heat: u32,
    ignited: bool,
    /// Set on ignition, cleared when the cell starts its next burn step
    ignited_this_tick: bool,
    ash: bool,
    time_as_ash: u32,
    wall: bool,
}

impl Cell {
    /// Fresh dormant tree with a full fuel load
    pub fn new(fuel_capacity: u32) -> Self {
        Self {
            fuel_remaining: fuel_capacity,
            heat: 0,
            ignited: false,
            ignited_this_tick: false,
            ash: false,
            time_as_ash: 0,
            wall: false,
        }
    }

    pub fn state(&self) -> CellState {
        if self.wall {
            CellState::Wall
        } else if self.ignited {
            CellState::Ignited
        } else if self.ash {
            CellState::Ash
        } else {
            CellState::Dormant
        }
    }

    pub fn fuel_remaining(&self) -> u32 {
        self.fuel_remaining
    }

    pub fn heat(&self) -> u32 {
        self.heat
    }

    pub fn time_as_ash(&self) -> u32 {
        self.time_as_ash
    }

    pub fn is_ignited(&self) -> bool {
        self.ignited
    }

    pub fn ignited_this_tick(&self) -> bool {
        self.ignited_this_tick
    }

    pub fn is_ash(&self) -> bool {
        self.ash
    }

    pub fn is_wall(&self) -> bool {
        self.wall
    }

    /// Whether this cell heats its neighbours.
    ///
    /// A cell that caught fire during the current tick does not count yet.
    #[inline]
    pub fn is_spreading(&self) -> bool {
        self.ignited && !self.ignited_this_tick
    }

    /// Manually set the cell alight.
    ///
    /// Only dormant trees can be ignited; otherwise the blocking state is
    /// returned and the cell is left untouched.
    pub fn ignite(&mut self) -> Result<(), CellState> {
        match self.state() {
            CellState::Dormant => {
                self.catch_fire();
                Ok(())
            }
            state => Err(state),
        }
    }

    /// Turn a dormant tree into a wall, or a wall back into a fresh tree.
    ///
    /// Burning and ash cells cannot become walls.
    pub fn toggle_wall(&mut self, params: &CombustionParams) -> Result<(), CellState> {
        match self.state() {
            CellState::Wall => {
                *self = Self::new(params.fuel_capacity);
                Ok(())
            }
            CellState::Dormant => {
                self.wall = true;
                self.heat = 0;
                Ok(())
            }
            state => Err(state),
        }
    }

    /// Start of this cell's own burn step: it is no longer freshly ignited.
    #[inline]
    pub(crate) fn begin_burn_step(&mut self) {
        if self.ignited {
            self.ignited_this_tick = false;
        }
    }

    /// Compute this cell's value after one tick.
    ///
    /// `neighbours_burning` must be counted from the pre-tick state of the
    /// neighbours. Walls are returned unchanged.
    pub fn next_tick(&self, neighbours_burning: u32, params: &CombustionParams) -> Self {
        let mut next = self.clone();
        if next.wall {
            return next;
        }

        if next.ignited {
            next.ignited_this_tick = false;
            next.fuel_remaining = next.fuel_remaining.saturating_sub(1);
            if next.fuel_remaining == 0 {
                next.extinguish();
            }
        } else if next.ash {
            next.time_as_ash += 1;
            if next.time_as_ash > params.ash_time {
                next.refresh(params.fuel_capacity);
            }
        } else if neighbours_burning > 0 {
            next.heat += neighbours_burning;
            if next.heat >= params.heat_to_ignite {
                next.catch_fire();
            }
        }
        next
    }

    fn catch_fire(&mut self) {
        self.ignited = true;
        self.ignited_this_tick = true;
        self.heat = 0;
    }

    fn extinguish(&mut self) {
        self.heat = 0;
        self.ignited = false;
        self.ignited_this_tick = false;
        self.ash = true;
    }

    fn refresh(&mut self, fuel_capacity: u32) {
        self.time_as_ash = 0;
        self.fuel_remaining = fuel_capacity;
        self.heat = 0;
        self.ash = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(fuel_capacity: u32, heat_to_ignite: u32, ash_time: u32) -> CombustionParams {
        CombustionParams {
            fuel_capacity,
            heat_to_ignite,
            ash_time,
        }
    }

    /// Run one tick on a lone cell, honouring the burn-step start.
    fn tick(cell: &Cell, neighbours_burning: u32, params: &CombustionParams) -> Cell {
        let mut current = cell.clone();
        current.begin_burn_step();
        current.next_tick(neighbours_burning, params)
    }

    #[test]
    fn test_new_cell_is_dormant_with_full_fuel() {
        let cell = Cell::new(40);
        assert_eq!(cell.state(), CellState::Dormant);
        assert_eq!(cell.fuel_remaining(), 40);
        assert_eq!(cell.heat(), 0);
        assert!(!cell.is_spreading());
    }

    #[test]
    fn test_fuel_burns_down_one_per_tick_then_ash() {
        let p = params(3, 5, 80);
        let mut cell = Cell::new(3);
        cell.ignite().unwrap();
        assert!(cell.ignited_this_tick());
        assert!(!cell.is_spreading());

        cell = tick(&cell, 0, &p);
        assert_eq!(cell.state(), CellState::Ignited);
        assert_eq!(cell.fuel_remaining(), 2);
        assert!(cell.is_spreading());

        cell = tick(&cell, 0, &p);
        assert_eq!(cell.fuel_remaining(), 1);
        assert_eq!(cell.state(), CellState::Ignited);

        cell = tick(&cell, 4, &p);
        assert_eq!(cell.fuel_remaining(), 0);
        assert_eq!(cell.state(), CellState::Ash);
        assert_eq!(cell.heat(), 0);

        // Ash never dips below zero fuel
        cell = tick(&cell, 0, &p);
        assert_eq!(cell.fuel_remaining(), 0);
    }

    #[test]
    fn test_heat_threshold_is_inclusive() {
        let p = params(40, 5, 80);
        let mut cell = Cell::new(40);
        for _ in 0..4 {
            cell = tick(&cell, 1, &p);
        }
        assert_eq!(cell.heat(), 4);
        assert_eq!(cell.state(), CellState::Dormant);

        cell = tick(&cell, 1, &p);
        assert_eq!(cell.state(), CellState::Ignited);
        assert!(cell.ignited_this_tick());
        assert_eq!(cell.heat(), 0);
    }

    #[test]
    fn test_heat_accumulates_by_neighbour_count() {
        let p = params(40, 5, 80);
        let cell = tick(&Cell::new(40), 3, &p);
        assert_eq!(cell.heat(), 3);
        assert_eq!(cell.state(), CellState::Dormant);

        let cell = tick(&cell, 2, &p);
        assert_eq!(cell.state(), CellState::Ignited);
    }

    #[test]
    fn test_no_burning_neighbours_keeps_heat() {
        let p = params(40, 5, 80);
        let cell = tick(&Cell::new(40), 2, &p);
        let cell = tick(&cell, 0, &p);
        assert_eq!(cell.heat(), 2);
        assert_eq!(cell.state(), CellState::Dormant);
    }

    #[test]
    fn test_ash_refreshes_after_ash_time_plus_one_ticks() {
        let p = params(1, 1, 3);
        let mut cell = Cell::new(1);
        cell.ignite().unwrap();
        cell = tick(&cell, 0, &p);
        assert_eq!(cell.state(), CellState::Ash);

        for expected in 1..=3 {
            cell = tick(&cell, 4, &p);
            assert_eq!(cell.state(), CellState::Ash);
            assert_eq!(cell.time_as_ash(), expected);
            assert_eq!(cell.heat(), 0, "ash does not collect heat");
        }

        cell = tick(&cell, 0, &p);
        assert_eq!(cell.state(), CellState::Dormant);
        assert_eq!(cell.time_as_ash(), 0);
        assert_eq!(cell.fuel_remaining(), 1);
        assert_eq!(cell.heat(), 0);
    }

    #[test]
    fn test_ignite_rejects_non_dormant_cells() {
        let p = params(40, 5, 80);
        let mut burning = Cell::new(40);
        burning.ignite().unwrap();
        assert_eq!(burning.ignite(), Err(CellState::Ignited));

        let mut wall = Cell::new(40);
        wall.toggle_wall(&p).unwrap();
        assert_eq!(wall.ignite(), Err(CellState::Wall));

        let p = params(1, 1, 10);
        let mut ash = Cell::new(1);
        ash.ignite().unwrap();
        let mut ash = tick(&ash, 0, &p);
        assert_eq!(ash.ignite(), Err(CellState::Ash));
    }

    #[test]
    fn test_manual_ignite_clears_heat() {
        let p = params(40, 5, 80);
        let mut cell = tick(&Cell::new(40), 3, &p);
        cell.ignite().unwrap();
        assert_eq!(cell.heat(), 0);
    }

    #[test]
    fn test_toggle_wall_twice_restores_fresh_tree() {
        let p = params(40, 5, 80);
        let mut cell = Cell::new(40);
        cell.toggle_wall(&p).unwrap();
        assert_eq!(cell.state(), CellState::Wall);
        cell.toggle_wall(&p).unwrap();
        assert_eq!(cell, Cell::new(40));
    }

    #[test]
    fn test_toggle_wall_rejects_burning_and_ash() {
        let p = params(1, 1, 10);
        let mut cell = Cell::new(1);
        cell.ignite().unwrap();
        assert_eq!(cell.toggle_wall(&p), Err(CellState::Ignited));

        let mut cell = tick(&cell, 0, &p);
        assert_eq!(cell.state(), CellState::Ash);
        assert_eq!(cell.toggle_wall(&p), Err(CellState::Ash));
    }

    #[test]
    fn test_wall_ignores_ticks() {
        let p = params(40, 1, 80);
        let mut wall = Cell::new(40);
        wall.toggle_wall(&p).unwrap();
        let before = wall.clone();
        for _ in 0..10 {
            wall = tick(&wall, 4, &p);
        }
        assert_eq!(wall, before);
    }

    #[test]
    fn test_state_glyphs_and_names() {
        assert_eq!(CellState::Dormant.glyph(), 'T');
        assert_eq!(CellState::Ignited.glyph(), '*');
        assert_eq!(CellState::Ash.glyph(), '.');
        assert_eq!(CellState::Wall.glyph(), '#');
        assert_eq!(CellState::Ignited.to_string(), "ignited");
    }
}
