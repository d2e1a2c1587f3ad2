//! Simulation driver facade
//!
//! `FireSimulation` owns a grid and everything a driver needs around it: the
//! queue of pending cell actions, a tick counter, and a replayable action
//! history. Nothing here is global; independent simulations can run side by
//! side and identical inputs always give identical grids.

pub mod action_queue;

pub use action_queue::{ActionOutcome, ActionQueue, DriverAction, ExecutedAction};

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core_types::{CellAction, ConfigError, GridError, SimConfig};
use crate::grid::{FireGrid, GridStats};

/// Counters reported to drivers after each update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Ticks completed
    pub tick: u64,
    pub cells: GridStats,
    pub actions_applied: u64,
    pub actions_rejected: u64,
}

/// A fire grid driven tick by tick
#[derive(Debug)]
pub struct FireSimulation {
    grid: FireGrid,
    config: SimConfig,
    action_queue: ActionQueue,
    tick: u64,
    actions_applied: u64,
    actions_rejected: u64,
}

impl FireSimulation {
    pub fn new(config: &SimConfig) -> Result<Self, ConfigError> {
        let grid = FireGrid::with_config(config)?;
        info!(
            "Fire simulation created: {}x{} grid, tick interval {}ms",
            config.grid_size, config.grid_size, config.tick_interval_ms
        );
        Ok(Self {
            grid,
            config: config.clone(),
            action_queue: ActionQueue::default(),
            tick: 0,
            actions_applied: 0,
            actions_rejected: 0,
        })
    }

    pub fn grid(&self) -> &FireGrid {
        &self.grid
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Ticks completed so far
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Pacing a real-time driver should leave between updates
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.config.tick_interval_ms)
    }

    /// Queue an action for the next update
    pub fn submit_action(&mut self, action: DriverAction) {
        self.action_queue.submit_action(action);
    }

    pub fn ignite_at(&mut self, row: usize, col: usize) {
        self.submit_action(DriverAction::ignite(row, col));
    }

    pub fn toggle_wall_at(&mut self, row: usize, col: usize) {
        self.submit_action(DriverAction::toggle_wall(row, col));
    }

    /// Map a screen point to a cell using the configured cell size
    pub fn cell_at_pixel(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        crate::grid::pixel_to_cell(x, y, self.config.grid_size, self.config.cell_size)
    }

    pub fn pending_action_count(&self) -> usize {
        self.action_queue.pending_actions().len()
    }

    /// Actions applied during the most recent update
    pub fn executed_actions(&self) -> &[ExecutedAction] {
        self.action_queue.executed_this_tick()
    }

    /// Every applied action still held in the bounded history, oldest first
    pub fn action_history(&self) -> Vec<ExecutedAction> {
        self.action_queue.history().copied().collect()
    }

    pub fn is_history_complete(&self) -> bool {
        self.action_queue.is_history_complete()
    }

    /// Apply pending actions in submission order, then advance one tick.
    ///
    /// Rejected actions are logged and recorded; they never abort the update.
    pub fn update(&mut self) {
        self.action_queue.begin_tick();
        for action in self.action_queue.take_pending() {
            let outcome = ActionOutcome::from(self.apply(action));
            match outcome {
                ActionOutcome::Applied => {
                    self.actions_applied += 1;
                    debug!(
                        "Applied {} at ({}, {}) before tick {}",
                        action.action,
                        action.row,
                        action.col,
                        self.tick + 1
                    );
                }
                ActionOutcome::Rejected(err) => {
                    self.actions_rejected += 1;
                    debug!("Ignoring driver action: {}", err);
                }
            }
            self.action_queue.mark_executed(ExecutedAction {
                action,
                tick: self.tick,
                outcome,
            });
        }

        self.grid.advance_tick();
        self.tick += 1;

        let cells = self.grid.stats();
        debug!(
            "Tick {}: dormant={}, ignited={} (+{}), ash={}, walls={}",
            self.tick, cells.dormant, cells.ignited, cells.ignited_last_tick, cells.ash, cells.walls
        );
    }

    /// Run `ticks` updates
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.update();
        }
    }

    fn apply(&mut self, action: DriverAction) -> Result<(), GridError> {
        match action.action {
            CellAction::Ignite => self.grid.ignite_at(action.row, action.col),
            CellAction::ToggleWall => self.grid.toggle_wall_at(action.row, action.col),
        }
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            tick: self.tick,
            cells: self.grid.stats(),
            actions_applied: self.actions_applied,
            actions_rejected: self.actions_rejected,
        }
    }

    /// Rebuild a run from its action history.
    ///
    /// Actions are resubmitted before the update they originally preceded,
    /// then `ticks` updates are run. With a complete history the resulting
    /// grid matches the original one after the same number of ticks.
    pub fn replay(
        config: &SimConfig,
        history: &[ExecutedAction],
        ticks: u64,
    ) -> Result<Self, ConfigError> {
        let mut sim = Self::new(config)?;
        let mut remaining = history.iter().peekable();
        for tick in 0..ticks {
            while let Some(executed) = remaining.next_if(|e| e.tick == tick) {
                sim.submit_action(executed.action);
            }
            sim.update();
        }
        info!(
            "Replayed {} actions over {} ticks",
            sim.actions_applied + sim.actions_rejected,
            ticks
        );
        Ok(sim)
    }
}
