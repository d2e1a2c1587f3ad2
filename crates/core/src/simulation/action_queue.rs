//! Driver action queue
//!
//! Drivers do not poke the grid directly while a simulation is running; they
//! submit actions that are applied, in submission order, at the start of the
//! next update. Every applied action is kept in a bounded history so a run can
//! be replayed tick for tick.

use std::collections::VecDeque;

use crate::core_types::{CellAction, GridError};

/// Cell operation requested by a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DriverAction {
    pub action: CellAction,
    pub row: usize,
    pub col: usize,
}

impl DriverAction {
    pub fn new(action: CellAction, row: usize, col: usize) -> Self {
        Self { action, row, col }
    }

    /// Set a dormant tree alight
    pub fn ignite(row: usize, col: usize) -> Self {
        Self::new(CellAction::Ignite, row, col)
    }

    /// Place or remove a wall
    pub fn toggle_wall(row: usize, col: usize) -> Self {
        Self::new(CellAction::ToggleWall, row, col)
    }
}

/// Result of applying a driver action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied,
    Rejected(GridError),
}

impl ActionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

impl From<Result<(), GridError>> for ActionOutcome {
    fn from(result: Result<(), GridError>) -> Self {
        match result {
            Ok(()) => Self::Applied,
            Err(err) => Self::Rejected(err),
        }
    }
}

/// An action together with when it ran and what happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutedAction {
    pub action: DriverAction,
    /// Ticks completed before the action was applied
    pub tick: u64,
    pub outcome: ActionOutcome,
}

/// Pending actions plus the record of what has already been applied
#[derive(Debug)]
pub struct ActionQueue {
    /// Actions pending execution (to be processed in next update)
    pending: Vec<DriverAction>,
    /// Actions executed in the current update
    executed_this_tick: Vec<ExecutedAction>,
    /// History of executed actions, oldest first
    history: VecDeque<ExecutedAction>,
    /// Maximum history size (oldest actions are dropped)
    max_history: usize,
    /// How many entries have been dropped from the front of the history
    dropped: usize,
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new(10000)
    }
}

impl ActionQueue {
    /// Create a new action queue with specified history limit
    pub fn new(max_history: usize) -> Self {
        Self {
            pending: Vec::with_capacity(32),
            executed_this_tick: Vec::with_capacity(32),
            history: VecDeque::with_capacity(max_history.min(1024)),
            max_history,
            dropped: 0,
        }
    }

    pub fn submit_action(&mut self, action: DriverAction) {
        self.pending.push(action);
    }

    pub fn pending_actions(&self) -> &[DriverAction] {
        &self.pending
    }

    pub fn executed_this_tick(&self) -> &[ExecutedAction] {
        &self.executed_this_tick
    }

    pub fn history(&self) -> impl ExactSizeIterator<Item = &ExecutedAction> + '_ {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// False once the history limit has forced old entries out
    pub fn is_history_complete(&self) -> bool {
        self.dropped == 0
    }

    /// Clear the per-tick record at the start of each update
    pub fn begin_tick(&mut self) {
        self.executed_this_tick.clear();
    }

    pub fn mark_executed(&mut self, executed: ExecutedAction) {
        self.executed_this_tick.push(executed);
        self.history.push_back(executed);

        while self.history.len() > self.max_history {
            self.history.pop_front();
            self.dropped += 1;
        }
    }

    /// Take all pending actions for processing
    pub fn take_pending(&mut self) -> Vec<DriverAction> {
        std::mem::take(&mut self.pending)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.executed_this_tick.clear();
        self.history.clear();
        self.dropped = 0;
    }
}
