//! Enumerations for TUI state management.

use chrono::{Duration, Local, NaiveDate};

use crate::cache::TaskKey;
use crate::gateway::Destination;

/// Application state for the terminal user interface.
#[derive(Clone, Copy, PartialEq)]
pub enum AppState {
    Board,
    AddTask,
    TaskDetail,
    CommentDialog,
    Help,
}

/// Input mode for text entry fields.
#[derive(Clone)]
pub enum InputMode {
    None,
    Text,
}

/// Which board the TUI is pointed at: one task list, one date.
#[derive(Clone, PartialEq, Debug)]
pub struct BoardContext {
    pub destination: Destination,
    pub date: NaiveDate,
}

impl BoardContext {
    /// Open a destination on today's board.
    pub fn new(destination: Destination) -> Self {
        BoardContext {
            destination,
            date: Local::now().date_naive(),
        }
    }

    /// Cache key for the current board.
    pub fn key(&self) -> TaskKey {
        TaskKey {
            group_id: self.destination.group_id.clone(),
            task_list_id: self.destination.task_list_id,
            date: self.date,
        }
    }

    /// Move the board one day forward or back.
    pub fn step_day(&mut self, forward: bool) {
        self.date = if forward {
            self.date + Duration::days(1)
        } else {
            self.date - Duration::days(1)
        };
    }
}
