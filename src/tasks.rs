//! Work deferred until the current update cycle has finished.
//!
//! Components never flip editor state while an intent is still being
//! handled. They queue a [`Deferred`] task instead, and the session applies
//! the queue in FIFO order once every component has seen the intent, so
//! the change is in place before the next intent or the next render.

use log::{debug, warn};
use std::collections::VecDeque;

use crate::cell::{CellId, CellMode};
use crate::worksheet::Worksheet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
  Activate(CellId),
  SetMode(CellId, CellMode),
  SetSource(CellId, String),
  /// Add a blank cell under an id reserved while the intent was handled.
  InsertBlank { id: CellId, position: usize },
}

impl Deferred {
  pub fn cell_id(&self) -> &CellId {
    match self {
      Deferred::Activate(id)
      | Deferred::SetMode(id, _)
      | Deferred::SetSource(id, _)
      | Deferred::InsertBlank { id, .. } => id,
    }
  }

  fn apply(self, worksheet: &mut Worksheet) -> Result<(), crate::WorksheetError> {
    match self {
      Deferred::Activate(id) => worksheet.activate(&id),
      Deferred::SetMode(id, mode) => worksheet.set_mode(&id, mode),
      Deferred::SetSource(id, source) => worksheet.set_source(&id, source),
      Deferred::InsertBlank { id, position } => {
        worksheet.insert_blank_as(id, position).map(|_| ())
      }
    }
  }
}

#[derive(Debug, Default)]
pub struct TaskQueue {
  pending: VecDeque<Deferred>,
}

impl TaskQueue {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn defer(&mut self, task: Deferred) {
    self.pending.push_back(task);
  }

  pub fn len(&self) -> usize {
    self.pending.len()
  }

  pub fn is_empty(&self) -> bool {
    self.pending.is_empty()
  }

  pub fn pending(&self) -> impl Iterator<Item = &Deferred> + '_ {
    self.pending.iter()
  }

  /// Drop everything queued without applying it.
  pub fn clear(&mut self) {
    self.pending.clear();
  }

  /// Apply every queued task to `worksheet`, oldest first. Returns the
  /// number of tasks that took effect.
  pub fn drain(&mut self, worksheet: &mut Worksheet) -> usize {
    let mut applied = 0;
    while let Some(task) = self.pending.pop_front() {
      let target = *task.cell_id();
      debug!("applying deferred {task:?}");
      match task.apply(worksheet) {
        Ok(()) => applied += 1,
        // The cell went away between queueing and applying.
        Err(e) => warn!("dropping deferred task for cell {target}: {e}"),
      }
    }
    applied
  }
}
