//! Editor components and the table the host registers them in.
//!
//! A component reacts to user intents. It reads the worksheet freely but
//! changes it only through its [`Context`], by queueing deferred tasks.
//! Nothing a component does is visible until the session drains the
//! queue, so an intent that fails halfway leaves no trace.

use crate::cell::CellId;
use crate::tasks::{Deferred, TaskQueue};
use crate::worksheet::Worksheet;
use crate::WorksheetError;

pub mod markdown;
pub mod notebook;

pub use markdown::MarkdownCellController;
pub use notebook::NotebookController;

/// Something the user asked the editor to do with a cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
  /// Run the cell and move focus to the next one (shift-enter).
  ExecuteCell(CellId),
  /// Open a markdown cell's source editor (double click).
  EditCell(CellId),
  /// Replace the cell's source text.
  UpdateSource(CellId, String),
}

impl Intent {
  pub fn cell_id(&self) -> &CellId {
    match self {
      Intent::ExecuteCell(id)
      | Intent::EditCell(id)
      | Intent::UpdateSource(id, _) => id,
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      Intent::ExecuteCell(_) => "execute-cell",
      Intent::EditCell(_) => "edit-cell",
      Intent::UpdateSource(..) => "update-source",
    }
  }
}

/// What a component may touch while it handles an intent.
pub struct Context<'a> {
  worksheet: &'a mut Worksheet,
  tasks: &'a mut TaskQueue,
}

impl<'a> Context<'a> {
  pub fn new(worksheet: &'a mut Worksheet, tasks: &'a mut TaskQueue) -> Self {
    Self { worksheet, tasks }
  }

  pub fn worksheet(&self) -> &Worksheet {
    &*self.worksheet
  }

  pub fn defer(&mut self, task: Deferred) {
    self.tasks.defer(task);
  }

  /// Reserve an id for a blank cell and queue its insertion at
  /// `position`. The cell exists once the queue is drained.
  pub fn insert_blank(&mut self, position: usize) -> CellId {
    let id = self.worksheet.next_id();
    self.defer(Deferred::InsertBlank { id, position });
    id
  }
}

pub trait Component {
  fn name(&self) -> &'static str;

  fn handle(
    &mut self,
    intent: &Intent,
    cx: &mut Context<'_>,
  ) -> Result<(), WorksheetError>;
}

/// The components an editor session runs, in registration order.
#[derive(Default)]
pub struct ComponentTable {
  components: Vec<Box<dyn Component>>,
}

impl ComponentTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// The notebook controller followed by the markdown cell controller.
  pub fn standard() -> Self {
    let mut table = Self::new();
    table.register(NotebookController::new());
    table.register(MarkdownCellController::new());
    table
  }

  pub fn register(&mut self, component: impl Component + 'static) {
    log::debug!("registered component {}", component.name());
    self.components.push(Box::new(component));
  }

  pub fn names(&self) -> Vec<&'static str> {
    self.components.iter().map(|c| c.name()).collect()
  }

  pub fn len(&self) -> usize {
    self.components.len()
  }

  pub fn is_empty(&self) -> bool {
    self.components.is_empty()
  }

  /// Hand `intent` to every component in turn, stopping at the first
  /// error.
  pub fn dispatch(
    &mut self,
    intent: &Intent,
    cx: &mut Context<'_>,
  ) -> Result<(), WorksheetError> {
    for component in &mut self.components {
      component.handle(intent, cx)?;
    }
    Ok(())
  }
}

impl std::fmt::Debug for ComponentTable {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_list().entries(self.names()).finish()
  }
}
