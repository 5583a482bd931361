use thiserror::Error;

pub mod cell;
pub mod components;
pub mod config;
pub mod ids;
pub mod session;
pub mod tasks;
pub mod worksheet;

pub use cell::{Cell, CellId, CellKind, CellMode, ExecutionCounter};
pub use components::{
  Component, ComponentTable, Context, Intent, MarkdownCellController,
  NotebookController,
};
pub use config::{InsertPolicy, WorksheetConfig};
pub use ids::CellIdGenerator;
pub use session::{Session, WorksheetObserver};
pub use tasks::{Deferred, TaskQueue};
pub use worksheet::Worksheet;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorksheetError {
  #[error("Cell {0} is not in the worksheet")]
  UnknownCell(CellId),
  #[error("Position {position} is out of range for a worksheet of {len} cells")]
  PositionOutOfRange { position: usize, len: usize },
  #[error("Cell {0} appears more than once in the worksheet")]
  DuplicateCell(CellId),
  #[error("Worksheet references cell {0} but has no data for it")]
  MissingCell(CellId),
  #[error("Cell {0} is not referenced by the worksheet order")]
  OrphanedCell(CellId),
  #[error("Cell stored under {key} carries id {cell}")]
  MismatchedId { key: CellId, cell: CellId },
  #[error("Invalid cell kind: {0}")]
  InvalidCellKind(String),
}
