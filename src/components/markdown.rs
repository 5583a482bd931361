//! View/edit toggle for markdown cells.
//!
//! In view mode a markdown cell shows its rendered text and an edit
//! intent opens the source editor. In edit mode executing the cell
//! switches it back to view mode.

use log::debug;

use super::{Component, Context, Intent};
use crate::cell::CellMode;
use crate::tasks::Deferred;
use crate::WorksheetError;

#[derive(Debug, Default)]
pub struct MarkdownCellController;

impl MarkdownCellController {
  pub const NAME: &'static str = "markdown-cell";

  pub fn new() -> Self {
    Self
  }
}

impl Component for MarkdownCellController {
  fn name(&self) -> &'static str {
    Self::NAME
  }

  fn handle(
    &mut self,
    intent: &Intent,
    cx: &mut Context<'_>,
  ) -> Result<(), WorksheetError> {
    let Some(cell) = cx
      .worksheet()
      .get(intent.cell_id())
      .filter(|cell| cell.is_markdown())
    else {
      return Ok(());
    };
    let (id, mode) = (cell.id, cell.mode);

    match (intent, mode) {
      (Intent::ExecuteCell(_), CellMode::Edit) => {
        debug!("markdown cell {id} switching to view mode");
        cx.defer(Deferred::SetMode(id, CellMode::View));
      }
      (Intent::EditCell(_), CellMode::View) => {
        debug!("markdown cell {id} switching to edit mode");
        cx.defer(Deferred::SetMode(id, CellMode::Edit));
        cx.defer(Deferred::Activate(id));
      }
      (Intent::EditCell(_), CellMode::Edit) => {
        cx.defer(Deferred::Activate(id));
      }
      _ => {}
    }
    Ok(())
  }
}
