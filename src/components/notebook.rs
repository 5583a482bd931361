//! The notebook controller: moves focus through the worksheet as cells
//! are executed, growing it with a blank cell when the last one runs.
//!
//! The executed cell itself is left alone; running code and recording
//! its output belongs to whoever hosts the worksheet.

use log::{debug, error};

use super::{Component, Context, Intent};
use crate::cell::CellId;
use crate::tasks::Deferred;
use crate::WorksheetError;

#[derive(Debug, Default)]
pub struct NotebookController;

impl NotebookController {
  pub const NAME: &'static str = "notebook-editor";

  pub fn new() -> Self {
    Self
  }

  fn handle_execute(
    &mut self,
    id: &CellId,
    cx: &mut Context<'_>,
  ) -> Result<(), WorksheetError> {
    let Some(current) = cx.worksheet().index_of(id) else {
      error!("execute-cell referenced cell {id}, which is not in the worksheet");
      return Err(WorksheetError::UnknownCell(*id));
    };
    let len = cx.worksheet().len();

    let next = current + 1;
    debug!("setting active cell to index {next}");
    let target = if next < len {
      debug!("found an existing cell to make active");
      cx.worksheet().cell_at(next)?.id
    } else {
      debug!("queueing a blank cell to append");
      cx.insert_blank(next)
    };
    cx.defer(Deferred::Activate(target));
    Ok(())
  }
}

impl Component for NotebookController {
  fn name(&self) -> &'static str {
    Self::NAME
  }

  fn handle(
    &mut self,
    intent: &Intent,
    cx: &mut Context<'_>,
  ) -> Result<(), WorksheetError> {
    debug!("{} intent for cell {}", intent.name(), intent.cell_id());
    match intent {
      Intent::ExecuteCell(id) => self.handle_execute(id, cx),
      Intent::UpdateSource(id, source) => {
        if !cx.worksheet().contains(id) {
          error!("update-source referenced unknown cell {id}");
          return Err(WorksheetError::UnknownCell(*id));
        }
        cx.defer(Deferred::SetSource(*id, source.clone()));
        Ok(())
      }
      Intent::EditCell(id) => {
        if !cx.worksheet().contains(id) {
          error!("edit-cell referenced unknown cell {id}");
          return Err(WorksheetError::UnknownCell(*id));
        }
        Ok(())
      }
    }
  }
}
