//! An editor session: one worksheet, the components reacting to it and
//! the deferred task queue between them.
//!
//! Intents are processed strictly one at a time. After every component
//! has seen an intent the session drains the task queue, so each
//! activation lands before the next intent is looked at and before
//! observers are told about the change.

use log::debug;
use tokio::sync::mpsc;

use crate::cell::CellId;
use crate::components::{ComponentTable, Context, Intent};
use crate::tasks::TaskQueue;
use crate::worksheet::Worksheet;
use crate::WorksheetError;

/// Read-only view of the worksheet after every processed intent. The
/// rendering layer implements this.
pub trait WorksheetObserver {
  fn worksheet_changed(&mut self, worksheet: &Worksheet);
}

impl<F> WorksheetObserver for F
where
  F: FnMut(&Worksheet),
{
  fn worksheet_changed(&mut self, worksheet: &Worksheet) {
    self(worksheet)
  }
}

#[derive(Debug)]
pub struct Session {
  worksheet: Worksheet,
  components: ComponentTable,
  tasks: TaskQueue,
}

impl Session {
  pub fn new(worksheet: Worksheet, components: ComponentTable) -> Self {
    Self {
      worksheet,
      components,
      tasks: TaskQueue::new(),
    }
  }

  /// A session running [`ComponentTable::standard`].
  pub fn with_standard_components(worksheet: Worksheet) -> Self {
    Self::new(worksheet, ComponentTable::standard())
  }

  pub fn worksheet(&self) -> &Worksheet {
    &self.worksheet
  }

  pub fn into_worksheet(self) -> Worksheet {
    self.worksheet
  }

  pub fn components(&self) -> &ComponentTable {
    &self.components
  }

  /// Process one intent and apply the work it deferred.
  ///
  /// Components only queue work, so a failing intent is undone by
  /// discarding its tasks: the worksheet is left as it was. The component
  /// that rejected the intent has already logged why.
  pub fn dispatch(&mut self, intent: Intent) -> Result<(), WorksheetError> {
    let result = {
      let mut cx = Context::new(&mut self.worksheet, &mut self.tasks);
      self.components.dispatch(&intent, &mut cx)
    };

    match result {
      Ok(()) => {
        let applied = self.tasks.drain(&mut self.worksheet);
        debug!("{} handled, {applied} deferred task(s) applied", intent.name());
        Ok(())
      }
      Err(e) => {
        debug!(
          "{} failed, {} deferred task(s) discarded",
          intent.name(),
          self.tasks.len()
        );
        self.tasks.clear();
        Err(e)
      }
    }
  }

  /// Process intents from `intents` until every sender is gone, telling
  /// `observer` about the worksheet after each one.
  pub async fn run<O>(
    &mut self,
    mut intents: mpsc::Receiver<Intent>,
    observer: &mut O,
  ) where
    O: WorksheetObserver + ?Sized,
  {
    observer.worksheet_changed(&self.worksheet);
    while let Some(intent) = intents.recv().await {
      // Failures are logged where they happen.
      let _ = self.dispatch(intent);
      observer.worksheet_changed(&self.worksheet);
    }
    debug!("intent channel closed");
  }

  /// Look up a cell by `#<position>`, by full id, or by a unique id
  /// prefix.
  pub fn resolve(&self, reference: &str) -> Option<CellId> {
    let reference = reference.trim();
    if let Some(position) = reference.strip_prefix('#') {
      let position: usize = position.parse().ok()?;
      return self.worksheet.cell_at(position).ok().map(|cell| cell.id);
    }
    if let Ok(id) = reference.parse::<CellId>() {
      return self.worksheet.contains(&id).then_some(id);
    }

    let prefix = reference.replace('-', "").to_ascii_lowercase();
    if prefix.is_empty() {
      return None;
    }
    let mut matches = self
      .worksheet
      .ids()
      .iter()
      .filter(|id| id.as_uuid().simple().to_string().starts_with(&prefix));
    match (matches.next(), matches.next()) {
      (Some(id), None) => Some(*id),
      _ => None,
    }
  }
}
