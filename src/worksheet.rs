//! The worksheet: an ordered list of cell ids plus the id → cell table.
//!
//! The order vector defines display and execution order. Every id in it
//! has exactly one entry in the table, and the table holds nothing the
//! order does not reference. `from_parts` checks this for worksheets
//! assembled from the outside; every mutation below keeps it.

use log::debug;
use std::collections::{HashMap, HashSet};

use crate::cell::{Cell, CellId, CellMode, ExecutionCounter};
use crate::config::{InsertPolicy, WorksheetConfig};
use crate::ids::CellIdGenerator;
use crate::WorksheetError;

#[derive(Debug, Clone)]
pub struct Worksheet {
  order: Vec<CellId>,
  cells: HashMap<CellId, Cell>,
  ids: CellIdGenerator,
  config: WorksheetConfig,
}

impl Default for Worksheet {
  fn default() -> Self {
    Self::new()
  }
}

impl Worksheet {
  pub fn new() -> Self {
    Self::with_config(WorksheetConfig::default())
  }

  pub fn with_config(config: WorksheetConfig) -> Self {
    Self {
      order: Vec::new(),
      cells: HashMap::new(),
      ids: CellIdGenerator::from_seed(config.seed),
      config,
    }
  }

  /// Assemble a worksheet from an order vector and a cell table,
  /// rejecting duplicate ids, ids without a cell and unreferenced cells.
  pub fn from_parts(
    order: Vec<CellId>,
    cells: HashMap<CellId, Cell>,
    config: WorksheetConfig,
  ) -> Result<Self, WorksheetError> {
    let mut seen = HashSet::with_capacity(order.len());
    for id in &order {
      if !seen.insert(*id) {
        return Err(WorksheetError::DuplicateCell(*id));
      }
      match cells.get(id) {
        None => return Err(WorksheetError::MissingCell(*id)),
        Some(cell) if cell.id != *id => {
          return Err(WorksheetError::MismatchedId {
            key: *id,
            cell: cell.id,
          })
        }
        Some(_) => {}
      }
    }
    if let Some(orphan) = cells.keys().find(|id| !seen.contains(*id)) {
      return Err(WorksheetError::OrphanedCell(*orphan));
    }

    let mut worksheet = Self::with_config(config);
    worksheet.order = order;
    worksheet.cells = cells;
    Ok(worksheet)
  }

  /// Build a worksheet from cells in display order.
  pub fn from_cells(
    cells: impl IntoIterator<Item = Cell>,
    config: WorksheetConfig,
  ) -> Result<Self, WorksheetError> {
    let mut order = Vec::new();
    let mut table = HashMap::new();
    for cell in cells {
      if table.contains_key(&cell.id) {
        return Err(WorksheetError::DuplicateCell(cell.id));
      }
      order.push(cell.id);
      table.insert(cell.id, cell);
    }
    Self::from_parts(order, table, config)
  }

  pub fn config(&self) -> &WorksheetConfig {
    &self.config
  }

  pub fn len(&self) -> usize {
    self.order.len()
  }

  pub fn is_empty(&self) -> bool {
    self.order.is_empty()
  }

  /// Cell ids in display order.
  pub fn ids(&self) -> &[CellId] {
    &self.order
  }

  /// Cells in display order.
  pub fn iter(&self) -> impl Iterator<Item = &Cell> + '_ {
    self.order.iter().filter_map(|id| self.cells.get(id))
  }

  pub fn get(&self, id: &CellId) -> Option<&Cell> {
    self.cells.get(id)
  }

  pub fn get_mut(&mut self, id: &CellId) -> Option<&mut Cell> {
    self.cells.get_mut(id)
  }

  pub fn contains(&self, id: &CellId) -> bool {
    self.cells.contains_key(id)
  }

  /// Zero-based position of `id` in the worksheet order.
  pub fn index_of(&self, id: &CellId) -> Option<usize> {
    self.order.iter().position(|candidate| candidate == id)
  }

  /// The cell at `position`.
  pub fn cell_at(&self, position: usize) -> Result<&Cell, WorksheetError> {
    self
      .order
      .get(position)
      .and_then(|id| self.cells.get(id))
      .ok_or(WorksheetError::PositionOutOfRange {
        position,
        len: self.order.len(),
      })
  }

  pub fn cell_at_mut(
    &mut self,
    position: usize,
  ) -> Result<&mut Cell, WorksheetError> {
    let len = self.order.len();
    let id = self
      .order
      .get(position)
      .ok_or(WorksheetError::PositionOutOfRange { position, len })?;
    self
      .cells
      .get_mut(id)
      .ok_or(WorksheetError::PositionOutOfRange { position, len })
  }

  /// The currently active cell, if any.
  pub fn active(&self) -> Option<&Cell> {
    self.iter().find(|cell| cell.active)
  }

  /// Make `id` the one active cell.
  pub fn activate(&mut self, id: &CellId) -> Result<(), WorksheetError> {
    if !self.cells.contains_key(id) {
      return Err(WorksheetError::UnknownCell(*id));
    }
    for cell in self.cells.values_mut() {
      cell.active = cell.id == *id;
    }
    Ok(())
  }

  /// A fresh id from this worksheet's generator.
  pub fn next_id(&mut self) -> CellId {
    self.ids.next_id()
  }

  /// Append `cell` to the end of the worksheet.
  pub fn push_cell(&mut self, cell: Cell) -> Result<CellId, WorksheetError> {
    let id = cell.id;
    if self.cells.contains_key(&id) {
      return Err(WorksheetError::DuplicateCell(id));
    }
    self.order.push(id);
    self.cells.insert(id, cell);
    Ok(id)
  }

  /// Synthesize an empty, unexecuted cell and register it.
  ///
  /// With the default [`InsertPolicy::Append`] the cell goes to the end
  /// of the worksheet no matter which `position` is asked for.
  pub fn insert_blank(&mut self, position: usize) -> CellId {
    let id = self.next_id();
    self.place_blank(id, position);
    id
  }

  /// Like [`Worksheet::insert_blank`], for an id reserved earlier with
  /// [`Worksheet::next_id`].
  pub fn insert_blank_as(
    &mut self,
    id: CellId,
    position: usize,
  ) -> Result<CellId, WorksheetError> {
    if self.cells.contains_key(&id) {
      return Err(WorksheetError::DuplicateCell(id));
    }
    self.place_blank(id, position);
    Ok(id)
  }

  fn place_blank(&mut self, id: CellId, position: usize) {
    let cell = Cell::blank(id, self.config.default_kind);

    match self.config.insert_policy {
      InsertPolicy::Append => {
        debug!(
          "appending blank {} cell {} (requested position {position})",
          cell.kind, id
        );
        self.order.push(id);
      }
      InsertPolicy::AtPosition => {
        let at = position.min(self.order.len());
        debug!("inserting blank {} cell {} at {at}", cell.kind, id);
        self.order.insert(at, id);
      }
    }
    self.cells.insert(id, cell);
  }

  pub fn set_source(
    &mut self,
    id: &CellId,
    source: impl Into<String>,
  ) -> Result<(), WorksheetError> {
    let cell = self
      .cells
      .get_mut(id)
      .ok_or(WorksheetError::UnknownCell(*id))?;
    cell.source = source.into();
    Ok(())
  }

  pub fn set_mode(
    &mut self,
    id: &CellId,
    mode: CellMode,
  ) -> Result<(), WorksheetError> {
    let cell = self
      .cells
      .get_mut(id)
      .ok_or(WorksheetError::UnknownCell(*id))?;
    cell.mode = mode;
    Ok(())
  }

  /// Set the cell's execution marker. Executing a cell through a session
  /// never does this; it is for the host that actually runs the code.
  pub fn record_execution(
    &mut self,
    id: &CellId,
    count: usize,
  ) -> Result<(), WorksheetError> {
    let cell = self
      .cells
      .get_mut(id)
      .ok_or(WorksheetError::UnknownCell(*id))?;
    cell.execution_counter = ExecutionCounter::Executed(count);
    Ok(())
  }
}
