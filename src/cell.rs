//! Cells: the unit of notebook content.
//!
//! A cell carries an opaque identifier, a kind from a closed set, its
//! source text and a few pieces of editor state (execution counter,
//! activation flag and, for markdown cells, the view/edit mode).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::WorksheetError;

/// Opaque unique identifier of a cell.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CellId(Uuid);

impl CellId {
  pub fn from_uuid(uuid: Uuid) -> Self {
    Self(uuid)
  }

  pub fn as_uuid(&self) -> &Uuid {
    &self.0
  }

  /// First eight hex digits, enough to tell cells apart on screen.
  pub fn short(&self) -> String {
    let mut s = self.0.simple().to_string();
    s.truncate(8);
    s
  }
}

impl fmt::Display for CellId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.hyphenated())
  }
}

impl FromStr for CellId {
  type Err = uuid::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Uuid::parse_str(s).map(Self)
  }
}

/// The kind of a cell.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
  #[default]
  Code,
  Markdown,
  Heading,
}

impl CellKind {
  pub const ALL: &'static [CellKind] =
    &[CellKind::Code, CellKind::Markdown, CellKind::Heading];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Code => "code",
      Self::Markdown => "markdown",
      Self::Heading => "heading",
    }
  }
}

impl fmt::Display for CellKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.pad(self.as_str())
  }
}

impl FromStr for CellKind {
  type Err = WorksheetError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "code" => Ok(Self::Code),
      "markdown" => Ok(Self::Markdown),
      "heading" => Ok(Self::Heading),
      _ => Err(WorksheetError::InvalidCellKind(s.to_string())),
    }
  }
}

/// Execution marker shown next to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "count")]
pub enum ExecutionCounter {
  #[default]
  Unexecuted,
  Executed(usize),
}

impl fmt::Display for ExecutionCounter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ExecutionCounter::Unexecuted => f.write_str("-"),
      ExecutionCounter::Executed(n) => write!(f, "{n}"),
    }
  }
}

/// Whether a markdown cell shows its rendered form or its source editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellMode {
  View,
  Edit,
}

/// A single notebook cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
  pub id: CellId,
  pub kind: CellKind,
  pub source: String,
  pub execution_counter: ExecutionCounter,
  pub active: bool,
  pub mode: CellMode,
}

impl Cell {
  pub fn new(id: CellId, kind: CellKind, source: impl Into<String>) -> Self {
    // Fresh markdown cells open straight into the editor.
    let mode = match kind {
      CellKind::Markdown => CellMode::Edit,
      CellKind::Code | CellKind::Heading => CellMode::View,
    };
    Self {
      id,
      kind,
      source: source.into(),
      execution_counter: ExecutionCounter::Unexecuted,
      active: false,
      mode,
    }
  }

  /// An empty, unexecuted cell of the given kind.
  pub fn blank(id: CellId, kind: CellKind) -> Self {
    Self::new(id, kind, "")
  }

  pub fn is_markdown(&self) -> bool {
    self.kind == CellKind::Markdown
  }
}
