use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::cell::CellKind;

/// Where `Worksheet::insert_blank` puts a new cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsertPolicy {
  /// Always append to the end of the worksheet, whatever position the
  /// caller asked for. This is how the editor has always behaved.
  #[default]
  Append,
  /// Splice the new cell in at the requested position (clamped to the
  /// worksheet length).
  AtPosition,
}

impl InsertPolicy {
  pub const ALL: &'static [InsertPolicy] =
    &[InsertPolicy::Append, InsertPolicy::AtPosition];

  pub fn as_str(self) -> &'static str {
    match self {
      InsertPolicy::Append => "append",
      InsertPolicy::AtPosition => "at_position",
    }
  }
}

impl fmt::Display for InsertPolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for InsertPolicy {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim().replace('-', "_");
    Self::ALL
      .iter()
      .copied()
      .find(|policy| policy.as_str() == wanted)
      .ok_or_else(|| {
        let names: Vec<_> = Self::ALL.iter().map(|p| p.as_str()).collect();
        format!("unknown insert policy {s:?}, expected one of {names:?}")
      })
  }
}

/// Settings for a worksheet session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorksheetConfig {
  /// Kind given to synthesized blank cells.
  pub default_kind: CellKind,
  pub insert_policy: InsertPolicy,
  /// Seed for the cell id generator. `None` means OS randomness.
  pub seed: Option<u64>,
}

impl WorksheetConfig {
  pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(content)
  }

  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let content = std::fs::read_to_string(path)?;
    Ok(Self::from_json(&content)?)
  }
}
