use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

use notebook_worksheet::{
  Cell, CellIdGenerator, CellKind, InsertPolicy, Intent, Session, Worksheet,
  WorksheetConfig, WorksheetObserver,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Drive a worksheet with commands read from stdin
  ///
  /// Commands: `execute <cell>`, `edit <cell>`, `source <cell> <text>`,
  /// `quit`. A cell is `#<position>`, a full id or a unique id prefix.
  Session {
    /// Kinds of the cells the worksheet starts with
    #[arg(long, value_delimiter = ',', default_value = "code")]
    cells: Vec<CellKind>,
    /// JSON file with worksheet settings
    #[arg(long)]
    config: Option<PathBuf>,
    /// Kind of the blank cells added when the last cell runs
    #[arg(long)]
    default_kind: Option<CellKind>,
    /// `append` or `at_position`
    #[arg(long)]
    insert_policy: Option<InsertPolicy>,
    /// Seed for reproducible cell ids
    #[arg(long)]
    seed: Option<u64>,
    /// Print the worksheet as JSON instead of a table
    #[arg(long)]
    json: bool,
  },
  /// Print freshly generated cell ids
  NewId {
    #[arg(short, long, default_value_t = 1)]
    count: usize,
    #[arg(long)]
    seed: Option<u64>,
  },
}

fn main() -> anyhow::Result<()> {
  env_logger::init();
  let cli = Cli::parse();

  match cli.command {
    Commands::Session {
      cells,
      config,
      default_kind,
      insert_policy,
      seed,
      json,
    } => {
      let mut config = match config {
        Some(path) => WorksheetConfig::load(&path)?,
        None => WorksheetConfig::default(),
      };
      if let Some(kind) = default_kind {
        config.default_kind = kind;
      }
      if let Some(policy) = insert_policy {
        config.insert_policy = policy;
      }
      if seed.is_some() {
        config.seed = seed;
      }

      tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run_session(cells, config, json))
    }
    Commands::NewId { count, seed } => {
      let mut ids = CellIdGenerator::from_seed(seed);
      for _ in 0..count {
        println!("{}", ids.next_id());
      }
      Ok(())
    }
  }
}

async fn run_session(
  kinds: Vec<CellKind>,
  config: WorksheetConfig,
  json: bool,
) -> anyhow::Result<()> {
  let mut worksheet = Worksheet::with_config(config);
  for kind in kinds {
    let id = worksheet.next_id();
    worksheet.push_cell(Cell::blank(id, kind))?;
  }
  let mut session = Session::with_standard_components(worksheet);
  let mut printer = Printer { json };
  printer.worksheet_changed(session.worksheet());

  let mut lines = BufReader::new(tokio::io::stdin()).lines();
  while let Some(line) = lines.next_line().await? {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
      continue;
    };
    if matches!(command, "quit" | "exit" | "q") {
      break;
    }
    let Some(reference) = words.next() else {
      eprintln!("Usage: {command} <cell>");
      continue;
    };
    let Some(id) = session.resolve(reference) else {
      eprintln!("No cell matches {reference:?}");
      continue;
    };

    let intent = match command {
      "execute" | "x" => Intent::ExecuteCell(id),
      "edit" | "e" => Intent::EditCell(id),
      "source" | "s" => {
        Intent::UpdateSource(id, words.collect::<Vec<_>>().join(" "))
      }
      other => {
        eprintln!("Unknown command: {other}");
        continue;
      }
    };
    if let Err(e) = session.dispatch(intent) {
      eprintln!("Error: {e}");
    }
    printer.worksheet_changed(session.worksheet());
  }
  Ok(())
}

struct Printer {
  json: bool,
}

impl WorksheetObserver for Printer {
  fn worksheet_changed(&mut self, worksheet: &Worksheet) {
    if self.json {
      let cells: Vec<&Cell> = worksheet.iter().collect();
      match serde_json::to_string(&cells) {
        Ok(text) => println!("{text}"),
        Err(e) => eprintln!("Error: {e}"),
      }
      return;
    }

    for (position, cell) in worksheet.iter().enumerate() {
      let marker = if cell.active { '>' } else { ' ' };
      let first_line = cell.source.lines().next().unwrap_or("");
      println!(
        "{marker} #{position:<3} [{}] {:<8} {} {:?} {first_line}",
        cell.execution_counter,
        cell.kind,
        cell.id.short(),
        cell.mode,
      );
    }
    println!();
  }
}
