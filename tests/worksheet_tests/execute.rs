use super::*;

mod advancing {
  use super::*;

  #[test]
  fn execute_first_of_two_activates_second() {
    let mut session = session_of(&[CellKind::Code, CellKind::Code]);
    let ids = session.worksheet().ids().to_vec();

    session.dispatch(Intent::ExecuteCell(ids[0])).unwrap();

    assert_eq!(session.worksheet().ids(), ids.as_slice());
    assert_eq!(active_id(&session), Some(ids[1]));
  }

  #[test]
  fn execute_middle_cell_keeps_length() {
    let mut session =
      session_of(&[CellKind::Code, CellKind::Heading, CellKind::Markdown]);
    let ids = session.worksheet().ids().to_vec();

    session.dispatch(Intent::ExecuteCell(ids[1])).unwrap();

    assert_eq!(session.worksheet().len(), 3);
    assert_eq!(active_id(&session), Some(ids[2]));
  }

  #[test]
  fn only_one_cell_is_ever_active() {
    let mut session = session_of(&[CellKind::Code; 4]);
    let ids = session.worksheet().ids().to_vec();
    for id in &ids[..3] {
      session.dispatch(Intent::ExecuteCell(*id)).unwrap();
      assert_eq!(
        session.worksheet().iter().filter(|c| c.active).count(),
        1
      );
    }
    assert_eq!(active_id(&session), Some(ids[3]));
  }
}

mod appending {
  use super::*;

  #[test]
  fn end_to_end_example() {
    // [A, B]: execute A, then execute B.
    let mut session = session_of(&[CellKind::Code, CellKind::Code]);
    let a = session.worksheet().ids()[0];
    let b = session.worksheet().ids()[1];

    session.dispatch(Intent::ExecuteCell(a)).unwrap();
    assert_eq!(session.worksheet().ids(), &[a, b]);
    assert_eq!(active_id(&session), Some(b));

    session.dispatch(Intent::ExecuteCell(b)).unwrap();
    let ws = session.worksheet();
    assert_eq!(ws.len(), 3);
    assert_eq!(&ws.ids()[..2], &[a, b]);

    let c = ws.cell_at(2).unwrap();
    assert_eq!(c.kind, CellKind::Code);
    assert_eq!(c.source, "");
    assert_eq!(c.execution_counter, ExecutionCounter::Unexecuted);
    assert!(c.active);
    assert!(!ws.get(&b).unwrap().active);
  }

  #[test]
  fn execute_last_leaves_previous_cell_content_alone() {
    let mut session = session_of(&[CellKind::Code]);
    let only = session.worksheet().ids()[0];
    let before = session.worksheet().get(&only).unwrap().clone();

    session.dispatch(Intent::ExecuteCell(only)).unwrap();

    let after = session.worksheet().get(&only).unwrap().clone();
    assert!(!after.active);
    assert_eq!(Cell { active: false, ..after }, before);
    assert_eq!(session.worksheet().len(), 2);
  }

  #[test]
  fn repeated_execution_keeps_growing() {
    let mut session = session_of(&[CellKind::Code]);
    for expected_len in 2..=5 {
      let last = *session.worksheet().ids().last().unwrap();
      session.dispatch(Intent::ExecuteCell(last)).unwrap();
      assert_eq!(session.worksheet().len(), expected_len);
      assert_eq!(active_id(&session), session.worksheet().ids().last().copied());
    }
  }

  #[test]
  fn blank_cell_uses_configured_kind() {
    let config = WorksheetConfig {
      default_kind: CellKind::Markdown,
      ..Default::default()
    };
    let mut worksheet = Worksheet::with_config(config);
    let id = worksheet.next_id();
    worksheet.push_cell(Cell::blank(id, CellKind::Code)).unwrap();
    let mut session = Session::with_standard_components(worksheet);

    session.dispatch(Intent::ExecuteCell(id)).unwrap();
    let new_cell = session.worksheet().cell_at(1).unwrap();
    assert_eq!(new_cell.kind, CellKind::Markdown);
    assert_eq!(new_cell.mode, CellMode::Edit);
  }

  #[test]
  fn at_position_policy_still_lands_after_the_last_cell() {
    // The next index after the last cell is the end of the sheet either way.
    let config = WorksheetConfig {
      insert_policy: InsertPolicy::AtPosition,
      ..Default::default()
    };
    let mut worksheet = Worksheet::with_config(config);
    let id = worksheet.next_id();
    worksheet.push_cell(Cell::blank(id, CellKind::Code)).unwrap();
    let mut session = Session::with_standard_components(worksheet);

    session.dispatch(Intent::ExecuteCell(id)).unwrap();
    assert_eq!(session.worksheet().ids()[0], id);
    assert!(session.worksheet().cell_at(1).unwrap().active);
  }
}

mod execution_marker {
  use super::*;

  #[test]
  fn executing_leaves_every_marker_unexecuted() {
    let mut session =
      session_of(&[CellKind::Code, CellKind::Heading, CellKind::Code]);
    let ids = session.worksheet().ids().to_vec();

    for id in &ids {
      session.dispatch(Intent::ExecuteCell(*id)).unwrap();
    }
    session.dispatch(Intent::ExecuteCell(ids[0])).unwrap();

    assert!(session
      .worksheet()
      .iter()
      .all(|c| c.execution_counter == ExecutionCounter::Unexecuted));
  }

  #[test]
  fn host_recorded_marker_survives_execution() {
    let mut worksheet = worksheet_of(&[CellKind::Code, CellKind::Code]);
    let first = worksheet.ids()[0];
    worksheet.record_execution(&first, 7).unwrap();
    let mut session = Session::with_standard_components(worksheet);

    session.dispatch(Intent::ExecuteCell(first)).unwrap();
    assert_eq!(
      session.worksheet().get(&first).unwrap().execution_counter,
      ExecutionCounter::Executed(7)
    );
  }
}

mod unknown_cell {
  use super::*;

  #[test]
  fn execute_absent_cell_changes_nothing() {
    let mut session = session_of(&[CellKind::Code, CellKind::Markdown]);
    let first = session.worksheet().ids()[0];
    session.dispatch(Intent::ExecuteCell(first)).unwrap();
    let before: Vec<Cell> = session.worksheet().iter().cloned().collect();

    let stranger = Worksheet::new().next_id();
    let result = session.dispatch(Intent::ExecuteCell(stranger));

    assert_eq!(result, Err(WorksheetError::UnknownCell(stranger)));
    let after: Vec<Cell> = session.worksheet().iter().cloned().collect();
    assert_eq!(before, after);
  }

  #[test]
  fn session_stays_usable_after_an_error() {
    let mut session = session_of(&[CellKind::Code, CellKind::Code]);
    let stranger = Worksheet::new().next_id();
    assert!(session.dispatch(Intent::ExecuteCell(stranger)).is_err());

    let first = session.worksheet().ids()[0];
    session.dispatch(Intent::ExecuteCell(first)).unwrap();
    assert_eq!(active_id(&session), Some(session.worksheet().ids()[1]));
  }

  #[test]
  fn cell_at_out_of_range_is_typed() {
    let worksheet = worksheet_of(&[CellKind::Code]);
    assert_eq!(
      worksheet.cell_at(1),
      Err(WorksheetError::PositionOutOfRange { position: 1, len: 1 })
    );
  }
}

mod components {
  use super::*;
  use notebook_worksheet::{Component, Context};

  /// Rejects every intent it sees.
  struct Veto;

  impl Component for Veto {
    fn name(&self) -> &'static str {
      "veto"
    }

    fn handle(
      &mut self,
      intent: &Intent,
      _cx: &mut Context<'_>,
    ) -> Result<(), WorksheetError> {
      Err(WorksheetError::UnknownCell(*intent.cell_id()))
    }
  }

  #[test]
  fn failure_after_notebook_controller_leaves_no_blank_cell() {
    let worksheet = worksheet_of(&[CellKind::Code]);
    let only = worksheet.ids()[0];
    let mut components = ComponentTable::standard();
    components.register(Veto);
    let mut session = Session::new(worksheet, components);
    let before: Vec<Cell> = session.worksheet().iter().cloned().collect();

    assert_eq!(
      session.dispatch(Intent::ExecuteCell(only)),
      Err(WorksheetError::UnknownCell(only))
    );
    let after: Vec<Cell> = session.worksheet().iter().cloned().collect();
    assert_eq!(after, before);
    assert_eq!(session.worksheet().len(), 1);
    assert!(session.worksheet().active().is_none());
  }

  #[test]
  fn empty_table_ignores_intents() {
    let worksheet = worksheet_of(&[CellKind::Code]);
    let only = worksheet.ids()[0];
    let mut session = Session::new(worksheet, ComponentTable::new());

    session.dispatch(Intent::ExecuteCell(only)).unwrap();
    assert_eq!(session.worksheet().len(), 1);
    assert!(session.worksheet().active().is_none());
  }

  #[test]
  fn update_source_is_applied() {
    let mut session = session_of(&[CellKind::Code]);
    let only = session.worksheet().ids()[0];
    session
      .dispatch(Intent::UpdateSource(only, "print('hi')".into()))
      .unwrap();
    assert_eq!(session.worksheet().get(&only).unwrap().source, "print('hi')");
  }
}
