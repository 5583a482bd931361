use super::*;
use tokio::sync::mpsc;

#[tokio::test]
async fn run_processes_intents_in_order() {
  let mut session = session_of(&[CellKind::Code, CellKind::Code]);
  let ids = session.worksheet().ids().to_vec();
  let stranger = Worksheet::new().next_id();

  let (tx, rx) = mpsc::channel(8);
  tx.send(Intent::ExecuteCell(ids[0])).await.unwrap();
  tx.send(Intent::ExecuteCell(stranger)).await.unwrap();
  tx.send(Intent::ExecuteCell(ids[1])).await.unwrap();
  drop(tx);

  let mut snapshots: Vec<(usize, Option<CellId>)> = Vec::new();
  let mut observer = |ws: &Worksheet| {
    snapshots.push((ws.len(), ws.active().map(|c| c.id)));
  };
  session.run(rx, &mut observer).await;

  // Initial state, then one snapshot per intent.
  assert_eq!(snapshots.len(), 4);
  assert_eq!(snapshots[0], (2, None));
  assert_eq!(snapshots[1], (2, Some(ids[1])));
  assert_eq!(snapshots[2], (2, Some(ids[1])));
  assert_eq!(snapshots[3].0, 3);
  assert_eq!(snapshots[3].1, session.worksheet().ids().get(2).copied());
}

#[tokio::test]
async fn run_returns_when_senders_are_gone() {
  let mut session = session_of(&[CellKind::Heading]);
  let (tx, rx) = mpsc::channel::<Intent>(1);
  drop(tx);

  let mut calls = 0;
  let mut observer = |_: &Worksheet| calls += 1;
  session.run(rx, &mut observer).await;
  assert_eq!(calls, 1);
}

#[tokio::test]
async fn intents_from_a_spawned_producer() {
  let mut session = session_of(&[CellKind::Code]);
  let first = session.worksheet().ids()[0];

  let (tx, rx) = mpsc::channel(4);
  let producer = tokio::spawn(async move {
    tx.send(Intent::UpdateSource(first, "1 + 1".into()))
      .await
      .unwrap();
    tx.send(Intent::ExecuteCell(first)).await.unwrap();
  });

  let mut observer = |_: &Worksheet| {};
  session.run(rx, &mut observer).await;
  producer.await.unwrap();

  let ws = session.worksheet();
  assert_eq!(ws.get(&first).unwrap().source, "1 + 1");
  assert_eq!(
    ws.get(&first).unwrap().execution_counter,
    ExecutionCounter::Unexecuted
  );
  assert_eq!(ws.len(), 2);
}
