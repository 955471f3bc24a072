//! Session Behavioral Tests - BDD Style
//!
//! Following BDD naming convention: given_<context>_when_<action>_then_<outcome>

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::io::Write;
use std::sync::{Arc, Mutex, mpsc};
use std::time::Duration;

use spanstep::spanstep_core::Error;
use spanstep::spanstep_graph::{Algorithm, GraphModel};
use spanstep::spanstep_sequencer::{AnimationState, EventKind, RecordingObserver, StepEvent};
use spanstep::{ConsoleRenderer, PacingConfig, Session, SpanstepConfig};

/// Writer whose contents stay readable after the renderer is moved away.
#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn triangle() -> GraphModel {
    GraphModel::from_edges(3, [(0, 1, 4), (1, 2, 2), (0, 2, 9)]).expect("triangle")
}

#[test]
fn given_demo_config_when_run_with_console_renderer_then_prints_every_step() {
    // GIVEN: The default config (demo graph) and an instant renderer
    let config = SpanstepConfig::default();
    let buffer = SharedBuffer::default();
    let mut session = Session::new(config.build_graph().unwrap());

    // WHEN: A Kruskal run is prepared and started
    let sequencer = session
        .prepare_with(Algorithm::Kruskal, None, |sequencer| {
            sequencer.subscribe(ConsoleRenderer::new(
                buffer.clone(),
                PacingConfig::instant(),
            ));
        })
        .unwrap();
    let outcome = sequencer.start().unwrap();

    // THEN: Five edges are announced and the total is reported last
    assert!(outcome.is_completed());
    let text = buffer.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 11);
    assert_eq!(lines.first(), Some(&"Adding edge (1, 2) with weight 3"));
    assert_eq!(
        lines.last(),
        Some(&"Kruskal's Algorithm completed! Total MST weight = 25")
    );
    assert_eq!(session.status(), AnimationState::Completed);
}

#[test]
fn given_running_session_when_graph_replaced_or_prepared_then_rejected() {
    // GIVEN: A run parked inside its first Committed event
    let (progress_tx, progress_rx) = mpsc::channel::<()>();
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let progress_tx = Mutex::new(progress_tx);
    let release_rx = Mutex::new(release_rx);

    let mut session = Session::new(triangle());
    let sequencer = session
        .prepare_with(Algorithm::Prim, None, move |sequencer| {
            sequencer.subscribe(move |event: &StepEvent| {
                if matches!(event, StepEvent::Committed { index: 0, .. }) {
                    let _ = progress_tx.lock().unwrap().send(());
                    let _ = release_rx.lock().unwrap().recv();
                }
            });
        })
        .unwrap();
    let worker = Arc::clone(&sequencer).spawn_thread().unwrap();
    progress_rx.recv_timeout(Duration::from_secs(5)).unwrap();

    // WHEN: The session is asked to change graph or start another run
    let replaced = session.replace_graph(triangle());
    let prepared = session.prepare(Algorithm::Kruskal);

    // THEN: Both are rejected and the running sequencer is untouched
    assert!(matches!(replaced, Err(Error::AlreadyRunning)));
    assert!(matches!(prepared, Err(Error::AlreadyRunning)));
    assert!(Arc::ptr_eq(session.active().unwrap(), &sequencer));

    release_tx.send(()).unwrap();
    assert!(worker.join().unwrap().unwrap().is_completed());
    assert!(session.prepare(Algorithm::Kruskal).is_ok());
}

#[test]
fn given_unstarted_sequencer_when_prepared_again_then_only_the_new_one_emits_steps() {
    // GIVEN: A prepared Prim run that was never started
    let first_recorder = RecordingObserver::new();
    let second_recorder = RecordingObserver::new();
    let mut session = Session::new(triangle());
    let first = session
        .prepare_with(Algorithm::Prim, None, |sequencer| {
            sequencer.subscribe(first_recorder.clone());
        })
        .unwrap();

    // WHEN: A second run is prepared, then both are started
    let second = session
        .prepare_with(Algorithm::Kruskal, None, |sequencer| {
            sequencer.subscribe(second_recorder.clone());
        })
        .unwrap();
    let first_outcome = first.start().unwrap();
    let second_outcome = second.start().unwrap();

    // THEN: The replaced run emits no steps; the session tracks the new one
    assert_eq!(first_outcome.state, AnimationState::Stopped);
    assert_eq!(first_outcome.committed_steps, 0);
    assert_eq!(first_recorder.kinds(), vec![EventKind::Stopped]);

    assert!(second_outcome.is_completed());
    assert_eq!(second_recorder.committed_edges().len(), 2);
    assert!(Arc::ptr_eq(session.active().unwrap(), &second));
    assert_eq!(session.status(), AnimationState::Completed);
}

#[test]
fn given_replaced_sequencer_when_spawned_later_then_it_never_runs_beside_the_new_one() {
    // GIVEN: A prepared run that reports every commit
    let (progress_tx, progress_rx) = mpsc::channel::<()>();
    let progress_tx = Mutex::new(progress_tx);
    let mut session = Session::new(triangle());
    let first = session
        .prepare_with(Algorithm::Prim, None, move |sequencer| {
            sequencer.subscribe(move |event: &StepEvent| {
                if matches!(event, StepEvent::Committed { .. }) {
                    let _ = progress_tx.lock().unwrap().send(());
                }
            });
        })
        .unwrap();

    // WHEN: It is replaced before starting, then both are spawned
    let second = session.prepare(Algorithm::Kruskal).unwrap();
    let first_worker = Arc::clone(&first).spawn_thread().unwrap();
    let second_worker = Arc::clone(&second).spawn_thread().unwrap();

    // THEN: The old run halts at its first boundary without committing
    let first_outcome = first_worker.join().unwrap().unwrap();
    assert_eq!(first_outcome.state, AnimationState::Stopped);
    assert!(progress_rx.try_recv().is_err());
    assert!(second_worker.join().unwrap().unwrap().is_completed());
    assert_eq!(session.status(), AnimationState::Completed);
}

#[test]
fn given_unstarted_sequencer_when_graph_replaced_then_it_is_cancelled() {
    let mut session = Session::new(triangle());
    let stale = session.prepare(Algorithm::Prim).unwrap();

    session.replace_graph(triangle()).unwrap();

    assert!(stale.cancel_token().is_cancelled());
    assert_eq!(stale.start().unwrap().state, AnimationState::Stopped);
    assert_eq!(session.status(), AnimationState::Idle);
    assert!(!session.stop());
}

#[tokio::test]
async fn given_spawned_run_when_session_stopped_then_run_ends_stopped() {
    // GIVEN: A paced run on the blocking pool
    let (progress_tx, mut progress_rx) = tokio::sync::mpsc::unbounded_channel();
    let recorder = RecordingObserver::new();
    let mut session = Session::new(SpanstepConfig::default().build_graph().unwrap());
    let sequencer = session
        .prepare_with(Algorithm::Prim, Some(3), |sequencer| {
            sequencer.subscribe(recorder.clone());
            sequencer.subscribe(move |event: &StepEvent| {
                if let StepEvent::Committed { index, .. } = event {
                    let _ = progress_tx.send(*index);
                }
            });
            sequencer.subscribe(ConsoleRenderer::new(
                std::io::sink(),
                PacingConfig {
                    begin_delay_ms: 20,
                    commit_delay_ms: 20,
                },
            ));
        })
        .unwrap();

    // WHEN: The session is stopped while the run is in progress
    let handle = Arc::clone(&sequencer).spawn();
    let first = tokio::time::timeout(Duration::from_secs(5), progress_rx.recv())
        .await
        .unwrap();
    assert_eq!(first, Some(0));
    assert!(session.stop());
    let outcome = handle.await.unwrap().unwrap();

    // THEN: The run stops early and reports the committed prefix
    assert_eq!(outcome.state, AnimationState::Stopped);
    assert!(outcome.committed_steps < outcome.total_steps);
    assert_eq!(recorder.committed_edges().len(), outcome.committed_steps);
    assert_eq!(
        recorder.committed_edges(),
        sequencer
            .result()
            .edges()
            .iter()
            .take(outcome.committed_steps)
            .copied()
            .collect::<Vec<_>>()
    );
}

#[test]
fn given_session_when_prim_prepared_without_start_node_then_lowest_node_starts() {
    let mut session = Session::new(triangle());

    let prim = session.prepare(Algorithm::Prim).unwrap();
    let first = prim.result().edges().first().copied().unwrap();

    assert_eq!(first.endpoints(), (0, 1));
    assert_eq!(prim.result().total_weight(), 6);
}
