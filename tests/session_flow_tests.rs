use std::sync::{Arc, mpsc};
use std::time::Duration;

use async_trait::async_trait;
use shellpane::core::action::{Action, Effect, Key, update};
use shellpane::core::state::{App, Phase};
use shellpane::exec::{CommandRunner, ShellRunner};
use shellpane::tui::{Incoming, spawn_job};

// ============================================================================
// Helper Functions
// ============================================================================

/// Waits `delay_ms`, then answers with `output`, whatever the command.
struct DelayedRunner {
    delay_ms: u64,
    output: &'static str,
}

#[async_trait]
impl CommandRunner for DelayedRunner {
    async fn run(&self, _line: &str) -> String {
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        self.output.to_string()
    }
}

fn press(app: &mut App, key: Key) -> Effect {
    update(app, Action::Key(key))
}

fn type_line(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, Key::Char(c));
    }
}

fn recv_output(rx: &mpsc::Receiver<Incoming>) -> Action {
    match rx.recv_timeout(Duration::from_secs(10)) {
        Ok(Incoming::Action(action)) => action,
        other => panic!("expected a command result, got {other:?}"),
    }
}

// ============================================================================
// End-to-End Scenarios
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_echo_hi_round_trip() {
    let runner: Arc<dyn CommandRunner> = Arc::new(ShellRunner::default());
    let (tx, rx) = mpsc::channel::<Incoming>();
    let mut app = App::new();

    update(&mut app, Action::Resize { width: 80, height: 24 });
    assert_eq!(app.phase, Phase::Ready);

    type_line(&mut app, "echo hi");
    let Effect::Spawn(line) = press(&mut app, Key::Enter) else {
        panic!("expected a job to be launched");
    };
    assert_eq!(app.history, "> echo hi\n");
    spawn_job(runner, line, tx);

    let action = recv_output(&rx);
    update(&mut app, action);
    assert!(app.history.ends_with("> echo hi\nhi\n"));
    assert_eq!(app.transcript.content(), app.history);
}

#[test]
fn test_exit_terminates_without_job() {
    let mut app = App::new();
    update(&mut app, Action::Resize { width: 80, height: 24 });
    type_line(&mut app, "exit");
    assert_eq!(press(&mut app, Key::Enter), Effect::Quit);
    assert!(app.history.is_empty());
}

#[test]
fn test_interrupt_before_ready() {
    let mut app = App::new();
    assert_eq!(press(&mut app, Key::Interrupt), Effect::Quit);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whitespace_command_is_noop_append() {
    let runner: Arc<dyn CommandRunner> = Arc::new(ShellRunner::default());
    let (tx, rx) = mpsc::channel::<Incoming>();
    let mut app = App::new();
    update(&mut app, Action::Resize { width: 80, height: 24 });

    type_line(&mut app, "   ");
    let Effect::Spawn(line) = press(&mut app, Key::Enter) else {
        panic!("whitespace still launches a job");
    };
    let before = app.history.clone();
    spawn_job(runner, line, tx);

    let action = recv_output(&rx);
    assert_eq!(action, Action::CommandFinished { output: String::new() });
    update(&mut app, action);
    assert_eq!(app.history, before);
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_slow_then_fast_lands_fast_first() {
    let slow: Arc<dyn CommandRunner> = Arc::new(DelayedRunner { delay_ms: 500, output: "A" });
    let fast: Arc<dyn CommandRunner> = Arc::new(DelayedRunner { delay_ms: 20, output: "B" });
    let (tx, rx) = mpsc::channel::<Incoming>();
    let mut app = App::new();
    update(&mut app, Action::Resize { width: 80, height: 24 });

    type_line(&mut app, "job-a");
    let Effect::Spawn(a) = press(&mut app, Key::Enter) else { panic!() };
    spawn_job(slow, a, tx.clone());

    // A has not finished; B is submitted anyway
    type_line(&mut app, "job-b");
    let Effect::Spawn(b) = press(&mut app, Key::Enter) else { panic!() };
    spawn_job(fast, b, tx);

    for _ in 0..2 {
        let action = recv_output(&rx);
        update(&mut app, action);
    }
    assert_eq!(app.history, "> job-a\n> job-b\nB\nA\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_real_shell_jobs_complete_out_of_order() {
    let runner: Arc<dyn CommandRunner> = Arc::new(ShellRunner::default());
    let (tx, rx) = mpsc::channel::<Incoming>();
    let mut app = App::new();
    update(&mut app, Action::Resize { width: 80, height: 24 });

    for line in ["sleep 0.5; echo slow", "echo fast"] {
        type_line(&mut app, line);
        let Effect::Spawn(line) = press(&mut app, Key::Enter) else { panic!() };
        spawn_job(runner.clone(), line, tx.clone());
    }

    for _ in 0..2 {
        let action = recv_output(&rx);
        update(&mut app, action);
    }
    assert!(app.history.ends_with("fast\nslow\n"), "got {:?}", app.history);
}
