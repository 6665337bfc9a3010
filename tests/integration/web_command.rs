use crate::common::{TestStack, IDLE_STACK};
use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

#[test]
fn fails_fast_on_workdir_without_compose_file() {
    let stack = TestStack::empty();

    // The wait timeout is long on purpose: a broken workdir must be reported
    // before any waiting starts, so the harness timeout below never trips.
    Command::new(env!("CARGO_BIN_EXE_stackrig"))
        .args(["-C", stack.path().to_str().unwrap(), "web", "--timeout", "60s"])
        .timeout(Duration::from_secs(10))
        .assert()
        .failure()
        .stderr(predicate::str::contains("docker-compose.yml"));
}

#[test]
fn reports_an_error_when_the_stack_is_down() {
    let stack = TestStack::new(IDLE_STACK);

    // Nothing is running in this throwaway project, so the wait can only end
    // in an error: either the UI never answers within the timeout, or the
    // stack cannot be queried at all. Both must exit non-zero with a single
    // readable error line.
    Command::new(env!("CARGO_BIN_EXE_stackrig"))
        .args(["-C", stack.path().to_str().unwrap(), "web", "--timeout", "2s"])
        .timeout(Duration::from_secs(30))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn prints_the_banner_before_waiting() {
    let stack = TestStack::new(IDLE_STACK);

    Command::new(env!("CARGO_BIN_EXE_stackrig"))
        .args(["-C", stack.path().to_str().unwrap(), "web", "--timeout", "1s"])
        .timeout(Duration::from_secs(30))
        .assert()
        .failure()
        .stdout(predicate::str::contains("http://127.0.0.1:8088"))
        .stdout(predicate::str::contains("user: admin"));
}
