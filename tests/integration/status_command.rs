use crate::common::{TestStack, IDLE_STACK};
use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn status_hints_when_nothing_is_running() {
    let stack = TestStack::new(IDLE_STACK);

    Command::new(env!("CARGO_BIN_EXE_stackrig"))
        .args(["-C", stack.path().to_str().unwrap(), "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No containers found"));
}

#[test]
fn status_fails_without_compose_file() {
    let stack = TestStack::empty();

    Command::new(env!("CARGO_BIN_EXE_stackrig"))
        .args(["-C", stack.path().to_str().unwrap(), "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("docker-compose.yml"));
}
