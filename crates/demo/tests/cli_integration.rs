use std::process::Command;

fn demo() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cmdtree-demo"))
}

#[test]
fn help_works() {
    let out = demo()
        .arg("--help")
        .output()
        .expect("failed to run cmdtree-demo --help");
    assert!(
        out.status.success(),
        "cmdtree-demo --help failed:\nstatus: {}\nstderr:\n{}",
        out.status,
        String::from_utf8_lossy(&out.stderr),
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("Usage:") && stdout.contains("Commands:") && stdout.contains("add"),
        "unexpected help output:\n{stdout}"
    );
}

#[test]
fn help_describes_a_named_subcommand() {
    let out = demo()
        .args(["help", "add"])
        .output()
        .expect("failed to run cmdtree-demo help add");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("Usage: add [left] [right]"),
        "unexpected help output:\n{stdout}"
    );
}

#[test]
fn version_prints_name_and_semver() {
    let out = demo()
        .arg("-v")
        .output()
        .expect("failed to run cmdtree-demo -v");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(stdout.trim(), "cmdtree-demo 0.1.0");
}

#[test]
fn version_subcommand_matches_the_option() {
    let out = demo()
        .arg("version")
        .output()
        .expect("failed to run cmdtree-demo version");
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim(),
        "cmdtree-demo 0.1.0"
    );
}

#[test]
fn add_binds_and_runs_the_action() {
    let out = demo()
        .args(["add", "3", "4"])
        .output()
        .expect("failed to run cmdtree-demo add");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "3 + 4 = 7");
}

#[test]
fn greet_honors_the_user_option() {
    let out = demo()
        .args(["-u", "alice", "greet"])
        .output()
        .expect("failed to run cmdtree-demo greet");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "Hello 'alice'");
}

#[test]
fn unknown_command_exits_nonzero() {
    let out = demo()
        .arg("frobnicate")
        .output()
        .expect("failed to run cmdtree-demo frobnicate");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("unexpected value"),
        "unexpected stderr:\n{stderr}"
    );
}

#[test]
fn missing_operand_exits_nonzero() {
    let out = demo()
        .args(["add", "3"])
        .output()
        .expect("failed to run cmdtree-demo add 3");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("invalid number of arguments"),
        "unexpected stderr:\n{stderr}"
    );
}

#[test]
fn malformed_operand_exits_nonzero() {
    let out = demo()
        .args(["add", "3", "banana"])
        .output()
        .expect("failed to run cmdtree-demo add 3 banana");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("error parsing option value"),
        "unexpected stderr:\n{stderr}"
    );
}
