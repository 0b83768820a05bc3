use crate::common::{exit_code, stderr, stdout, Sandbox};

fn assert_help(args: &[&str], expected: &str) {
    let sandbox = Sandbox::new();
    let output = sandbox.run(args);

    assert_eq!(
        exit_code(&output),
        0,
        "{args:?} failed: {}",
        stderr(&output)
    );
    let out = stdout(&output);
    assert!(out.contains("Usage:"), "{args:?}: {out}");
    assert!(out.contains(expected), "{args:?}: {out}");
}

#[test]
fn help_subcommand_shows_target_help_without_credentials() {
    assert_help(&["help", "sensor"], "download");
    assert_help(&["help", "sensor", "download"], "falcon sensor download");
}

#[test]
fn help_after_global_flags_is_still_help() {
    assert_help(&["-p", "prod", "help", "sensor"], "download");
    assert_help(&["--verbose", "help", "sensor", "download"], "falcon sensor download");
}

#[test]
fn help_flag_bypasses_the_gate() {
    assert_help(&["sensor", "--help"], "download");
    assert_help(&["sensor", "download", "-h"], "--client-id");
}

#[test]
fn group_without_subcommand_prints_help() {
    assert_help(&["sensor"], "download");
    assert_help(&["auth"], "config");
}

#[test]
fn bare_help_and_root_print_root_help() {
    assert_help(&["help"], "sensor");
    assert_help(&[], "completion");
}

#[test]
fn unknown_command_is_a_usage_error() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["sensors"]);
    assert_eq!(exit_code(&output), 2, "stderr: {}", stderr(&output));
}
