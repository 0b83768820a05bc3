use crate::common::{exit_code, stderr, stdout, Sandbox};

#[test]
fn missing_credentials_exit_with_auth_required() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["sensor", "download"]);

    assert_eq!(exit_code(&output), 3, "stderr: {}", stderr(&output));
    let err = stderr(&output);
    assert!(err.contains("falcon auth config"), "{err}");
    assert!(err.contains("falcon auth config --help"), "{err}");
    assert!(stdout(&output).is_empty(), "handler must not run");
}

#[test]
fn flag_credentials_run_the_command() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&[
        "sensor",
        "download",
        "--client-id",
        "abc",
        "--client-secret",
        "xyz",
        "--profile",
        "test",
    ]);

    assert_eq!(exit_code(&output), 0, "stderr: {}", stderr(&output));
    assert!(
        stdout(&output).contains("profile `test` (cloud: autodiscover)"),
        "{}",
        stdout(&output)
    );
}

#[test]
fn environment_credentials_run_the_command() {
    let sandbox = Sandbox::new();
    let output = sandbox.run_with_env(
        &["sensor", "download"],
        &[
            ("FALCON_CLIENT_ID", "abc"),
            ("FALCON_CLIENT_SECRET", "xyz"),
        ],
    );
    assert_eq!(exit_code(&output), 0, "stderr: {}", stderr(&output));
}

#[test]
fn profile_scoped_environment_is_used_for_the_active_profile() {
    let sandbox = Sandbox::new();
    let output = sandbox.run_with_env(
        &["sensor", "download"],
        &[
            ("FALCON_PROFILE", "prod"),
            ("FALCON_PROD__CLIENT_ID", "abc"),
            ("FALCON_PROD__CLIENT_SECRET", "xyz"),
            ("FALCON_PROD__CLOUD", "us-gov-1"),
        ],
    );

    assert_eq!(exit_code(&output), 0, "stderr: {}", stderr(&output));
    assert!(
        stdout(&output).contains("profile `prod` (cloud: us-gov-1)"),
        "{}",
        stdout(&output)
    );
}

#[test]
fn stored_profile_with_empty_client_id_is_refused() {
    let sandbox = Sandbox::new();
    sandbox.write_store("default:\n  client_id: ''\n  client_secret: xyz\n");

    let output = sandbox.run(&["sensor", "download"]);
    assert_eq!(exit_code(&output), 3, "stderr: {}", stderr(&output));
}

#[test]
fn stored_profile_satisfies_the_gate() {
    let sandbox = Sandbox::new();
    sandbox.write_store("default:\n  client_id: abc\n  client_secret: xyz\n  cloud: eu-1\n");

    let output = sandbox.run(&["sensor", "download"]);
    assert_eq!(exit_code(&output), 0, "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("(cloud: eu-1)"), "{}", stdout(&output));
}

#[test]
fn partial_credentials_are_refused() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["sensor", "download", "-u", "abc"]);
    assert_eq!(exit_code(&output), 3, "stderr: {}", stderr(&output));
}

#[test]
fn version_needs_no_credentials() {
    let sandbox = Sandbox::new();

    let output = sandbox.run(&["version"]);
    assert_eq!(exit_code(&output), 0, "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("falcon version:"));

    let output = sandbox.run(&["--version"]);
    assert_eq!(exit_code(&output), 0, "stderr: {}", stderr(&output));
    assert!(stdout(&output).starts_with("falcon version:"));
}
