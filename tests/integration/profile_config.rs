use std::fs;

use falcon_cli::config::ProfileStore;

use crate::common::{
    exit_code, stderr, stdout, Sandbox, VALID_CLIENT_ID, VALID_CLIENT_SECRET,
};

#[test]
fn init_with_flags_writes_profile_and_keeps_the_rest() {
    let sandbox = Sandbox::new();
    sandbox.write_store(
        "profile: default\nprod:\n  client_id: prod-id\n  client_secret: prod-secret\n  cloud: eu-1\n",
    );

    let output = sandbox.run(&[
        "init",
        "--client-id",
        VALID_CLIENT_ID,
        "--client-secret",
        VALID_CLIENT_SECRET,
        "--cloud",
        "us-2",
        "--profile",
        "test",
    ]);
    assert_eq!(exit_code(&output), 0, "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Profile `test` saved"));

    let store = ProfileStore::load(&sandbox.store_path()).expect("store reloads");
    let test = store.profile("test").expect("test profile written");
    assert_eq!(test.client_id, VALID_CLIENT_ID);
    assert_eq!(test.cloud, "us-2");
    let prod = store.profile("prod").expect("prod profile kept");
    assert_eq!(prod.client_secret, "prod-secret");
    assert_eq!(prod.cloud, "eu-1");
    assert_eq!(store.unscoped("profile"), Some("default"));
}

#[test]
fn saved_profile_is_used_by_later_invocations() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&[
        "init",
        "-u",
        VALID_CLIENT_ID,
        "-s",
        VALID_CLIENT_SECRET,
    ]);
    assert_eq!(exit_code(&output), 0, "stderr: {}", stderr(&output));

    let output = sandbox.run(&["sensor", "download"]);
    assert_eq!(exit_code(&output), 0, "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("profile `default`"));
}

#[test]
fn invalid_client_id_is_rejected_before_writing() {
    let sandbox = Sandbox::new();
    let original = "default:\n  client_id: abc\n  client_secret: xyz\n";
    sandbox.write_store(original);

    let output = sandbox.run(&["init", "-u", "short", "-s", VALID_CLIENT_SECRET]);

    assert_eq!(exit_code(&output), 1, "stderr: {}", stderr(&output));
    let err = stderr(&output);
    assert!(err.contains("Invalid client ID provided"), "{err}");
    assert!(!err.contains(VALID_CLIENT_SECRET), "secrets must not be echoed");
    assert_eq!(sandbox.read_store(), original);
}

#[test]
fn auth_config_without_terminal_fails() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["auth", "config"]);

    assert_eq!(exit_code(&output), 1, "stderr: {}", stderr(&output));
    assert!(
        stderr(&output).contains("Interactive mode is disabled"),
        "{}",
        stderr(&output)
    );
    assert!(!sandbox.store_path().exists());
}

#[test]
fn init_without_terminal_and_missing_secret_fails() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["init", "-u", VALID_CLIENT_ID]);

    assert_eq!(exit_code(&output), 1, "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("Interactive mode is disabled"));
}

#[test]
fn malformed_store_exits_with_config_parse_code() {
    let sandbox = Sandbox::new();
    sandbox.write_store("default: [unterminated\n");

    let output = sandbox.run(&["version"]);
    assert_eq!(exit_code(&output), 4, "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("config.yaml"), "{}", stderr(&output));
}

#[test]
fn config_flag_and_env_select_the_store() {
    let sandbox = Sandbox::new();
    let custom = sandbox.home().join("custom.yaml");
    fs::write(&custom, "default:\n  client_id: abc\n  client_secret: xyz\n")
        .expect("can write custom store");
    let custom = custom.to_string_lossy().into_owned();

    let output = sandbox.run(&["sensor", "download", "--config", custom.as_str()]);
    assert_eq!(exit_code(&output), 0, "stderr: {}", stderr(&output));

    let output = sandbox.run_with_env(&["sensor", "download"], &[("FALCON_CONFIG", custom.as_str())]);
    assert_eq!(exit_code(&output), 0, "stderr: {}", stderr(&output));
}

#[test]
fn completion_script_is_generated_without_credentials() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["completion", "bash"]);

    assert_eq!(exit_code(&output), 0, "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("falcon"), "{}", stdout(&output));
}

#[test]
fn mixed_case_profile_is_found_after_init() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&[
        "init",
        "-p",
        "Prod",
        "-u",
        VALID_CLIENT_ID,
        "-s",
        VALID_CLIENT_SECRET,
    ]);
    assert_eq!(exit_code(&output), 0, "stderr: {}", stderr(&output));
    assert!(sandbox.read_store().contains("Prod:"), "{}", sandbox.read_store());

    let output = sandbox.run(&["sensor", "download", "-p", "Prod"]);
    assert_eq!(exit_code(&output), 0, "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("profile `Prod`"), "{}", stdout(&output));
}

#[test]
fn digit_only_credentials_survive_saving_another_profile() {
    let sandbox = Sandbox::new();
    let secret = "1234567890123456789012345678901234567890";
    sandbox.write_store(&format!(
        "digits:\n  client_id: 0123456789\n  client_secret: {secret}\n"
    ));

    let output = sandbox.run(&["init", "-u", VALID_CLIENT_ID, "-s", VALID_CLIENT_SECRET]);
    assert_eq!(exit_code(&output), 0, "stderr: {}", stderr(&output));

    let store = ProfileStore::load(&sandbox.store_path()).expect("store reloads");
    let digits = store.profile("digits").expect("digits profile kept");
    assert_eq!(digits.client_id, "0123456789");
    assert_eq!(digits.client_secret, secret);
}

#[test]
fn profile_sharing_an_env_prefix_is_rejected() {
    let sandbox = Sandbox::new();
    let original = "prod_eu:\n  client_id: abc\n  client_secret: xyz\n";
    sandbox.write_store(original);

    let output = sandbox.run(&[
        "init",
        "-p",
        "prod-eu",
        "-u",
        VALID_CLIENT_ID,
        "-s",
        VALID_CLIENT_SECRET,
    ]);

    assert_eq!(exit_code(&output), 1, "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("prod_eu"), "{}", stderr(&output));
    assert_eq!(sandbox.read_store(), original);
}
