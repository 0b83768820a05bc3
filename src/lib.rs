//! Library crate root for the Falcon CLI: configuration resolution, the command
//! tree with its authorization gate, and the dispatcher tying them together.

#[path = "lib/mod.rs"]
pub mod lib_mod;
pub use lib_mod as lib;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    fn assert_layout(label: &str, expected_files: &[&str], mod_path: &str, needles: &[&str]) {
        for path in expected_files {
            assert!(Path::new(path).exists(), "{label} layout: {path} must exist");
        }

        let content = fs::read_to_string(mod_path)
            .unwrap_or_else(|_| panic!("{label} layout: failed to read {mod_path}"));
        for needle in needles {
            assert!(
                content.contains(needle),
                "{label} layout: {mod_path} must declare {needle}"
            );
        }
    }

    #[test]
    fn config_layout_requires_split_modules() {
        assert_layout(
            "config",
            &[
                "src/config/mod.rs",
                "src/config/store.rs",
                "src/config/resolver.rs",
                "src/config/telemetry.rs",
            ],
            "src/config/mod.rs",
            &["store", "resolver", "telemetry"],
        );
    }

    #[test]
    fn commands_layout_requires_split_modules() {
        assert_layout(
            "commands",
            &[
                "src/commands/mod.rs",
                "src/commands/registry.rs",
                "src/commands/gate.rs",
                "src/commands/context.rs",
            ],
            "src/commands/mod.rs",
            &["registry", "gate", "context", "build_registry"],
        );
    }

    #[test]
    fn cli_layout_requires_split_modules() {
        assert_layout(
            "CLI",
            &[
                "src/cli/mod.rs",
                "src/cli/args.rs",
                "src/cli/dispatch.rs",
                "src/cli/exit.rs",
                "src/cli/help.rs",
            ],
            "src/cli/mod.rs",
            &["Dispatcher", "RuntimeExit"],
        );
    }
}
