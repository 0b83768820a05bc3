//! `falcon help <command...>` is rewritten to `falcon <command...> --help`.
//!
//! Global flags may come before `help` (`falcon -p prod help sensor`); they
//! are left where they are.
use std::ffi::{OsStr, OsString};

use super::args::root_args;

const HELP_COMMAND: &str = "help";
const HELP_FLAG: &str = "--help";

/// Rewrite a help request into a `--help` flag on the target command.
/// Any other argument list is returned unchanged.
pub fn normalize_help_request(args: Vec<OsString>) -> Vec<OsString> {
    let Some(position) = help_position(&args) else {
        return args;
    };

    let mut rewritten = args;
    rewritten.remove(position);
    rewritten.push(OsString::from(HELP_FLAG));
    rewritten
}

/// Index of a `help` word that follows only global flags and their values.
fn help_position(args: &[OsString]) -> Option<usize> {
    let value_flags = value_flags();
    let mut index = 1;
    while let Some(arg) = args.get(index) {
        if arg.as_os_str() == OsStr::new(HELP_COMMAND) {
            return Some(index);
        }
        let text = arg.to_str()?;
        if !text.starts_with('-') || text == "-" || text == "--" {
            return None;
        }
        let needs_value = value_flags.iter().any(|flag| flag == text);
        index += if needs_value { 2 } else { 1 };
    }
    None
}

/// `--long` and `-s` spellings of the root flags that consume the next
/// argument. Attached forms (`--profile=prod`, `-pprod`) never match.
fn value_flags() -> Vec<String> {
    let mut flags = Vec::new();
    for arg in root_args() {
        if !arg.get_action().takes_values() {
            continue;
        }
        flags.extend(arg.get_long().map(|long| format!("--{long}")));
        flags.extend(arg.get_short().map(|short| format!("-{short}")));
    }
    flags
}
