use std::process::ExitCode;

use anyhow::Error;

use crate::lib::errors::{
    ErrorDescriptor, GateError, PromptError, AUTH_REQUIRED_ERROR, CONFIG_PARSE_ERROR,
    GENERAL_FAILURE_EXIT, NOT_INTERACTIVE_ERROR, USAGE_EXIT,
};

/// Bundles a user-facing error message with remediation and an exit code.
#[derive(Debug)]
pub struct RuntimeExit {
    message: String,
    remediation: Option<&'static str>,
    exit_code: u8,
}

impl RuntimeExit {
    fn described(message: String, descriptor: ErrorDescriptor) -> Self {
        Self {
            message,
            remediation: Some(descriptor.remediation),
            exit_code: descriptor.exit_code,
        }
    }

    /// Handler or I/O failure. A prompt refusal keeps its remediation.
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        if matches!(
            err.downcast_ref::<PromptError>(),
            Some(PromptError::NotInteractive)
        ) {
            return Self::described(format!("{err:#}"), NOT_INTERACTIVE_ERROR);
        }
        Self {
            message: format!("{err:?}"),
            remediation: None,
            exit_code: GENERAL_FAILURE_EXIT,
        }
    }

    pub fn auth_required(err: GateError) -> Self {
        Self::described(err.to_string(), AUTH_REQUIRED_ERROR)
    }

    pub fn config_parse(err: impl Into<Error>) -> Self {
        Self::described(format!("{:#}", err.into()), CONFIG_PARSE_ERROR)
    }

    /// Usage error already rendered by clap.
    pub fn usage(rendered: String) -> Self {
        Self {
            message: rendered,
            remediation: None,
            exit_code: USAGE_EXIT,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn remediation(&self) -> Option<&'static str> {
        self.remediation
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    /// Print to stderr and return the process exit code.
    pub fn report(self) -> ExitCode {
        eprintln!("{}", self.message.trim_end());
        if let Some(remediation) = self.remediation {
            eprintln!();
            eprintln!("{remediation}");
        }
        ExitCode::from(self.exit_code)
    }
}
