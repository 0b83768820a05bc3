//! Interactive prompt capability used by the configure commands.
//!
//! Commands only see the [`Prompter`] trait. The terminal implementation is
//! backed by dialoguer; the non-interactive one fails every prompt so that
//! piping or CI never blocks waiting for input.

use std::io::IsTerminal;

use dialoguer::{Input, Password, Select};

use crate::lib::errors::PromptError;

/// Environment variable that forces non-interactive mode when set to `true`.
pub const DISABLE_PROMPT_ENV: &str = "FALCON_DISABLE_PROMPT";

/// Capability to ask the user for values.
pub trait Prompter {
    /// Ask for a value without echoing it.
    fn ask_password(&self, message: &str) -> Result<String, PromptError>;
    /// Ask for free text; an empty answer yields `default` when one is given.
    fn ask_text(&self, message: &str, default: Option<&str>) -> Result<String, PromptError>;
    /// Ask the user to pick one of `options`; returns the chosen index.
    fn ask_choice(
        &self,
        message: &str,
        options: &[&str],
        default: usize,
    ) -> Result<usize, PromptError>;
}

/// Checks if both stdin and stdout are connected to a terminal.
pub fn is_interactive_terminal() -> bool {
    std::io::stdin().is_terminal() && std::io::stdout().is_terminal()
}

/// Pick the prompter for this process.
pub fn for_terminal(never_prompt: bool) -> Box<dyn Prompter> {
    if never_prompt || !is_interactive_terminal() {
        Box::new(NonInteractivePrompter)
    } else {
        Box::new(TerminalPrompter)
    }
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask_password(&self, message: &str) -> Result<String, PromptError> {
        Ok(Password::new().with_prompt(message).interact()?)
    }

    fn ask_text(&self, message: &str, default: Option<&str>) -> Result<String, PromptError> {
        let mut input = Input::<String>::new().with_prompt(message).allow_empty(true);
        if let Some(default) = default.filter(|value| !value.is_empty()) {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?.trim().to_string())
    }

    fn ask_choice(
        &self,
        message: &str,
        options: &[&str],
        default: usize,
    ) -> Result<usize, PromptError> {
        Ok(Select::new()
            .with_prompt(message)
            .items(options)
            .default(default)
            .interact()?)
    }
}

/// Refuses every prompt with [`PromptError::NotInteractive`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NonInteractivePrompter;

impl Prompter for NonInteractivePrompter {
    fn ask_password(&self, _message: &str) -> Result<String, PromptError> {
        Err(PromptError::NotInteractive)
    }

    fn ask_text(&self, _message: &str, _default: Option<&str>) -> Result<String, PromptError> {
        Err(PromptError::NotInteractive)
    }

    fn ask_choice(
        &self,
        _message: &str,
        _options: &[&str],
        _default: usize,
    ) -> Result<usize, PromptError> {
        Err(PromptError::NotInteractive)
    }
}

/// Replays canned answers in order; records the questions it was asked.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedPrompter {
    answers: std::cell::RefCell<std::collections::VecDeque<String>>,
    asked: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub(crate) fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: std::cell::RefCell::new(answers.into_iter().map(Into::into).collect()),
            asked: std::cell::RefCell::default(),
        }
    }

    pub(crate) fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    fn next(&self, message: &str) -> Result<String, PromptError> {
        self.asked.borrow_mut().push(message.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or(PromptError::NotInteractive)
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn ask_password(&self, message: &str) -> Result<String, PromptError> {
        self.next(message)
    }

    fn ask_text(&self, message: &str, default: Option<&str>) -> Result<String, PromptError> {
        let answer = self.next(message)?;
        match default {
            Some(default) if answer.is_empty() => Ok(default.to_string()),
            _ => Ok(answer),
        }
    }

    fn ask_choice(
        &self,
        message: &str,
        options: &[&str],
        default: usize,
    ) -> Result<usize, PromptError> {
        let answer = self.next(message)?;
        if answer.is_empty() {
            return Ok(default);
        }
        Ok(options
            .iter()
            .position(|option| *option == answer)
            .unwrap_or(default))
    }
}
