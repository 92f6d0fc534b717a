//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Interactive prompts and user input handling

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Write};

use crate::error::Result;

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_error, display_proposed_version, display_status,
    display_success,
};

/// Source of yes/no answers from the operator.
pub trait Prompter {
    /// Ask a yes/no question; `default` is the answer for empty input.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;
}

/// Interprets a typed answer.
///
/// "y"/"yes" and "n"/"no" are accepted in any case; anything else,
/// including an empty line, falls back to `default`.
pub fn parse_confirmation(input: &str, default: bool) -> bool {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}

/// Prompts user to confirm an action with a yes/no prompt.
///
/// Displays the given prompt followed by `(y/N)` or `(Y/n)` depending on
/// the default. End of input counts as an empty answer.
///
/// # Arguments
/// * `prompt` - The prompt message to display (without the suffix)
/// * `default` - Answer used when the operator just presses Enter
///
/// # Returns
/// * `Ok(bool)` - The operator's answer
/// * `Err` - If input error occurs
pub fn confirm_action(prompt: &str, default: bool) -> Result<bool> {
    let hint = if default { "Y/n" } else { "y/N" };
    print!("\n{} ({}): ", prompt, hint);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(parse_confirmation(&input, default))
}

/// Prompter reading answers from the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        confirm_action(prompt, default)
    }
}

/// Prompter that replays fixed answers and records every question asked.
///
/// Once the scripted answers run out, it answers with the prompt's default.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<bool>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: impl IntoIterator<Item = bool>) -> Self {
        ScriptedPrompter {
            answers: RefCell::new(answers.into_iter().collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Prompts shown so far, in order
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        self.asked.borrow_mut().push(prompt.to_string());
        Ok(self.answers.borrow_mut().pop_front().unwrap_or(default))
    }
}
