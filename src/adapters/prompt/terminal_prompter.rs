use std::io::{self, Write};

use crate::cli::output;
use crate::core::errors::Result;
use crate::core::traits::prompter::Prompter;

/// Prompts on stdout and reads answers from stdin.
///
/// Reads through `io::stdin().read_line` so the console loop and the
/// prompts share the same buffered input.
#[derive(Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        print!("  {question} [y/N]: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            println!();
            return Ok(false);
        }
        Ok(is_yes(&input))
    }

    fn notify(&mut self, message: &str) {
        output::success(message);
    }
}

/// Interpret an answer. Only an explicit yes confirms.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
