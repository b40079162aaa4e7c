use crate::core::errors::Result;

/// Blocking user prompts used to resolve confirmation effects.
pub trait Prompter {
    /// Ask a yes/no question. Anything but an explicit yes is a no.
    fn confirm(&mut self, question: &str) -> Result<bool>;

    /// Show an acknowledgement.
    fn notify(&mut self, message: &str);
}
