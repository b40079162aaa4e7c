use std::io::Write;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::core::errors::{AdminError, Result};
use crate::core::traits::clipboard::Clipboard;

/// Clipboard that asks the terminal emulator to set the system clipboard
/// through the OSC 52 escape sequence.
///
/// Works over SSH and inside tmux (with `set-clipboard on`). Terminals
/// without OSC 52 support silently ignore the sequence.
pub struct Osc52Clipboard<W: Write> {
    out: W,
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl Osc52Clipboard<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

/// Build the escape sequence for `text`.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text.as_bytes()))
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.out
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|e| AdminError::Clipboard {
                detail: format!("Failed to write to terminal: {e}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_wraps_base64_payload() {
        assert_eq!(osc52_sequence("kenja"), "\x1b]52;c;a2VuamE=\x07");
    }

    #[test]
    fn writes_sequence_to_sink() {
        let mut clipboard = Osc52Clipboard::new(Vec::new());
        clipboard.write_text("kenja").unwrap();
        assert_eq!(clipboard.out, b"\x1b]52;c;a2VuamE=\x07".to_vec());
    }
}
