use crate::core::errors::Result;

/// Write-only text sink.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}
