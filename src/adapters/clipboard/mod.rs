#[cfg(test)]
pub mod memory_clipboard;
pub mod osc52_clipboard;
