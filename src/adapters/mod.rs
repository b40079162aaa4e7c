pub mod audit;
pub mod clipboard;
pub mod key_stores;
pub mod prompt;
pub mod tokens;
