pub mod audit_source;
pub mod clipboard;
pub mod key_store;
pub mod prompter;
pub mod token_generator;
