pub mod api_key;
pub mod audit_entry;
pub mod effect;
pub mod report;
pub mod selection;
pub mod view;
