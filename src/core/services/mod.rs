pub mod audit_filter;
pub mod audit_viewer;
pub mod key_manager;
pub mod report_view;
pub mod token;
