pub mod audit;
pub mod console;
pub mod keys;
pub mod report;
pub mod view_helpers;
