pub mod fixture_source;
pub mod json_lines_source;
