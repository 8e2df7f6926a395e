pub mod json_backend;
pub mod preferences;
