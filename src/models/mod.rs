pub mod medication;
pub mod medication_log;
pub mod timeline;
