pub mod backup;
pub mod dose;
pub mod log;
pub mod logic;
pub mod medication;
pub mod timeline;
pub mod window;
