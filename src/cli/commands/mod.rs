pub mod backup;
pub mod config;
pub mod db;
pub mod dose;
pub mod export;
pub mod init;
pub mod log;
pub mod med;
pub mod take;
pub mod timeline;
