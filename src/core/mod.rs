pub mod config;
pub mod conversation;
pub mod error;
pub mod message;
pub mod params;
pub mod session;
pub mod storage;
pub mod theme;
