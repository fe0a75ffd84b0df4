pub mod api;
pub mod catalog;
pub mod completion;
pub mod config;
pub mod crypto;
pub mod db;
pub mod error;
