// Export modules for testing
pub mod balance;
pub mod collector;
pub mod config;
pub mod contracts;
pub mod error;
pub mod models;
pub mod report;
pub mod rpc;
pub mod scanner;
