//! Data models used throughout the application
//!
//! This module contains the wire structures exchanged with the Ethereum node
//! and the subset of block data the scanner reads.

// JSON-RPC protocol data structures
pub mod jsonrpc;

// Block and transaction payloads
pub mod block;
