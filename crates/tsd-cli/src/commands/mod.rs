//! Command implementations for the TSD CLI.

pub mod check;
pub mod facts;
pub mod init;
