//! Core library for the `hcpbench` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, the error hierarchy, and the paced status-endpoint probe. The
//! primary user-facing interface is the `hcpbench` command-line application.
pub mod args;
pub mod error;
pub mod probe;
