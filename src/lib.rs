//! sysaudit - point-in-time host audit snapshots.
//!
//! This library provides the core functionality shared between:
//! - `sysaudit` - collects kernel, disk, network and distro state into one
//!   JSON document
//! - `sysctl-diff` - reports sysctl keys whose values differ between two hosts
//!
//! Modules:
//! - `collector` - sources (files, commands) and the snapshot assembler
//! - `parser` - text-to-structure parsers for tabular, delimited and sysctl output
//! - `model` - snapshot document types
//! - `diff` - sysctl drift comparison
//! - `output` - document and listing writers
//! - `config` - collection settings

pub mod collector;
pub mod config;
pub mod diff;
pub mod model;
pub mod output;
pub mod parser;
