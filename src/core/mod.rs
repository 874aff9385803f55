// LogTally - core/mod.rs
//
// Core business logic layer: classification, statistics, report text,
// exports. Must NOT depend on: platform, app, or the filesystem.

pub mod classifier;
pub mod export;
pub mod model;
pub mod report;
