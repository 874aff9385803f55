// LogTally - app/mod.rs
//
// Application layer: run orchestration, console presentation, sample data.
// Dependencies: core, platform, util.

pub mod console;
pub mod pipeline;
pub mod sample;
