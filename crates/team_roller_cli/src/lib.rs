//! TeamRoller CLI library exports.
//!
//! The binary is a thin dispatcher; the command implementations live here so
//! they can be tested without running the binary.

pub mod commands;
pub mod errors;
pub mod logging;
