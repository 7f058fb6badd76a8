//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// System prompt describing the EMS teacher persona
pub const SYSTEM: &str = include_str!("../../prompts/system.pmt");

/// User prompt asking for a learning object
pub const GENERATE: &str = include_str!("../../prompts/generate.pmt");

/// User prompt asking for a rubric score as JSON
pub const GRADE: &str = include_str!("../../prompts/grade.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "system" => Some(SYSTEM),
        "generate" => Some(GENERATE),
        "grade" => Some(GRADE),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
