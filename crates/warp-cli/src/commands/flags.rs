//! Flags command - describe the command-string language

use anyhow::Result;
use warp_core::command::PROGRAM_NAME;
use warp_core::options::usage;

/// Execute the flags command
pub fn execute() -> Result<()> {
    print!("{}", usage(PROGRAM_NAME));
    Ok(())
}
