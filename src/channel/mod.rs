//! CLI scraping over the SSH PTY channel.
//!
//! Accumulates device output with ANSI stripping and detects prompts
//! with a tail-limited regex search.

mod buffer;
mod cli;

pub use buffer::PatternBuffer;
pub use cli::CliChannel;
