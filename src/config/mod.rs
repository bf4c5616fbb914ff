//! Command-line value parsing.

mod duration;

pub use duration::parse_duration;
