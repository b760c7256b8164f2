//! Platform-independent pieces: unit conversion and the status channel.

pub mod status;
pub mod units;
