//! Study policy constants.
//!
//! These are fixed policy values, not settings. Delays are in milliseconds.

/// Words per fresh block.
pub const BLOCK_SIZE: usize = 5;

/// A cumulative review runs every time this many words have been covered.
pub const REVIEW_INTERVAL: usize = 25;

/// Time the "correct" feedback stays up before advancing.
pub const CORRECT_ADVANCE_MS: u64 = 1000;

/// Time the "wrong" feedback stays up before the block restarts.
pub const WRONG_RESET_MS: u64 = 3000;

/// Block restart delay once the user has resolved the mistake in the matcher.
pub const RESOLVED_RESET_MS: u64 = 100;

/// Time the offending word stays up before a test run restarts.
pub const TEST_RESTART_MS: u64 = 2500;

/// Lead time before a new word is pronounced.
pub const PRONOUNCE_LEAD_MS: u64 = 300;
