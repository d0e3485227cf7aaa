//! Adaptrack core building blocks
//!
//! Domain-free containers and numeric helpers shared by the tracking crates.

pub mod ring;
pub mod stats;

pub use ring::RingBuffer;
pub use stats::Summary;
