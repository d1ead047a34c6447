//! Domain logic - pure version algebra independent of git operations

pub mod bump;
pub mod tag;
pub mod version;

pub use bump::{available_bumps, bump, BumpLevel};
pub use tag::TagPattern;
pub use version::{PreLabel, Version};
