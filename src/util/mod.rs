//! Small shared utilities.

pub mod ids;
pub mod timeout;

pub use ids::{IdGenerator, SequentialIdGenerator, UuidIdGenerator};
pub use timeout::{cancel_after, with_timeout};
