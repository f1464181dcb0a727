//! Expiry policy, clocks, and the per-second countdown.

pub mod clock;
pub mod countdown;
pub mod policy;

pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown::Countdown;
pub use policy::{ExpiryPolicy, Remaining};
