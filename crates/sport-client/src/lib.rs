//! sport-client: motor-control client abstractions for Go2-class quadrupeds
//!
//! This crate describes the vendor "sport" client as a trait so the voice and
//! routine programs never touch the SDK directly. The default build enables a
//! `mock` backend that records every call, so binaries run on any host and the
//! call sequences are testable.

mod types;
pub use types::{Euler, RecordedCall, SessionInfo, SportCommand, Timestamp, Velocity};

mod error;
pub use error::{Result, SportError};

mod traits;
pub use traits::SportClient;

#[cfg(feature = "mock")]
mod mock;

#[cfg(feature = "mock")]
pub use mock::{CallLog, MockSport};

pub mod plugin;
