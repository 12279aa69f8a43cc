//! Voice Commands for the Go2
//!
//! Free text arrives as UDP datagrams from an external speech front-end, is
//! matched against an ordered keyword table, and is turned into exactly one
//! sport command performed by the [`motion_sequencer::ActionExecutor`].

mod error;
pub use error::{ClassifierError, ListenerError, Result};

mod intent;
pub use intent::Intent;

mod keywords;
pub use keywords::{KeywordSet, KeywordTable};

mod classifier;
pub use classifier::CommandClassifier;

mod message;
pub use message::{CommandMessage, MAX_DATAGRAM};

mod dispatch;
pub use dispatch::{DispatchOutcome, DispatchSettings, Dispatcher, DEFAULT_FORWARD_SPEED};

mod listener;
pub use listener::{bind, run_listener, ListenerStats, DEFAULT_BIND};
