// Library crate: the chaining core, session state and command protocol.
// The CLI front end lives in the binary crate.

pub mod chain;
pub mod command;
pub mod error;
pub mod event;
pub mod fixtures;
pub mod floor;
pub mod loop_check;
pub mod paste;
pub mod request;
pub mod session;
pub mod state;
pub mod validation;

pub use chain::{chain_segments, sort_contiguous, ChainConfig, DEFAULT_TOLERANCE};
pub use error::{ChainError, FloorError, SettingsError};
pub use loop_check::{LoopChecker, LoopOutcome, LoopReport};
pub use request::{RequestId, RequestQueue};
pub use session::FloorSession;
