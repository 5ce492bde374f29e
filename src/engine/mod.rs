//! Message-driven engine hosting the candidate filter off the caller's thread

/// Request and response messages
pub mod protocol;
/// Sequential request handling and loaded state
pub mod session;
/// Single-consumer engine thread
pub mod worker;

pub use protocol::{Request, Response};
pub use session::{Session, SessionConfig};
pub use worker::EngineWorker;
