//! Trivia Sources: the two question tiers.
//!
//! `RemoteSource` talks to the trivia HTTP API and keeps a session token so
//! the API does not repeat questions. `LocalSource` serves records from a
//! static bank loaded once at startup.

pub mod bank;
pub mod html;
pub mod local;
pub mod remote;

pub use bank::{BankEntry, BankError, FallbackBank};
pub use local::LocalSource;
pub use remote::{RemoteSource, RemoteSourceConfig};
