//! OmniChain console: a terminal stand-in for the operator dashboard.
//!
//! Owns the UI-side session (pending query, evidence panel) and feeds
//! operator text to the grounded engine.

pub mod config;
pub mod session;
pub mod shell;

pub use config::ConsoleConfig;
pub use session::{Session, SessionError, SessionState};
