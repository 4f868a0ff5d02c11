//! Persisted login session.
//!
//! The token and the user it belongs to are one document: they are written,
//! read and removed together, so no reader can ever observe one without the
//! other.

pub mod errors;
pub mod storage;
pub mod store;

pub use errors::SessionError;
pub use storage::{FileSessionStorage, MemorySessionStorage, SessionStorage, default_session_path};
pub use store::{SessionData, SessionStore};
