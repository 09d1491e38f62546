//! Persisted admin session
//!
//! The session is the `{ accessToken, refreshToken }` pair handed out at login. It is
//! persisted under a single location, replaced wholesale on refresh and removed on
//! logout or when the backend refuses to renew it.

mod events;
mod store;

pub use events::SessionEvent;
pub use store::{FileSessionStore, MemorySessionStore, Session, SessionStore};
