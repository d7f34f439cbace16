// Session cache module.
// Key-value session storage plus the timestamped subset cache built on it.

pub mod paths;
pub mod session;
pub mod store;

pub use paths::{QUOTES_KEY, projects_key};
pub use session::{CacheEntry, DEFAULT_TTL, SessionCache};
pub use store::{FileStore, MemoryStore, SessionStore};
