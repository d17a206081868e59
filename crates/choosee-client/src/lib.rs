//! HTTP clients for the Choosee backend and the Google place APIs, plus the
//! persisted session they share.

pub mod auth;
pub mod client;
pub mod error;
pub mod places;
pub mod recommendations;
pub mod session;
pub mod suggestions;
pub mod visited;

mod types;

pub use client::ChooseeClient;
pub use error::{ClientError, GENERIC_ERROR_MESSAGE};
pub use places::PlacesClient;
pub use session::{FileStorage, MemoryStorage, Session, Storage};
