//! Typed client for the `/api` surface plus the view state a front end keeps
//! between calls.

pub mod api_client;
pub mod board;
pub mod errors;
pub mod form;

pub use api_client::{ApiClient, ClientConfig};
pub use board::TaskBoard;
pub use errors::ClientError;
pub use form::TaskForm;
