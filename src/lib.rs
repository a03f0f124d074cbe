pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod forms;
pub mod oauth;
pub mod routes;
pub mod search;
pub mod session;
pub mod storage;
pub mod theme;
pub mod timer;
pub mod tracing;

pub use api::ApiClient;
pub use config::{ClientConfig, SearchConfig};
pub use error::{ApiError, ValidationError};
pub use search::{SearchAggregator, SearchBox, SearchResult, SearchSource, SearchState};
pub use session::{AuthState, Session};
pub use storage::{LocalStore, TokenStore};
