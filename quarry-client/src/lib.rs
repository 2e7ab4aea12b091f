//! Remote API access for Quarry.
//!
//! - [`ComposeApi`], [`MessagingApi`], [`SystemApi`]: async seams, one per service
//! - [`HttpClient`]: reqwest implementation of all three
//! - [`ListEnvelope`] / [`Filter`]: list responses and their query parameters
//!
//! Transport concerns (TLS, timeouts, cancellation) are reqwest's. There is
//! no retry at this layer; failed calls surface as [`ApiError`].

mod api;
mod config;
mod envelope;
mod error;
mod http;

pub use api::{ComposeApi, MessagingApi, SystemApi};
pub use config::ClientConfig;
pub use envelope::{Filter, ListEnvelope};
pub use error::{ApiError, ApiResult};
pub use http::{HttpClient, REQUEST_ID_HEADER};
