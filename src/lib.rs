//! # sendopt | one HTTP request, configured with options
//!
//! `sendopt` is a `rust` library for sending a single HTTP request described by a method, a URL
//! and a list of composable options. It is built on top of `reqwest`, which does the actual transport work.
//!
//! ```rust,no_run
//! use sendopt::request::{with_header, with_json_body, with_param};
//!
//! #[tokio::main]
//! async fn main() {
//!    let response = sendopt::send("POST", "https://example.com/items", [
//!      with_param("dry_run", "true"),
//!      with_header("Authorization", "Bearer token"),
//!      with_json_body(serde_json::json!({ "name": "widget" })),
//!    ]).await.unwrap();
//!
//!    println!("{}", response.text().await.unwrap());
//! }
//! ```
//!
//! ### Options
//!
//! Options are applied from left to right, and later options override earlier ones:
//! a header or query parameter set twice keeps only the last value, and the last body wins.
//! Query parameters are merged into the query string already present in the URL, replacing
//! the values of keys set by an option and keeping the rest.
//!
//! Headers set by options replace the whole header set of the constructed request.
//!
//! The first option that fails aborts the call, and nothing is sent.
//!
//! ### Transport
//!
//! Requests are sent through a [`Transport`](transport::Transport). Unless overridden with
//! [`with_transport`](request::with_transport), a process-wide `reqwest::Client` is used.
//! TLS, proxies, redirects and connection pooling are all configured on the transport.
//!
//! ### Cancellation
//!
//! Dropping the future returned by [`send`] cancels the request. A deadline can be set with
//! [`with_timeout`](request::with_timeout).

#![cfg_attr(not(test), deny(unused_crate_dependencies))]
mod error;
mod executor;
mod dispatcher;

/// The transport handle used to build and send requests.
pub mod transport;

/// Per-request options and the accumulator they are applied to.
pub mod request;

pub use dispatcher::{send, RequestBuilder};
pub use error::{BoxError, ErrorType};

/// Re-exports of the `reqwest` types that appear in the public API.
pub use reqwest::{Body, Method, Request, Response};
