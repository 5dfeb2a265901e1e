use std::fmt::Debug;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use reqwest::{Body, Method, Request, Response};
use url::Url;

use crate::ErrorType;

static DEFAULT_TRANSPORT: OnceLock<Arc<dyn Transport>> = OnceLock::new();

/// A reusable sender capable of building and executing requests.
///
/// Implementations are shared between calls, so `send` has to be safe to call concurrently.
/// `reqwest::Client` implements this trait and is what [`default_transport`] hands out.
#[async_trait]
pub trait Transport: Send + Sync + Debug {
  /// Creates a request for the given method, URL and body.
  ///
  /// The default implementation builds a bare `reqwest::Request` and never fails.
  fn build_request(&self, method: Method, url: Url, body: Option<Body>) -> Result<Request, ErrorType> {
    let mut request = Request::new(method, url);
    *request.body_mut() = body;
    Ok(request)
  }

  /// Sends a fully-built request and returns the response.
  async fn send(&self, request: Request) -> Result<Response, ErrorType>;
}

#[async_trait]
impl Transport for reqwest::Client {
  fn build_request(&self, method: Method, url: Url, body: Option<Body>) -> Result<Request, ErrorType> {
    let mut builder = self.request(method, url);

    if let Some(body) = body {
      builder = builder.body(body);
    }

    builder
      .build()
      .map_err(|e| ErrorType::RequestConstructionError(Box::new(e)))
  }

  async fn send(&self, request: Request) -> Result<Response, ErrorType> {
    self.execute(request).await.map_err(ErrorType::RequestError)
  }
}

/// Returns the process-wide shared transport, a `reqwest::Client` with default settings.
///
/// The client is created on first use and reused for every call that doesn't override it.
pub fn default_transport() -> Arc<dyn Transport> {
  DEFAULT_TRANSPORT
    .get_or_init(|| Arc::new(reqwest::Client::new()) as Arc<dyn Transport>)
    .clone()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_transport_is_shared() {
    assert!(Arc::ptr_eq(&default_transport(), &default_transport()));
  }

  #[test]
  fn client_builds_request_with_body() {
    let client = reqwest::Client::new();
    let url = Url::parse("https://example.com/items?id=4").unwrap();

    let request = Transport::build_request(&client, Method::PUT, url.clone(), Some(Body::from("payload"))).unwrap();

    assert_eq!(request.method(), &Method::PUT);
    assert_eq!(request.url(), &url);
    assert_eq!(request.body().and_then(|b| b.as_bytes()), Some(&b"payload"[..]));
  }

  #[test]
  fn client_builds_bodyless_request() {
    let client = reqwest::Client::new();
    let url = Url::parse("https://example.com/").unwrap();

    let request = Transport::build_request(&client, Method::GET, url, None).unwrap();

    assert!(request.body().is_none());
  }
}
