use std::{sync::Arc, time::Duration};
use log::trace;
use reqwest::{Body, Method, Response};
use serde::Serialize;

use crate::{executor, request::{self, RequestOption, RequestOptions}, transport::Transport, ErrorType};

/// Sends an HTTP request and returns the response.
///
/// The `options` are applied in order; the first one that fails aborts the call and its error
/// is returned without building or sending the request. Without a [`with_transport`](crate::request::with_transport)
/// option, the request is sent with the shared [`default_transport`](crate::transport::default_transport).
///
/// ### Example
/// ```rust,no_run
/// use sendopt::request::{with_header, with_param};
///
/// # async fn run() -> Result<(), sendopt::ErrorType> {
/// let response = sendopt::send("GET", "https://example.com/search", [
///   with_param("q", "rust"),
///   with_header("Accept", "text/html"),
/// ]).await?;
/// # let _ = response;
/// # Ok(())
/// # }
/// ```
pub async fn send<I>(method: &str, url: &str, options: I) -> Result<Response, ErrorType>
where
  I: IntoIterator<Item = RequestOption>,
{
  let mut config = RequestOptions::new(method, url);

  for (index, option) in options.into_iter().enumerate() {
    trace!("Applying option #{} to {} {}", index, method, url);
    option.apply(&mut config)?;
  }

  executor::execute(config).await
}

/// A chainable alternative to passing a list of options to [`send`].
///
/// Every `with_*` method appends the matching option, so later calls override earlier ones
/// exactly like they would in the option list.
///
/// ### Example
/// ```rust,no_run
/// use sendopt::RequestBuilder;
///
/// # async fn run() -> Result<(), sendopt::ErrorType> {
/// let response = RequestBuilder::post("https://example.com/items")
///   .with_header("Authorization", "Bearer token")
///   .with_json_body(serde_json::json!({ "name": "widget" }))
///   .send()
///   .await?;
/// # let _ = response;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RequestBuilder {
  method: String,
  url: String,
  options: Vec<RequestOption>,
}

impl RequestBuilder {
  /// Creates a builder for a request with any method accepted by `reqwest::Method`.
  ///
  /// The method and URL are validated when the request is sent.
  ///
  /// ```rust,no_run
  /// # async fn run() -> Result<(), sendopt::ErrorType> {
  /// let response = sendopt::RequestBuilder::new("PURGE", "https://cdn.example.com/app.js").send().await?;
  /// # let _ = response;
  /// # Ok(())
  /// # }
  /// ```
  pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
    RequestBuilder {
      method: method.into(),
      url: url.into(),
      options: Vec::new(),
    }
  }

  /// Creates a `GET` request builder for the given URL.
  pub fn get(url: impl Into<String>) -> Self {
    Self::new(Method::GET.as_str(), url)
  }

  /// Creates a `HEAD` request builder for the given URL.
  pub fn head(url: impl Into<String>) -> Self {
    Self::new(Method::HEAD.as_str(), url)
  }

  /// Creates a `POST` request builder for the given URL.
  pub fn post(url: impl Into<String>) -> Self {
    Self::new(Method::POST.as_str(), url)
  }

  /// Creates a `PUT` request builder for the given URL.
  pub fn put(url: impl Into<String>) -> Self {
    Self::new(Method::PUT.as_str(), url)
  }

  /// Creates a `PATCH` request builder for the given URL.
  pub fn patch(url: impl Into<String>) -> Self {
    Self::new(Method::PATCH.as_str(), url)
  }

  /// Creates a `DELETE` request builder for the given URL.
  pub fn delete(url: impl Into<String>) -> Self {
    Self::new(Method::DELETE.as_str(), url)
  }

  /// Creates an `OPTIONS` request builder for the given URL.
  pub fn options(url: impl Into<String>) -> Self {
    Self::new(Method::OPTIONS.as_str(), url)
  }

  /// Creates a `TRACE` request builder for the given URL.
  pub fn trace(url: impl Into<String>) -> Self {
    Self::new(Method::TRACE.as_str(), url)
  }

  /// Appends an arbitrary option, e.g. one created with [`RequestOption::new`].
  pub fn with_option(mut self, option: RequestOption) -> Self {
    self.options.push(option);
    self
  }

  /// Sets the body of the request. The last body set wins.
  pub fn with_body(self, body: impl Into<Body>) -> Self {
    self.with_option(request::with_body(body))
  }

  /// Sets a JSON body and the `Content-Type: application/json` header.
  pub fn with_json_body<T>(self, value: T) -> Self
  where
    T: Serialize + Send + 'static,
  {
    self.with_option(request::with_json_body(value))
  }

  /// Sets a query parameter, replacing any value the URL already has for `key`.
  pub fn with_param(self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.with_option(request::with_param(key, value))
  }

  /// Sets a header, overwriting the value from an earlier call.
  pub fn with_header(self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.with_option(request::with_header(key, value))
  }

  /// Sends the request with `transport` instead of the shared default one.
  pub fn with_transport(self, transport: Arc<dyn Transport>) -> Self {
    self.with_option(request::with_transport(Some(transport)))
  }

  /// Sets the timeout for this request.
  pub fn with_timeout(self, timeout: Duration) -> Self {
    self.with_option(request::with_timeout(timeout))
  }

  /// Applies the collected options and sends the request. See [`send`].
  pub async fn send(self) -> Result<Response, ErrorType> {
    send(&self.method, &self.url, self.options).await
  }
}
