use std::{collections::BTreeMap, fmt, sync::Arc, time::Duration};
use log::trace;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Body;
use serde::Serialize;

use crate::{transport::{default_transport, Transport}, ErrorType};

/// The options collected for a single request.
///
/// A fresh instance is created by every [`send`](crate::send) call, mutated by the
/// [`RequestOption`]s in the order they were passed and consumed once the request is built.
pub struct RequestOptions {
  method: String,
  url: String,
  body: Option<Body>,
  headers: HeaderMap,
  params: BTreeMap<String, String>,
  timeout: Option<Duration>,
  transport: Arc<dyn Transport>,
}

impl RequestOptions {
  /// Creates the options for a request with the shared default transport and no headers or params.
  pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
    RequestOptions {
      method: method.into(),
      url: url.into(),
      body: None,
      headers: HeaderMap::new(),
      params: BTreeMap::new(),
      timeout: None,
      transport: default_transport(),
    }
  }

  pub fn method(&self) -> &str {
    &self.method
  }

  pub fn url(&self) -> &str {
    &self.url
  }

  pub fn body(&self) -> Option<&Body> {
    self.body.as_ref()
  }

  pub fn headers(&self) -> &HeaderMap {
    &self.headers
  }

  pub fn params(&self) -> &BTreeMap<String, String> {
    &self.params
  }

  pub fn timeout(&self) -> Option<Duration> {
    self.timeout
  }

  pub fn transport(&self) -> &Arc<dyn Transport> {
    &self.transport
  }

  /// Replaces the request body. The last call wins.
  pub fn set_body(&mut self, body: Body) {
    self.body = Some(body);
  }

  /// Sets a header, replacing every value previously set for the same name.
  pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
    self.headers.insert(name, value);
  }

  /// Sets a query parameter, replacing the previous value for `key`.
  pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
    self.params.insert(key.into(), value.into());
  }

  /// Sets the deadline for the whole request, from connecting until the response body is read.
  pub fn set_timeout(&mut self, timeout: Duration) {
    self.timeout = Some(timeout);
  }

  pub fn set_transport(&mut self, transport: Arc<dyn Transport>) {
    self.transport = transport;
  }

  pub(crate) fn into_parts(self) -> RequestParts {
    RequestParts {
      method: self.method,
      url: self.url,
      body: self.body,
      headers: self.headers,
      params: self.params,
      timeout: self.timeout,
      transport: self.transport,
    }
  }
}

impl fmt::Debug for RequestOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RequestOptions")
      .field("method", &self.method)
      .field("url", &self.url)
      .field("has_body", &self.body.is_some())
      .field("headers", &self.headers)
      .field("params", &self.params)
      .field("timeout", &self.timeout)
      .field("transport", &self.transport)
      .finish()
  }
}

/// Owned fields of a finished [`RequestOptions`], handed to the executor.
pub(crate) struct RequestParts {
  pub method: String,
  pub url: String,
  pub body: Option<Body>,
  pub headers: HeaderMap,
  pub params: BTreeMap<String, String>,
  pub timeout: Option<Duration>,
  pub transport: Arc<dyn Transport>,
}

type ApplyFn = Box<dyn FnOnce(&mut RequestOptions) -> Result<(), ErrorType> + Send>;

/// A single change to [`RequestOptions`].
///
/// Use the `with_*` functions of this module for the built-in options, or
/// [`RequestOption::new`] to write your own.
///
/// ### Example
/// ```rust
/// use sendopt::request::{RequestOption, with_header};
///
/// let accept_json = with_header("Accept", "application/json");
/// let trace_id = RequestOption::new(|options| {
///   options.set_param("trace", "1");
///   Ok(())
/// });
/// # let _ = (accept_json, trace_id);
/// ```
pub struct RequestOption(ApplyFn);

impl RequestOption {
  pub fn new<F>(apply: F) -> Self
  where
    F: FnOnce(&mut RequestOptions) -> Result<(), ErrorType> + Send + 'static,
  {
    RequestOption(Box::new(apply))
  }

  pub(crate) fn apply(self, options: &mut RequestOptions) -> Result<(), ErrorType> {
    (self.0)(options)
  }
}

impl fmt::Debug for RequestOption {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("RequestOption")
  }
}

/// Sets the body of the request.
pub fn with_body(body: impl Into<Body>) -> RequestOption {
  let body = body.into();
  RequestOption::new(move |options| {
    options.set_body(body);
    Ok(())
  })
}

/// Sets the body of the request to the JSON encoding of `value`
/// and the `Content-Type` header to `application/json`.
///
/// The value is encoded when the option is applied; failures are returned as
/// [`ErrorType::SerializationError`].
pub fn with_json_body<T>(value: T) -> RequestOption
where
  T: Serialize + Send + 'static,
{
  RequestOption::new(move |options| {
    let encoded = serde_json::to_vec(&value)?;
    trace!("Encoded JSON body ({} bytes)", encoded.len());

    options.set_body(Body::from(encoded));
    options.set_header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(())
  })
}

/// Sets a query parameter. Parameters already present in the URL under the same key are replaced.
pub fn with_param(key: impl Into<String>, value: impl Into<String>) -> RequestOption {
  let (key, value) = (key.into(), value.into());
  RequestOption::new(move |options| {
    options.set_param(key, value);
    Ok(())
  })
}

/// Sets a header, overwriting any value set by an earlier option.
///
/// Header names and values are validated when the option is applied.
pub fn with_header(key: impl Into<String>, value: impl Into<String>) -> RequestOption {
  let (key, value) = (key.into(), value.into());
  RequestOption::new(move |options| {
    let name = HeaderName::from_bytes(key.as_bytes())
      .map_err(|_| ErrorType::ConfigurationError(format!("invalid header name {:?}", key)))?;
    let value = HeaderValue::from_str(&value)
      .map_err(|_| ErrorType::ConfigurationError(format!("invalid value for header {:?}", key)))?;

    options.set_header(name, value);
    Ok(())
  })
}

/// Sets the transport used to send the request.
///
/// Passing `None` fails with [`ErrorType::ConfigurationError`].
pub fn with_transport(transport: Option<Arc<dyn Transport>>) -> RequestOption {
  RequestOption::new(move |options| match transport {
    Some(transport) => {
      options.set_transport(transport);
      Ok(())
    }
    None => Err(ErrorType::ConfigurationError(String::from("missing transport"))),
  })
}

/// Sets the timeout for the request.
///
/// Dropping the future returned by [`send`](crate::send) cancels the request as well.
pub fn with_timeout(timeout: Duration) -> RequestOption {
  RequestOption::new(move |options| {
    options.set_timeout(timeout);
    Ok(())
  })
}
