/// Boxed error produced by a custom [`Transport`](crate::transport::Transport) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Error types that can be returned by [`send`](crate::send) and the option constructors.
///
/// Errors raised while applying options abort the call before any request is built.
/// Transport errors are carried as-is: `RequestError` wraps the `reqwest::Error` returned
/// by the default client, `TransportError` holds whatever a custom transport produced.
#[derive(Debug, thiserror::Error)]
pub enum ErrorType {
  /// An option received an invalid argument, e.g. a missing transport or a malformed header.
  #[error("invalid request option: {0}")]
  ConfigurationError(String),
  /// The value passed to [`with_json_body`](crate::request::with_json_body) couldn't be encoded.
  #[error("failed to encode JSON body: {0}")]
  SerializationError(#[from] serde_json::Error),
  /// The URL couldn't be parsed. Relative URLs end up here too.
  #[error("invalid URL: {0}")]
  UrlParsingError(#[from] url::ParseError),
  /// The method is not a valid HTTP method token.
  #[error("invalid HTTP method {0:?}")]
  InvalidMethod(String),
  /// The transport refused to construct the request.
  #[error("failed to construct request: {0}")]
  RequestConstructionError(#[source] BoxError),
  /// `reqwest::Error` variant. See the nested error for more details.
  #[error(transparent)]
  RequestError(reqwest::Error),
  /// Error returned by a custom transport's send operation.
  #[error(transparent)]
  TransportError(BoxError),
}

impl ErrorType {
  /// Returns `true` if the collected options couldn't be turned into a request
  /// (bad URL, bad method or a rejection by the transport's request constructor).
  pub fn is_request_construction(&self) -> bool {
    matches!(
      self,
      ErrorType::UrlParsingError(_)
        | ErrorType::InvalidMethod(_)
        | ErrorType::RequestConstructionError(_)
    )
  }
}
