use std::collections::BTreeMap;
use log::debug;
use reqwest::{Method, Response};
use url::{form_urlencoded, Url};

use crate::{request::RequestOptions, ErrorType};

/// Builds the request described by `options` and hands it to the selected transport.
///
/// The transport's result is returned as-is.
pub(crate) async fn execute(options: RequestOptions) -> Result<Response, ErrorType> {
  let parts = options.into_parts();

  let method = Method::from_bytes(parts.method.as_bytes())
    .map_err(|_| ErrorType::InvalidMethod(parts.method.clone()))?;
  let url = Url::parse(&parts.url)?;

  let mut request = parts.transport.build_request(method, url, parts.body)?;

  // Replaces the headers set by the transport's request constructor as well.
  *request.headers_mut() = parts.headers;
  merge_query(request.url_mut(), &parts.params);

  if let Some(timeout) = parts.timeout {
    *request.timeout_mut() = Some(timeout);
  }

  debug!("Sending {} request to {}", request.method(), request.url());
  parts.transport.send(request).await
}

/// Writes `params` into the query string of `url`.
///
/// An empty `params` leaves the URL untouched. If the URL has no query yet, the encoded
/// params become the query. Otherwise the existing pairs are kept, except for keys present
/// in `params`, whose values are all replaced by the new one.
pub(crate) fn merge_query(url: &mut Url, params: &BTreeMap<String, String>) {
  if params.is_empty() {
    return;
  }

  let query = match url.query() {
    None | Some("") => encode(params.iter().map(|(k, v)| (k.as_str(), v.as_str()))),
    Some(_) => {
      let mut merged: BTreeMap<String, Vec<String>> = BTreeMap::new();
      for (key, value) in url.query_pairs().into_owned() {
        merged.entry(key).or_default().push(value);
      }

      for (key, value) in params {
        merged.insert(key.clone(), vec![value.clone()]);
      }

      encode(
        merged
          .iter()
          .flat_map(|(k, values)| values.iter().map(move |v| (k.as_str(), v.as_str()))),
      )
    }
  };

  url.set_query(Some(&query));
}

fn encode<'a>(pairs: impl Iterator<Item = (&'a str, &'a str)>) -> String {
  let mut serializer = form_urlencoded::Serializer::new(String::new());
  for (key, value) in pairs {
    serializer.append_pair(key, value);
  }
  serializer.finish()
}
