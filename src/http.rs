//! Transport primitives for platform credential endpoints.
//!
//! [`JsonHttpClient`] is the broker's only dependency on an HTTP stack: it performs a GET and
//! hands back the raw status and body. Status checks and JSON decoding happen in
//! [`fetch_json`] so every transport classifies failures the same way.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::{TransientError, TransportError},
};
#[cfg(feature = "reqwest")] use reqwest::ClientBuilder;
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Boxed future returned by [`JsonHttpClient::get`].
pub type HttpFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of calling the token and ticket endpoints.
///
/// Implementations must be `Send + Sync + 'static` so they can be shared across broker clones,
/// and the returned futures must be `Send` so accessors can hop executors.
pub trait JsonHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Performs a GET against `url`.
	///
	/// Non-2xx responses are still returned as [`HttpResponse`] values; only failures that
	/// prevent a response from arriving should surface as [`TransportError`].
	fn get(&self, url: Url) -> HttpFuture<'_, HttpResponse>;
}

/// Raw response captured by a [`JsonHttpClient`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body bytes.
	pub body: Vec<u8>,
}
impl HttpResponse {
	/// Builds a `200 OK` response carrying `body`.
	pub fn ok(body: impl Into<Vec<u8>>) -> Self {
		Self { status: 200, body: body.into() }
	}

	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Calls `url` through `client` and decodes a JSON body into `T`.
///
/// `endpoint` labels the call in error messages (`token`, `ticket`).
pub async fn fetch_json<C, T>(client: &C, endpoint: &'static str, url: Url) -> Result<T>
where
	C: ?Sized + JsonHttpClient,
	T: DeserializeOwned,
{
	let response = client.get(url).await?;

	if !response.is_success() {
		return Err(TransientError::Endpoint {
			endpoint,
			message: format!(
				"HTTP {} with body `{}`",
				response.status,
				body_preview(&response.body)
			),
			status: Some(response.status),
		}
		.into());
	}

	let mut de = serde_json::Deserializer::from_slice(&response.body);

	serde_path_to_error::deserialize(&mut de).map_err(|source| {
		TransientError::ResponseParse { endpoint, source, status: Some(response.status) }.into()
	})
}

const BODY_PREVIEW_LIMIT: usize = 256;

fn body_preview(body: &[u8]) -> String {
	let text = String::from_utf8_lossy(body);

	if text.chars().count() <= BODY_PREVIEW_LIMIT {
		return text.into_owned();
	}

	let mut buf = text.chars().take(BODY_PREVIEW_LIMIT).collect::<String>();

	buf.push('…');

	buf
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}

	/// Finishes a reqwest [`ClientBuilder`] (timeouts, TLS settings, proxies) and wraps it.
	pub fn from_builder(builder: ClientBuilder) -> Result<Self, ConfigError> {
		Ok(Self(builder.build()?))
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl JsonHttpClient for ReqwestHttpClient {
	fn get(&self, url: Url) -> HttpFuture<'_, HttpResponse> {
		let client = self.0.clone();

		Box::pin(async move {
			let response = client.get(url).send().await?;
			let status = response.status().as_u16();
			let body = response.bytes().await?.to_vec();

			Ok(HttpResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::auth::AccessTokenResponse;

	struct StaticClient(HttpResponse);
	impl JsonHttpClient for StaticClient {
		fn get(&self, _url: Url) -> HttpFuture<'_, HttpResponse> {
			let response = self.0.clone();

			Box::pin(async move { Ok(response) })
		}
	}

	fn url() -> Url {
		Url::parse("https://qyapi.example.com/cgi-bin/gettoken").expect("Fixture URL should parse.")
	}

	#[tokio::test]
	async fn fetch_json_decodes_success_bodies() {
		let client = StaticClient(HttpResponse::ok(r#"{"access_token":"tok","expires_in":7200}"#));
		let payload: AccessTokenResponse =
			fetch_json(&client, "token", url()).await.expect("Payload should decode.");

		assert_eq!(payload.access_token, "tok");
	}

	#[tokio::test]
	async fn fetch_json_reports_status_failures() {
		let client = StaticClient(HttpResponse { status: 502, body: b"bad gateway".to_vec() });
		let err = fetch_json::<_, AccessTokenResponse>(&client, "token", url())
			.await
			.expect_err("Non-2xx responses must fail.");

		match err {
			Error::Transient(TransientError::Endpoint { endpoint, status, message }) => {
				assert_eq!(endpoint, "token");
				assert_eq!(status, Some(502));
				assert!(message.contains("bad gateway"));
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[tokio::test]
	async fn fetch_json_reports_the_failing_field_path() {
		#[derive(Debug, Deserialize)]
		struct Lifetime {
			#[allow(dead_code)]
			expires_in: i64,
		}

		let client =
			StaticClient(HttpResponse::ok(r#"{"access_token":"tok","expires_in":"soon"}"#));
		let err = fetch_json::<_, Lifetime>(&client, "token", url())
			.await
			.expect_err("Malformed payloads must fail.");

		match err {
			Error::Transient(TransientError::ResponseParse { source, .. }) => {
				assert_eq!(source.path().to_string(), "expires_in");
			},
			other => panic!("Unexpected error variant: {other:?}."),
		}
	}

	#[test]
	fn body_preview_truncates_long_bodies() {
		let preview = body_preview("x".repeat(BODY_PREVIEW_LIMIT + 10).as_bytes());

		assert_eq!(preview.chars().count(), BODY_PREVIEW_LIMIT + 1);
		assert!(preview.ends_with('…'));
	}
}
