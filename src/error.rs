//! Broker-level error types shared across flows, transports, and descriptors.

// self
use crate::{_prelude::*, auth::CredentialBuilderError, obs::CredentialKind};

/// Broker-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical broker error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Temporary upstream failure; retry with backoff.
	#[error(transparent)]
	Transient(#[from] TransientError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Successful payload could not be turned into a credential.
	#[error("Unable to build credential.")]
	Credential(#[from] CredentialBuilderError),

	/// Platform answered with a non-zero `errcode`.
	#[error("Platform rejected the request with errcode {code}: {message}.")]
	Remote {
		/// Platform error code.
		code: i64,
		/// Platform error message (`errmsg`).
		message: String,
	},
	/// Every refresh attempt failed.
	#[error("Refreshing the {credential} failed after {attempts} attempt(s).")]
	RefreshExhausted {
		/// Credential that could not be refreshed.
		credential: CredentialKind,
		/// Number of attempts performed.
		attempts: u32,
		/// Failure reported by the final attempt.
		#[source]
		last: Box<Error>,
	},
}
impl Error {
	/// Returns `true` when the platform reported an error code rather than the transport failing.
	pub fn is_remote(&self) -> bool {
		match self {
			Self::Remote { .. } => true,
			Self::RefreshExhausted { last, .. } => last.is_remote(),
			_ => false,
		}
	}
}

/// Configuration and validation failures raised by the broker.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A rendered endpoint is not a valid URL.
	#[error("The {endpoint} endpoint rendered an invalid URL.")]
	InvalidEndpoint {
		/// Which endpoint failed to render.
		endpoint: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Temporary failure variants (safe to retry).
#[derive(Debug, ThisError)]
pub enum TransientError {
	/// Endpoint returned an unexpected but non-fatal response.
	#[error("The {endpoint} endpoint returned an unexpected response: {message}.")]
	Endpoint {
		/// Endpoint label (`token`, `ticket`).
		endpoint: &'static str,
		/// Broker-supplied message summarizing the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Endpoint responded with malformed JSON that could not be parsed.
	#[error("The {endpoint} endpoint returned malformed JSON.")]
	ResponseParse {
		/// Endpoint label (`token`, `ticket`).
		endpoint: &'static str,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::error::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the platform.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the platform.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
