//! Wire payloads returned by the token and ticket endpoints.
//!
//! Every platform response carries an `errcode`/`errmsg` pair. A non-zero code marks the
//! fetch as failed even when the HTTP status is 200.

// self
use crate::_prelude::*;

/// `errcode`/`errmsg` pair flattened into every platform payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformStatus {
	/// Platform error code; zero means success.
	#[serde(default)]
	pub errcode: i64,
	/// Platform error message.
	#[serde(default)]
	pub errmsg: String,
}
impl PlatformStatus {
	/// Converts a non-zero error code into [`Error::Remote`].
	pub fn check(&self) -> Result<()> {
		if self.errcode == 0 {
			Ok(())
		} else {
			Err(Error::Remote { code: self.errcode, message: self.errmsg.clone() })
		}
	}
}

/// Access token response body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenResponse {
	/// Issued access token.
	#[serde(default)]
	pub access_token: String,
	/// Lifetime declared by the platform, in seconds.
	#[serde(default)]
	pub expires_in: i64,
	/// Embedded platform status.
	#[serde(flatten)]
	pub status: PlatformStatus,
}

/// JS-SDK ticket response body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketResponse {
	/// Issued JS-SDK ticket.
	#[serde(default)]
	pub ticket: String,
	/// Lifetime declared by the platform, in seconds.
	#[serde(default)]
	pub expires_in: i64,
	/// Embedded platform status.
	#[serde(flatten)]
	pub status: PlatformStatus,
}
