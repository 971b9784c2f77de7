//! Immutable credential records, lifecycle helpers, and builders.

// self
use crate::{_prelude::*, auth::token::secret::TokenSecret};

/// Current lifecycle status for a cached credential.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialStatus {
	/// Credential is currently valid.
	Active,
	/// Credential reached its expiry instant.
	Expired,
}

/// Errors produced by [`CredentialBuilder`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum CredentialBuilderError {
	/// Issued when no (or an empty) secret value was provided.
	#[error("Credential value is required.")]
	MissingSecret,
	/// Issued when no expiry (absolute or relative) was configured.
	#[error("Expiry must be supplied via expires_at or expires_in.")]
	MissingExpiry,
}

/// Immutable cached form of an access token or JS-SDK ticket.
///
/// Caches replace the whole record on refresh, so readers always observe a value and its
/// expiry from the same fetch.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
	/// Credential value; callers must avoid logging it.
	pub secret: TokenSecret,
	/// Instant the broker accepted the credential.
	pub issued_at: OffsetDateTime,
	/// Local expiry instant used for refresh decisions.
	pub expires_at: OffsetDateTime,
	/// Lifetime declared by the platform (`expires_in`), kept for diagnostics only.
	pub declared_ttl: Option<Duration>,
}
impl Credential {
	/// Returns a builder for constructing credentials.
	pub fn builder() -> CredentialBuilder {
		CredentialBuilder::default()
	}

	/// Computes the lifecycle status at a given instant.
	pub fn status_at(&self, instant: OffsetDateTime) -> CredentialStatus {
		if instant >= self.expires_at { CredentialStatus::Expired } else { CredentialStatus::Active }
	}

	/// Returns `true` if the credential has expired at the provided instant.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		matches!(self.status_at(instant), CredentialStatus::Expired)
	}

	/// Returns `true` if the credential is expired relative to the current clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}

	/// Remaining lifetime at the provided instant; zero once expired.
	pub fn remaining_at(&self, instant: OffsetDateTime) -> Duration {
		let remaining = self.expires_at - instant;

		if remaining.is_negative() { Duration::ZERO } else { remaining }
	}
}
impl Debug for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credential")
			.field("secret", &"<redacted>")
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.field("declared_ttl", &self.declared_ttl)
			.finish()
	}
}

/// Builder for [`Credential`].
#[derive(Clone, Debug, Default)]
pub struct CredentialBuilder {
	secret: Option<TokenSecret>,
	issued_at: Option<OffsetDateTime>,
	expires_at: Option<OffsetDateTime>,
	expires_in: Option<Duration>,
	declared_ttl: Option<Duration>,
}
impl CredentialBuilder {
	/// Provides the credential value.
	pub fn secret(mut self, value: impl Into<String>) -> Self {
		self.secret = Some(TokenSecret::new(value));

		self
	}

	/// Sets the issued-at instant.
	pub fn issued_at(mut self, instant: OffsetDateTime) -> Self {
		self.issued_at = Some(instant);

		self
	}

	/// Sets an absolute expiry instant.
	pub fn expires_at(mut self, instant: OffsetDateTime) -> Self {
		self.expires_at = Some(instant);

		self
	}

	/// Sets a relative expiry duration from the issued instant.
	pub fn expires_in(mut self, duration: Duration) -> Self {
		self.expires_in = Some(duration);

		self
	}

	/// Records the platform-declared lifetime without using it for expiry.
	pub fn declared_ttl(mut self, duration: Duration) -> Self {
		self.declared_ttl = Some(duration);

		self
	}

	/// Consumes the builder and produces a [`Credential`].
	pub fn build(self) -> Result<Credential, CredentialBuilderError> {
		let secret = self
			.secret
			.filter(|secret| !secret.is_empty())
			.ok_or(CredentialBuilderError::MissingSecret)?;
		let issued_at = self.issued_at.unwrap_or_else(OffsetDateTime::now_utc);
		let expires_at = match (self.expires_at, self.expires_in) {
			(Some(instant), _) => instant,
			(None, Some(delta)) => issued_at + delta,
			(None, None) => return Err(CredentialBuilderError::MissingExpiry),
		};

		Ok(Credential { secret, issued_at, expires_at, declared_ttl: self.declared_ttl })
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros;
	// self
	use super::*;

	#[test]
	fn status_flips_at_the_expiry_instant() {
		let credential = Credential::builder()
			.secret("access")
			.issued_at(macros::datetime!(2025-01-01 00:00 UTC))
			.expires_at(macros::datetime!(2025-01-01 00:08:20 UTC))
			.build()
			.expect("Credential builder should succeed for status transitions.");

		assert_eq!(
			credential.status_at(macros::datetime!(2025-01-01 00:05 UTC)),
			CredentialStatus::Active
		);
		assert_eq!(
			credential.status_at(macros::datetime!(2025-01-01 00:08:20 UTC)),
			CredentialStatus::Expired
		);
		assert_eq!(
			credential.remaining_at(macros::datetime!(2025-01-01 00:08 UTC)),
			Duration::seconds(20)
		);
		assert_eq!(credential.remaining_at(macros::datetime!(2025-01-02 00:00 UTC)), Duration::ZERO);
	}

	#[test]
	fn builder_handles_relative_expiry_and_declared_ttl() {
		let credential = Credential::builder()
			.secret("ticket")
			.issued_at(macros::datetime!(2025-01-01 00:00 UTC))
			.expires_in(Duration::seconds(500))
			.declared_ttl(Duration::seconds(7200))
			.build()
			.expect("Credential builder should support relative expiry calculations.");

		assert_eq!(credential.expires_at, macros::datetime!(2025-01-01 00:08:20 UTC));
		assert_eq!(credential.declared_ttl, Some(Duration::seconds(7200)));
	}

	#[test]
	fn builder_rejects_empty_secret_and_missing_expiry() {
		let err = Credential::builder()
			.secret("")
			.expires_in(Duration::seconds(500))
			.build()
			.expect_err("Empty secrets must be rejected.");

		assert_eq!(err, CredentialBuilderError::MissingSecret);

		let err = Credential::builder()
			.secret("value")
			.build()
			.expect_err("Missing expiry must be rejected.");

		assert_eq!(err, CredentialBuilderError::MissingExpiry);
	}

	#[test]
	fn debug_output_redacts_secret() {
		let credential = Credential::builder()
			.secret("very-secret")
			.expires_in(Duration::minutes(1))
			.build()
			.expect("Credential fixture should build.");

		assert!(!format!("{credential:?}").contains("very-secret"));
	}
}
