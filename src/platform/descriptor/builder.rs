// self
use crate::{
	_prelude::*,
	auth::{IdentifierError, PlatformId, TenantId},
	platform::{PlatformDescriptor, PlatformEndpoints, TokenUrlTemplate},
};

/// Errors raised while constructing or validating descriptors.
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum PlatformDescriptorError {
	/// Token URL template is mandatory.
	#[error("Missing token URL template.")]
	MissingTokenEndpoint,
	/// Ticket endpoint is mandatory.
	#[error("Missing ticket endpoint.")]
	MissingTicketEndpoint,
	/// Token URL template lacks a placeholder.
	#[error("Token URL template is missing the {placeholder} placeholder.")]
	MissingPlaceholder {
		/// Placeholder that was not found.
		placeholder: &'static str,
	},
	/// Token URL template does not render into a URL.
	#[error("Token URL template does not render into a valid URL: {template}.")]
	InvalidTokenTemplate {
		/// Template that failed validation.
		template: String,
	},
	/// Ticket endpoint is not a valid URL.
	#[error("Ticket endpoint is not a valid URL: {url}.")]
	InvalidTicketEndpoint {
		/// Endpoint that failed validation.
		url: String,
	},
	/// Endpoints must use HTTPS.
	#[error("The {endpoint} endpoint must use HTTPS: {url}.")]
	InsecureEndpoint {
		/// Which endpoint failed validation.
		endpoint: &'static str,
		/// Endpoint URL that failed validation.
		url: String,
	},
	/// Credential lifetime must be positive.
	#[error("Credential TTL must be positive.")]
	NonPositiveCredentialTtl,
	/// Descriptor identifier failed validation.
	#[error(transparent)]
	Identifier(#[from] IdentifierError),
}

/// Builder for [`PlatformDescriptor`] values.
#[derive(Debug)]
pub struct PlatformDescriptorBuilder {
	/// Identifier for the descriptor being constructed.
	pub id: PlatformId,
	/// Token URL template.
	pub token_url_template: Option<TokenUrlTemplate>,
	/// Ticket endpoint.
	pub ticket_endpoint: Option<Url>,
	/// Local lifetime assigned to fetched credentials.
	pub credential_ttl: Duration,
}
impl PlatformDescriptorBuilder {
	/// Creates a new builder seeded with the provided identifier.
	pub fn new(id: PlatformId) -> Self {
		Self {
			id,
			token_url_template: None,
			ticket_endpoint: None,
			credential_ttl: PlatformDescriptor::DEFAULT_CREDENTIAL_TTL,
		}
	}

	/// Sets the token URL template.
	pub fn token_url_template(mut self, template: TokenUrlTemplate) -> Self {
		self.token_url_template = Some(template);

		self
	}

	/// Sets the ticket endpoint.
	pub fn ticket_endpoint(mut self, url: Url) -> Self {
		self.ticket_endpoint = Some(url);

		self
	}

	/// Overrides the local credential lifetime (defaults to 500 seconds).
	pub fn credential_ttl(mut self, ttl: Duration) -> Self {
		self.credential_ttl = ttl;

		self
	}

	/// Consumes the builder and validates the resulting descriptor.
	pub fn build(self) -> Result<PlatformDescriptor, PlatformDescriptorError> {
		let token =
			self.token_url_template.ok_or(PlatformDescriptorError::MissingTokenEndpoint)?;
		let ticket = self.ticket_endpoint.ok_or(PlatformDescriptorError::MissingTicketEndpoint)?;
		let descriptor = PlatformDescriptor {
			id: self.id,
			endpoints: PlatformEndpoints { token, ticket },
			credential_ttl: self.credential_ttl,
		};

		descriptor.validate()?;

		Ok(descriptor)
	}
}

impl PlatformDescriptor {
	/// Validates invariants for the descriptor.
	fn validate(&self) -> Result<(), PlatformDescriptorError> {
		if !self.credential_ttl.is_positive() {
			return Err(PlatformDescriptorError::NonPositiveCredentialTtl);
		}

		let sample_tenant = TenantId::new("sample")?;
		let token = self.endpoints.token.render(&sample_tenant, "sample").map_err(|_| {
			PlatformDescriptorError::InvalidTokenTemplate {
				template: self.endpoints.token.to_string(),
			}
		})?;

		validate_endpoint("token", &token)?;
		validate_endpoint("ticket", &self.endpoints.ticket)?;

		Ok(())
	}
}

fn validate_endpoint(name: &'static str, url: &Url) -> Result<(), PlatformDescriptorError> {
	if url.scheme() != "https" {
		Err(PlatformDescriptorError::InsecureEndpoint { endpoint: name, url: url.to_string() })
	} else {
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn builder() -> PlatformDescriptorBuilder {
		PlatformDescriptor::builder(PlatformId::new("custom").expect("Platform id should be valid."))
	}

	fn template(raw: &str) -> TokenUrlTemplate {
		TokenUrlTemplate::new(raw).expect("Template fixture should be valid.")
	}

	fn url(raw: &str) -> Url {
		Url::parse(raw).expect("URL fixture should parse.")
	}

	#[test]
	fn builder_requires_both_endpoints() {
		assert_eq!(
			builder().ticket_endpoint(url("https://example.com/ticket")).build(),
			Err(PlatformDescriptorError::MissingTokenEndpoint)
		);
		assert_eq!(
			builder()
				.token_url_template(template("https://example.com/token?id={tenant}&s={secret}"))
				.build(),
			Err(PlatformDescriptorError::MissingTicketEndpoint)
		);
	}

	#[test]
	fn builder_rejects_plain_http_endpoints() {
		let err = builder()
			.token_url_template(template("http://example.com/token?id={tenant}&s={secret}"))
			.ticket_endpoint(url("https://example.com/ticket"))
			.build()
			.expect_err("Plain HTTP token endpoints must be rejected.");

		assert!(matches!(err, PlatformDescriptorError::InsecureEndpoint { endpoint: "token", .. }));

		let err = builder()
			.token_url_template(template("https://example.com/token?id={tenant}&s={secret}"))
			.ticket_endpoint(url("http://example.com/ticket"))
			.build()
			.expect_err("Plain HTTP ticket endpoints must be rejected.");

		assert!(matches!(
			err,
			PlatformDescriptorError::InsecureEndpoint { endpoint: "ticket", .. }
		));
	}

	#[test]
	fn builder_rejects_templates_that_do_not_render() {
		let err = builder()
			.token_url_template(template("{tenant}{secret}"))
			.ticket_endpoint(url("https://example.com/ticket"))
			.build()
			.expect_err("Unparseable templates must be rejected.");

		assert_eq!(
			err,
			PlatformDescriptorError::InvalidTokenTemplate { template: "{tenant}{secret}".into() }
		);
	}

	#[test]
	fn builder_validates_and_overrides_ttl() {
		let base = || {
			builder()
				.token_url_template(template("https://example.com/token?id={tenant}&s={secret}"))
				.ticket_endpoint(url("https://example.com/ticket"))
		};

		assert_eq!(
			base().credential_ttl(Duration::ZERO).build(),
			Err(PlatformDescriptorError::NonPositiveCredentialTtl)
		);

		let descriptor =
			base().credential_ttl(Duration::minutes(1)).build().expect("Descriptor should build.");

		assert_eq!(descriptor.credential_ttl, Duration::minutes(1));
		assert_eq!(descriptor.id.as_ref(), "custom");
	}
}
