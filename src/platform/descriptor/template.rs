// crates.io
use url::form_urlencoded;
// self
use crate::{_prelude::*, auth::TenantId, error::ConfigError, platform::PlatformDescriptorError};

/// Token URL template with `{tenant}` and `{secret}` placeholders.
///
/// Values are form-urlencoded on substitution; the template owner decides which query parameters carry
/// them (`corpid`/`corpsecret`, `appid`/`secret`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TokenUrlTemplate(String);
impl TokenUrlTemplate {
	/// Placeholder replaced with the tenant identifier.
	pub const TENANT: &'static str = "{tenant}";
	/// Placeholder replaced with the app secret.
	pub const SECRET: &'static str = "{secret}";

	/// Validates and wraps a template.
	pub fn new(template: impl Into<String>) -> Result<Self, PlatformDescriptorError> {
		let template = template.into();

		for placeholder in [Self::TENANT, Self::SECRET] {
			if !template.contains(placeholder) {
				return Err(PlatformDescriptorError::MissingPlaceholder { placeholder });
			}
		}

		Ok(Self(template))
	}

	/// Returns the raw template.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Substitutes the placeholders and parses the result.
	///
	/// Both values are form-urlencoded before substitution, so reserved characters in a secret
	/// (`&`, `#`, `+`, ...) stay inside their query parameter.
	pub fn render(&self, tenant: &TenantId, secret: &str) -> Result<Url> {
		let rendered =
			self.0.replace(Self::TENANT, &encode(tenant)).replace(Self::SECRET, &encode(secret));

		Url::parse(&rendered)
			.map_err(|source| ConfigError::InvalidEndpoint { endpoint: "token", source }.into())
	}
}
impl TryFrom<String> for TokenUrlTemplate {
	type Error = PlatformDescriptorError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}
impl From<TokenUrlTemplate> for String {
	fn from(value: TokenUrlTemplate) -> Self {
		value.0
	}
}
impl Display for TokenUrlTemplate {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}

fn encode(value: &str) -> String {
	form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
