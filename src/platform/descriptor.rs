//! Platform descriptor data structures and helpers shared by all flows.

/// Builder API for assembling platform descriptors.
pub mod builder;
/// Token URL templates.
pub mod template;

pub use builder::*;
pub use template::*;

// self
use crate::{
	_prelude::*,
	auth::{PlatformId, TenantId, TokenSecret},
};

const WECOM_TOKEN: &str =
	"https://qyapi.weixin.qq.com/cgi-bin/gettoken?corpid={tenant}&corpsecret={secret}";
const WECOM_TICKET: &str = "https://qyapi.weixin.qq.com/cgi-bin/get_jsapi_ticket";
const OFFICIAL_ACCOUNT_TOKEN: &str =
	"https://api.weixin.qq.com/cgi-bin/token?grant_type=client_credential&appid={tenant}&secret={secret}";
const OFFICIAL_ACCOUNT_TICKET: &str = "https://api.weixin.qq.com/cgi-bin/ticket/getticket?type=jsapi";

/// Endpoint set declared by a platform descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformEndpoints {
	/// Token URL template carrying `{tenant}` and `{secret}` placeholders.
	pub token: TokenUrlTemplate,
	/// Ticket endpoint; the access token is appended as the `access_token` query parameter.
	pub ticket: Url,
}

/// Immutable platform descriptor consumed by brokers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformDescriptor {
	/// Descriptor identifier.
	pub id: PlatformId,
	/// Endpoint definitions exposed by the platform.
	pub endpoints: PlatformEndpoints,
	/// Local lifetime assigned to every fetched credential.
	///
	/// The platform-declared `expires_in` is ignored for refresh decisions so credentials are
	/// renewed well before the platform would reject them.
	pub credential_ttl: Duration,
}
impl PlatformDescriptor {
	/// Default local credential lifetime.
	pub const DEFAULT_CREDENTIAL_TTL: Duration = Duration::seconds(500);

	/// Creates a new builder for the provided identifier.
	pub fn builder(id: PlatformId) -> PlatformDescriptorBuilder {
		PlatformDescriptorBuilder::new(id)
	}

	/// WeCom (enterprise WeChat) endpoints.
	pub fn wecom() -> Result<Self, PlatformDescriptorError> {
		Self::preset("wecom", WECOM_TOKEN, WECOM_TICKET)
	}

	/// WeChat Official Account endpoints.
	pub fn official_account() -> Result<Self, PlatformDescriptorError> {
		Self::preset("official-account", OFFICIAL_ACCOUNT_TOKEN, OFFICIAL_ACCOUNT_TICKET)
	}

	fn preset(id: &str, token: &str, ticket: &str) -> Result<Self, PlatformDescriptorError> {
		let ticket = Url::parse(ticket)
			.map_err(|_| PlatformDescriptorError::InvalidTicketEndpoint { url: ticket.into() })?;

		Self::builder(PlatformId::new(id)?)
			.token_url_template(TokenUrlTemplate::new(token)?)
			.ticket_endpoint(ticket)
			.build()
	}

	/// Renders the token endpoint for `tenant` + `secret`.
	pub fn token_url(&self, tenant: &TenantId, secret: &TokenSecret) -> Result<Url> {
		self.endpoints.token.render(tenant, secret.expose())
	}

	/// Appends `access_token` to the ticket endpoint.
	pub fn ticket_url(&self, access_token: &str) -> Url {
		let mut url = self.endpoints.ticket.clone();

		url.query_pairs_mut().append_pair("access_token", access_token);

		url
	}
}
