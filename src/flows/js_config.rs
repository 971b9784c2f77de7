//! Signed JS-SDK configuration payloads.

// crates.io
use rand::{Rng, distr::Alphanumeric};
// self
use crate::{
	_prelude::*,
	flows::Broker,
	http::JsonHttpClient,
	obs::{self, CredentialKind},
	sign,
};

/// Configuration handed to the client-side JS-SDK handshake.
///
/// Serializes with the field names the SDK expects (`appId`, `nonceStr`, `jsApiList`, ...).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsConfig {
	/// Enables beta APIs on the client.
	pub beta: bool,
	/// Enables SDK debug mode on the client.
	pub debug: bool,
	/// Tenant id (corp id / app id).
	#[serde(rename = "appId")]
	pub app_id: String,
	/// Unix timestamp, in seconds, covered by the signature.
	pub timestamp: i64,
	/// Nonce covered by the signature.
	#[serde(rename = "nonceStr")]
	pub nonce_str: String,
	/// Lowercase hex SHA-1 signature.
	pub signature: String,
	/// APIs the page asks permission for.
	#[serde(rename = "jsApiList")]
	pub js_api_list: Vec<String>,
	/// Page URL the signature was computed for.
	#[serde(rename = "jsurl")]
	pub url: String,
	/// Sub-application id.
	#[serde(rename = "jsapp")]
	pub agent_id: i64,
}

/// Nonce strategy used when signing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nonce {
	/// Same nonce for every config.
	Fixed(String),
	/// Fresh alphanumeric nonce of `len` characters per config.
	Random {
		/// Nonce length.
		len: usize,
	},
}
impl Nonce {
	/// Produces the nonce for one config.
	pub fn generate(&self) -> String {
		match self {
			Self::Fixed(value) => value.clone(),
			Self::Random { len } =>
				rand::rng().sample_iter(Alphanumeric).take(*len).map(char::from).collect(),
		}
	}
}
impl Default for Nonce {
	fn default() -> Self {
		Self::Fixed("esap".into())
	}
}

/// Defaults applied by [`Broker::js_config`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsConfigOptions {
	/// Value of [`JsConfig::beta`].
	pub beta: bool,
	/// Value of [`JsConfig::debug`].
	pub debug: bool,
	/// Nonce strategy.
	pub nonce: Nonce,
	/// Value of [`JsConfig::js_api_list`].
	pub js_api_list: Vec<String>,
}
impl JsConfigOptions {
	/// Toggles SDK debug mode.
	pub fn with_debug(mut self, debug: bool) -> Self {
		self.debug = debug;

		self
	}

	/// Toggles beta APIs.
	pub fn with_beta(mut self, beta: bool) -> Self {
		self.beta = beta;

		self
	}

	/// Replaces the nonce strategy.
	pub fn with_nonce(mut self, nonce: Nonce) -> Self {
		self.nonce = nonce;

		self
	}

	/// Replaces the requested API list.
	pub fn with_js_api_list<I, S>(mut self, apis: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.js_api_list = apis.into_iter().map(Into::into).collect();

		self
	}
}
impl Default for JsConfigOptions {
	fn default() -> Self {
		Self {
			beta: true,
			debug: false,
			nonce: Nonce::default(),
			js_api_list: vec!["scanQRCode".into()],
		}
	}
}

impl<C> Broker<C>
where
	C: ?Sized + JsonHttpClient,
{
	/// Builds a signed [`JsConfig`] for `url` at the current time.
	pub async fn js_config(&self, url: &str) -> Result<JsConfig> {
		self.js_config_at(url, OffsetDateTime::now_utc().unix_timestamp()).await
	}

	/// Builds a signed [`JsConfig`] for `url` at `timestamp` (unix seconds).
	///
	/// The URL is signed exactly as given, without normalization or encoding.
	pub async fn js_config_at(&self, url: &str, timestamp: i64) -> Result<JsConfig> {
		let ticket = self.ticket().await?;

		Ok(self.sign_js_config(&ticket, url, timestamp))
	}

	/// Best-effort variant of [`Broker::js_config`].
	///
	/// When the ticket cannot be refreshed, the config is signed with the stale cached ticket;
	/// the platform usually still accepts it because its own ticket lifetime outlasts the local
	/// one. Fails only when no ticket was ever cached.
	pub async fn js_config_or_stale(&self, url: &str) -> Result<JsConfig> {
		self.js_config_or_stale_at(url, OffsetDateTime::now_utc().unix_timestamp()).await
	}

	/// Best-effort variant of [`Broker::js_config_at`].
	pub async fn js_config_or_stale_at(&self, url: &str, timestamp: i64) -> Result<JsConfig> {
		let ticket = match self.ticket().await {
			Ok(ticket) => ticket,
			Err(err) => match self.cached_ticket() {
				Some(stale) => {
					obs::log_degraded_read(CredentialKind::Ticket, &self.tenant, &err);

					stale.secret.expose().to_owned()
				},
				None => return Err(err),
			},
		};

		Ok(self.sign_js_config(&ticket, url, timestamp))
	}

	fn sign_js_config(&self, ticket: &str, url: &str, timestamp: i64) -> JsConfig {
		let options = &self.js_config_options;
		let nonce_str = options.nonce.generate();
		let signature = sign::js_signature(ticket, &nonce_str, timestamp, url);

		JsConfig {
			beta: options.beta,
			debug: options.debug,
			app_id: self.tenant.to_string(),
			timestamp,
			nonce_str,
			signature,
			js_api_list: options.js_api_list.clone(),
			url: url.to_owned(),
			agent_id: self.agent_id,
		}
	}
}
