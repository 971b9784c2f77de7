//! Shared fixtures for integration tests.

#![allow(dead_code)]

// crates.io
use parking_lot::Mutex;
use time::Duration;
// self
use jssdk_broker::{
	auth::{PlatformId, TenantId},
	error::TransportError,
	flows::Broker,
	http::{HttpFuture, HttpResponse, JsonHttpClient},
	platform::{PlatformDescriptor, TokenUrlTemplate},
	url::Url,
};

pub const TENANT: &str = "wx5823bf96";
pub const SECRET: &str = "corp-secret";
pub const TOKEN_PATH: &str = "/cgi-bin/gettoken";
pub const TICKET_PATH: &str = "/cgi-bin/get_jsapi_ticket";

type Responder = Box<dyn Fn(&str, usize) -> Result<HttpResponse, TransportError> + Send + Sync>;

/// Transport that answers by request path and the per-path call index (0-based).
pub struct ScriptedClient {
	responder: Responder,
	calls: Mutex<Vec<Url>>,
}
impl ScriptedClient {
	pub fn new<F>(responder: F) -> Self
	where
		F: 'static + Send + Sync + Fn(&str, usize) -> Result<HttpResponse, TransportError>,
	{
		Self { responder: Box::new(responder), calls: Mutex::new(Vec::new()) }
	}

	/// Answers every token call with `token` and every ticket call with `ticket`.
	pub fn healthy(token: &'static str, ticket: &'static str) -> Self {
		Self::new(move |path, _| match path {
			TOKEN_PATH => Ok(token_body(token)),
			TICKET_PATH => Ok(ticket_body(ticket)),
			other => panic!("Unexpected request path: {other}."),
		})
	}

	pub fn calls_to(&self, path: &str) -> usize {
		self.calls.lock().iter().filter(|url| url.path() == path).count()
	}

	pub fn urls(&self) -> Vec<Url> {
		self.calls.lock().clone()
	}
}
impl JsonHttpClient for ScriptedClient {
	fn get(&self, url: Url) -> HttpFuture<'_, HttpResponse> {
		let index = {
			let mut calls = self.calls.lock();
			let index = calls.iter().filter(|seen| seen.path() == url.path()).count();

			calls.push(url.clone());

			index
		};
		let response = (self.responder)(url.path(), index);

		Box::pin(async move {
			tokio::task::yield_now().await;

			response
		})
	}
}

pub fn tenant() -> TenantId {
	TenantId::new(TENANT).expect("Tenant fixture should be valid.")
}

pub fn token_body(token: &str) -> HttpResponse {
	HttpResponse::ok(format!(
		r#"{{"errcode":0,"errmsg":"ok","access_token":"{token}","expires_in":7200}}"#
	))
}

pub fn ticket_body(ticket: &str) -> HttpResponse {
	HttpResponse::ok(format!(r#"{{"errcode":0,"errmsg":"ok","ticket":"{ticket}","expires_in":7200}}"#))
}

pub fn error_body(code: i64, message: &str) -> HttpResponse {
	HttpResponse::ok(format!(r#"{{"errcode":{code},"errmsg":"{message}"}}"#))
}

pub fn network_failure() -> TransportError {
	TransportError::Io(std::io::Error::other("connection reset"))
}

/// WeCom-shaped descriptor with a custom local credential lifetime.
pub fn descriptor_with_ttl(ttl: Duration) -> PlatformDescriptor {
	PlatformDescriptor::builder(PlatformId::new("wecom-test").expect("Platform id should be valid."))
		.token_url_template(
			TokenUrlTemplate::new(
				"https://qyapi.weixin.qq.com/cgi-bin/gettoken?corpid={tenant}&corpsecret={secret}",
			)
			.expect("Token template should be valid."),
		)
		.ticket_endpoint(
			Url::parse("https://qyapi.weixin.qq.com/cgi-bin/get_jsapi_ticket")
				.expect("Ticket endpoint should parse."),
		)
		.credential_ttl(ttl)
		.build()
		.expect("Test descriptor should build.")
}

pub fn broker(client: &std::sync::Arc<ScriptedClient>) -> Broker<ScriptedClient> {
	Broker::with_http_client(
		PlatformDescriptor::wecom().expect("WeCom preset should build."),
		tenant(),
		SECRET,
		client.clone(),
	)
}

/// Broker whose credentials expire almost immediately.
pub fn short_lived_broker(client: &std::sync::Arc<ScriptedClient>) -> Broker<ScriptedClient> {
	Broker::with_http_client(
		descriptor_with_ttl(Duration::milliseconds(1)),
		tenant(),
		SECRET,
		client.clone(),
	)
}

/// Lets a short-lived credential pass its wall-clock expiry.
pub fn outlive_short_ttl() {
	std::thread::sleep(std::time::Duration::from_millis(20));
}
