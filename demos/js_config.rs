//! Demonstrates building a signed JS-SDK config with the default reqwest transport against a
//! mocked WeCom-style platform.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use jssdk_broker::{
	auth::{PlatformId, TenantId},
	flows::ReqwestBroker,
	http::ReqwestHttpClient,
	platform::{PlatformDescriptor, TokenUrlTemplate},
	reqwest::Client,
	url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/cgi-bin/gettoken");
			then.status(200).header("content-type", "application/json").body(
				"{\"errcode\":0,\"errmsg\":\"ok\",\"access_token\":\"demo-token\",\"expires_in\":7200}",
			);
		})
		.await;
	let ticket_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/cgi-bin/get_jsapi_ticket");
			then.status(200).header("content-type", "application/json").body(
				"{\"errcode\":0,\"errmsg\":\"ok\",\"ticket\":\"demo-ticket\",\"expires_in\":7200}",
			);
		})
		.await;
	let base = format!("https://{}", server.address());
	let descriptor = PlatformDescriptor::builder(PlatformId::new("demo-wecom")?)
		.token_url_template(TokenUrlTemplate::new(format!(
			"{base}/cgi-bin/gettoken?corpid={{tenant}}&corpsecret={{secret}}"
		))?)
		.ticket_endpoint(Url::parse(&format!("{base}/cgi-bin/get_jsapi_ticket"))?)
		.build()?;
	let http_client = ReqwestHttpClient::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let broker = ReqwestBroker::with_http_client(
		descriptor,
		TenantId::new("ww-demo-corp")?,
		"demo-secret",
		http_client,
	)
	.with_agent_id(1_000_002);
	let config = broker.js_config("https://app.example.com/scan").await?;

	println!("{}", serde_json::to_string_pretty(&config)?);

	// The second config reuses both cached credentials.
	broker.js_config("https://app.example.com/scan").await?;
	token_mock.assert_calls_async(1).await;
	ticket_mock.assert_calls_async(1).await;

	Ok(())
}
