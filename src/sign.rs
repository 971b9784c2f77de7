//! Signature helpers for the JS-SDK handshake.
//!
//! The client SDK verifies a config by rebuilding the canonical string and hashing it with
//! SHA-1, so parameter order, casing, and the absence of URL encoding are part of the wire
//! contract.

// crates.io
use sha1::{Digest, Sha1};

/// Returns the lowercase hex SHA-1 digest of `input`.
pub fn digest(input: &str) -> String {
	hex::encode(Sha1::digest(input.as_bytes()))
}

/// Sorts `key=value` pairs by key, joins them with `&`, and digests the result.
pub fn sorted_digest<'a, I>(params: I) -> String
where
	I: IntoIterator<Item = (&'a str, &'a str)>,
{
	let mut pairs = params.into_iter().collect::<Vec<_>>();

	pairs.sort_by(|a, b| a.0.cmp(b.0));

	let canonical =
		pairs.into_iter().map(|(key, value)| format!("{key}={value}")).collect::<Vec<_>>();

	digest(&canonical.join("&"))
}

/// Builds `jsapi_ticket=..&noncestr=..&timestamp=..&url=..` in the order the SDK expects.
pub fn js_canonical_string(ticket: &str, nonce: &str, timestamp: i64, url: &str) -> String {
	format!("jsapi_ticket={ticket}&noncestr={nonce}&timestamp={timestamp}&url={url}")
}

/// Signs a JS-SDK config.
pub fn js_signature(ticket: &str, nonce: &str, timestamp: i64, url: &str) -> String {
	digest(&js_canonical_string(ticket, nonce, timestamp, url))
}
