//! Auth-domain identifiers, credential models, and platform wire payloads.

pub mod id;
pub mod token;

pub use id::*;
pub use token::{credential::*, payload::*, secret::*};
