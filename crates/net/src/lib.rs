#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Network operations for papermc
//!
//! This crate handles all HTTP traffic: the metadata API client behind the
//! [`MetadataSource`] trait and the verified artifact download.

mod client;
mod download;
mod fill;

pub use client::{NetClient, NetConfig};
pub use download::fetch;
pub use fill::{FillClient, MetadataSource};

use papermc_errors::{Error, NetworkError};
use url::Url;

/// Parse and validate a URL
///
/// # Errors
///
/// Returns an error if the URL string is malformed or invalid according to RFC 3986.
pub fn parse_url(url: &str) -> Result<Url, Error> {
    Url::parse(url).map_err(|e| NetworkError::InvalidUrl(e.to_string()).into())
}
