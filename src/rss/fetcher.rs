//! Feed fetcher with SSRF protection and resource limits.

use std::net::IpAddr;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use reqwest::Client;
use tracing::debug;

use crate::config::IngestionConfig;
use crate::{Result, VukaError};

/// User agent string for feed fetching.
const USER_AGENT: &str = concat!("Vuka/", env!("CARGO_PKG_VERSION"), " (RSS ingestion)");

/// Hostname suffixes that never resolve to public sites.
const FORBIDDEN_SUFFIXES: &[&str] = &[
    ".local",
    ".localhost",
    ".internal",
    ".intranet",
    ".corp",
    ".home",
    ".lan",
];

/// HTTP client for downloading feed documents.
///
/// One fetcher is shared by every ingestion run; the underlying
/// `reqwest::Client` pools connections.
#[derive(Clone)]
pub struct FeedFetcher {
    client: Client,
    max_size: u64,
    allow_private_networks: bool,
}

impl FeedFetcher {
    /// Create a fetcher from the ingestion settings.
    pub fn new(config: &IngestionConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .read_timeout(Duration::from_secs(config.read_timeout_secs))
            .timeout(Duration::from_secs(config.total_timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| VukaError::Fetch(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_size: config.max_feed_size_bytes,
            allow_private_networks: config.allow_private_networks,
        })
    }

    /// Download the raw feed document at `url`.
    ///
    /// Fails with [`VukaError::Fetch`] on a rejected URL, network error,
    /// timeout, non-2xx status or a body larger than the configured limit.
    pub async fn fetch(&self, url: &str) -> Result<Bytes> {
        validate_url(url, self.allow_private_networks)?;

        debug!(feed_url = %url, "fetching feed");

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| VukaError::Fetch(format!("failed to fetch feed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VukaError::Fetch(format!("HTTP error: {}", status)));
        }

        if let Some(content_length) = response.content_length() {
            if content_length > self.max_size {
                return Err(self.too_large(content_length));
            }
        }

        // Content-Length may be absent or wrong, so enforce the limit while reading
        let mut body = BytesMut::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| VukaError::Fetch(format!("failed to read response: {}", e)))?
        {
            let size = (body.len() + chunk.len()) as u64;
            if size > self.max_size {
                return Err(self.too_large(size));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(body.freeze())
    }

    fn too_large(&self, size: u64) -> VukaError {
        VukaError::Fetch(format!(
            "feed too large: {} bytes (max {} bytes)",
            size, self.max_size
        ))
    }
}

/// Validate a feed URL before fetching it.
///
/// The scheme must be http or https. Unless `allow_private` is set, hosts on
/// loopback, private or link-local networks are rejected, as are hostnames
/// such as `localhost` or `*.internal`.
pub fn validate_url(url: &str, allow_private: bool) -> Result<()> {
    let parsed = url::Url::parse(url).map_err(|e| VukaError::Fetch(format!("invalid URL: {}", e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(VukaError::Fetch(format!(
                "unsupported URL scheme: {}",
                scheme
            )));
        }
    }

    let host = parsed
        .host()
        .ok_or_else(|| VukaError::Fetch("URL has no host".to_string()))?;

    if allow_private {
        return Ok(());
    }

    let ip = match host {
        url::Host::Domain(domain) => {
            if is_forbidden_hostname(domain) {
                return Err(VukaError::Fetch(format!("forbidden host: {}", domain)));
            }
            return Ok(());
        }
        url::Host::Ipv4(ipv4) => IpAddr::V4(ipv4),
        url::Host::Ipv6(ipv6) => IpAddr::V6(ipv6),
    };

    if is_private_ip(&ip) {
        return Err(VukaError::Fetch(format!(
            "private IP address not allowed: {}",
            ip
        )));
    }

    Ok(())
}

fn is_forbidden_hostname(host: &str) -> bool {
    let host = host.to_lowercase();
    host == "localhost" || FORBIDDEN_SUFFIXES.iter().any(|suffix| host.ends_with(suffix))
}

fn is_private_ip(ip: &IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => {
            let [a, b, c, _] = ipv4.octets();
            ipv4.is_loopback()
                || ipv4.is_private()
                || ipv4.is_link_local()
                || ipv4.is_broadcast()
                || ipv4.is_unspecified()
                || matches!((a, b, c), (192, 0, 2) | (198, 51, 100) | (203, 0, 113))
        }
        IpAddr::V6(ipv6) => {
            let first = ipv6.segments()[0];
            ipv6.is_loopback()
                || ipv6.is_unspecified()
                || (first & 0xfe00) == 0xfc00 // unique local
                || (first & 0xffc0) == 0xfe80 // link-local
        }
    }
}
