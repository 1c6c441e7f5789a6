//! # cloudflare-ddns
//!
//! Points Cloudflare DNS records at the machine's current public IP.
//!
//! ## Flow
//!
//! 1. Fetch the public IP once from a plain-text echo endpoint.
//! 2. For each domain in a comma separated list, derive the zone from the
//!    last two labels, look up the zone id, fetch the single matching record
//!    and overwrite its content with the IP.
//! 3. Stop at the first domain that fails.
//!
//! ## Usage
//!
//! ```bash
//! # Scoped API token
//! cloudflare-ddns --token "$CF_API_TOKEN" --domain home.example.com,vpn.example.com
//!
//! # Global API key
//! cloudflare-ddns --key "$CF_API_KEY" --email me@example.com --domain home.example.com
//! ```

pub mod config;
pub mod detector;
pub mod error;
pub mod logging;
pub mod providers;
pub mod updater;
pub mod zone;

pub use config::Config;
pub use detector::IpDetector;
pub use error::{DdnsError, Result};
pub use updater::DomainUpdater;
