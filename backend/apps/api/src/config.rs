//! Server Configuration
//!
//! Read once at startup from the process environment (after `.env` is
//! loaded).

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::config::{AuthConfig, MailFailurePolicy};
use blog::{BlogConfig, ListingPolicy, OwnershipPolicy};
use platform::crypto::{from_base64, random_secret};
use platform::mail::HttpMailerConfig;

const DEFAULT_PORT: u16 = 5000;

/// Everything `main` needs to start serving
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub templates_dir: PathBuf,
    pub static_dir: PathBuf,
    /// `None` when no mail API is configured
    pub mail: Option<HttpMailerConfig>,
    pub auth: AuthConfig,
    pub blog: BlogConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let port = match var("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port: {port}"))?,
            None => DEFAULT_PORT,
        };

        let session_secret = match var("SESSION_SECRET") {
            Some(encoded) => decode_secret(&encoded)?,
            None if cfg!(debug_assertions) => {
                tracing::warn!("SESSION_SECRET not set; using a random secret for this run");
                random_secret()
            }
            None => bail!("SESSION_SECRET must be set in production"),
        };

        let session_ttl = var("SESSION_TTL_SECS")
            .map(|secs| {
                secs.trim()
                    .parse()
                    .map(Duration::from_secs)
                    .with_context(|| format!("SESSION_TTL_SECS is not a number: {secs}"))
            })
            .transpose()?;

        let cookie_secure = flag(&var, "COOKIE_SECURE")?.unwrap_or(!cfg!(debug_assertions));

        let mail_failure_policy = if flag(&var, "KEEP_USER_ON_MAIL_FAILURE")?.unwrap_or(false) {
            MailFailurePolicy::KeepUser
        } else {
            MailFailurePolicy::RemoveUser
        };

        let auth = AuthConfig {
            session_secret,
            session_ttl,
            cookie_secure,
            public_base_url: var("PUBLIC_BASE_URL")
                .unwrap_or_else(|| format!("http://localhost:{port}")),
            mail_failure_policy,
            ..AuthConfig::default()
        };

        let blog = BlogConfig {
            listing_policy: if flag(&var, "PUBLIC_POSTS_ONLY")?.unwrap_or(false) {
                ListingPolicy::PublicOnly
            } else {
                ListingPolicy::All
            },
            ownership_policy: if flag(&var, "REQUIRE_POST_OWNERSHIP")?.unwrap_or(false) {
                OwnershipPolicy::OwnerOnly
            } else {
                OwnershipPolicy::Unchecked
            },
        };

        let mail = var("MAIL_API_URL").map(|api_url| HttpMailerConfig {
            api_url,
            username: var("MAIL_USERNAME"),
            password: var("MAIL_PASSWORD"),
            from: var("MAIL_FROM").unwrap_or_else(|| "no-reply@localhost".to_string()),
        });

        Ok(Self {
            database_url,
            port,
            templates_dir: var("TEMPLATES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| crate_dir("templates")),
            static_dir: var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| crate_dir("static")),
            mail,
            auth,
            blog,
        })
    }

    /// Glob matching every template under `templates_dir`
    pub fn templates_glob(&self) -> String {
        format!("{}/**/*.html", self.templates_dir.display())
    }
}

fn crate_dir(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(name)
}

fn decode_secret(encoded: &str) -> anyhow::Result<[u8; 32]> {
    let bytes = from_base64(encoded.trim()).context("SESSION_SECRET must be base64")?;

    <[u8; 32]>::try_from(bytes.as_slice())
        .map_err(|_| anyhow::anyhow!("SESSION_SECRET must decode to 32 bytes, got {}", bytes.len()))
}

fn flag(var: &impl Fn(&str) -> Option<String>, name: &str) -> anyhow::Result<Option<bool>> {
    let Some(value) = var(name) else {
        return Ok(None);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => bail!("{name} must be a boolean, got {value}"),
    }
}
