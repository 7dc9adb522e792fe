//! Server configuration from the environment

use anyhow::{Context, bail};
use auth::{AuthConfig, TwilioOptions};
use std::env;
use std::time::Duration;

const DEFAULT_PORT: u16 = 8800;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
/// Upper bound for token and pending-signup TTLs (100 years)
const MAX_TTL_SECS: u64 = 100 * 365 * 24 * 60 * 60;

/// Which OTP backend serves the process
#[derive(Debug)]
pub enum OtpBackend {
    Twilio(TwilioOptions),
    Mock,
}

#[derive(Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub port: u16,
    pub frontend_origins: String,
    pub otp: OtpBackend,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| -> anyhow::Result<String> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{key} must be set in environment"))
        };
        let seconds = |key: &str| -> anyhow::Result<Option<Duration>> {
            lookup(key)
                .map(|v| {
                    v.trim()
                        .parse::<u64>()
                        .map(Duration::from_secs)
                        .with_context(|| format!("{key} must be a whole number of seconds"))
                })
                .transpose()
        };
        let ttl = |key: &str| -> anyhow::Result<Option<Duration>> {
            let ttl = seconds(key)?;
            if ttl.is_some_and(|ttl| ttl.as_secs() > MAX_TTL_SECS) {
                bail!("{key} must be at most {MAX_TTL_SECS} seconds");
            }
            Ok(ttl)
        };

        let database_url = required("DATABASE_URL")?;
        let token_secret = required("JWT_SECRET")?;

        let port = match lookup("PORT") {
            Some(port) => port.trim().parse().context("PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };

        let frontend_origins =
            lookup("FRONTEND_ORIGINS").unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string());

        let otp = if lookup("MOCK_TWILIO").as_deref() == Some("true") {
            OtpBackend::Mock
        } else {
            OtpBackend::Twilio(TwilioOptions {
                account_sid: required("TWILIO_SID")?,
                auth_token: required("TWILIO_AUTH_TOKEN")?,
                verify_service_sid: required("TWILIO_VERIFY_SID")?,
            })
        };

        let defaults = AuthConfig::default();
        let otp_timeout = seconds("OTP_TIMEOUT_SECS")?.unwrap_or(defaults.otp_timeout);
        if otp_timeout.is_zero() {
            bail!("OTP_TIMEOUT_SECS must be greater than zero");
        }

        let auth = AuthConfig {
            token_secret: token_secret.into_bytes(),
            token_ttl: ttl("TOKEN_TTL_SECS")?,
            otp_timeout,
            phone_country_code: lookup("OTP_COUNTRY_CODE").unwrap_or(defaults.phone_country_code),
            pending_signup_ttl: ttl("PENDING_SIGNUP_TTL_SECS")?,
        };

        Ok(Self {
            database_url,
            port,
            frontend_origins,
            otp,
            auth,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    const BASE: [(&str, &str); 3] = [
        ("DATABASE_URL", "postgres://localhost/app"),
        ("JWT_SECRET", "dev-secret"),
        ("MOCK_TWILIO", "true"),
    ];

    #[test]
    fn test_mock_defaults() {
        let config = load(&BASE).unwrap();
        assert_eq!(config.port, 8800);
        assert!(matches!(config.otp, OtpBackend::Mock));
        assert_eq!(config.auth.phone_country_code, "+91");
        assert_eq!(config.auth.otp_timeout, Duration::from_secs(10));
        assert!(config.auth.token_ttl.is_none());
        assert_eq!(config.auth.token_secret, b"dev-secret");
    }

    #[test]
    fn test_secret_required() {
        let err = load(&[("DATABASE_URL", "postgres://localhost/app"), ("MOCK_TWILIO", "true")])
            .unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));

        let err = load(&[
            ("DATABASE_URL", "postgres://localhost/app"),
            ("JWT_SECRET", ""),
            ("MOCK_TWILIO", "true"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn test_twilio_credentials_required_without_mock() {
        let err = load(&[
            ("DATABASE_URL", "postgres://localhost/app"),
            ("JWT_SECRET", "dev-secret"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("TWILIO_SID"));

        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/app"),
            ("JWT_SECRET", "dev-secret"),
            ("MOCK_TWILIO", "false"),
            ("TWILIO_SID", "AC1"),
            ("TWILIO_AUTH_TOKEN", "tok"),
            ("TWILIO_VERIFY_SID", "VA1"),
        ])
        .unwrap();
        assert!(matches!(config.otp, OtpBackend::Twilio(ref o) if o.verify_service_sid == "VA1"));
    }

    #[test]
    fn test_optional_ttls() {
        let mut vars = BASE.to_vec();
        vars.push(("TOKEN_TTL_SECS", "3600"));
        vars.push(("PENDING_SIGNUP_TTL_SECS", "600"));
        vars.push(("PORT", "9000"));
        let config = load(&vars).unwrap();
        assert_eq!(config.auth.token_ttl, Some(Duration::from_secs(3600)));
        assert_eq!(config.auth.pending_signup_ttl, Some(Duration::from_secs(600)));
        assert_eq!(config.port, 9000);

        let mut vars = BASE.to_vec();
        vars.push(("OTP_TIMEOUT_SECS", "soon"));
        assert!(load(&vars).is_err());
    }

    #[test]
    fn test_ttl_upper_bound() {
        for key in ["TOKEN_TTL_SECS", "PENDING_SIGNUP_TTL_SECS"] {
            let mut vars = BASE.to_vec();
            vars.push((key, "100000000000000"));
            let err = load(&vars).unwrap_err();
            assert!(err.to_string().contains(key), "{err}");

            let max = MAX_TTL_SECS.to_string();
            let mut vars = BASE.to_vec();
            vars.push((key, &max));
            assert!(load(&vars).is_ok());
        }
    }
}
