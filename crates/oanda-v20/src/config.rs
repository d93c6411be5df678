//! Client configuration.

use std::str::FromStr;
use std::time::Duration;

use crate::error::Error;
use crate::stream::StreamConfig;

/// Trading environment for the v20 API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Demo accounts (fxTrade Practice).
    Practice,
    /// Real-money accounts (fxTrade).
    Live,
}

impl Environment {
    /// Base URL for the REST API.
    #[must_use]
    pub const fn rest_base_url(&self) -> &'static str {
        match self {
            Self::Practice => "https://api-fxpractice.oanda.com",
            Self::Live => "https://api-fxtrade.oanda.com",
        }
    }

    /// Base URL for the streaming API.
    #[must_use]
    pub const fn stream_base_url(&self) -> &'static str {
        match self {
            Self::Practice => "https://stream-fxpractice.oanda.com",
            Self::Live => "https://stream-fxtrade.oanda.com",
        }
    }

    /// Check if this is the live environment.
    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Practice => write!(f, "practice"),
            Self::Live => write!(f, "live"),
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "practice" => Ok(Self::Practice),
            "live" => Ok(Self::Live),
            other => Err(Error::Configuration {
                message: format!("unknown environment '{other}', expected 'practice' or 'live'"),
            }),
        }
    }
}

/// Datetime representation requested from the API via the
/// `Accept-Datetime-Format` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatetimeFormat {
    /// Seconds since the epoch, with fractional part.
    #[default]
    Unix,
    /// RFC 3339 timestamps.
    Rfc3339,
}

impl DatetimeFormat {
    /// The header value the API expects.
    #[must_use]
    pub const fn header_value(&self) -> &'static str {
        match self {
            Self::Unix => "UNIX",
            Self::Rfc3339 => "RFC3339",
        }
    }
}

/// Configuration for a [`Context`](crate::Context).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer token authorizing the session.
    pub token: String,
    /// Trading environment.
    pub environment: Environment,
    /// Datetime representation for response timestamps.
    pub datetime_format: DatetimeFormat,
    /// Per-request timeout for single-shot calls. Streaming requests are
    /// open-ended and not bound by it.
    pub timeout: Duration,
    /// Streaming reader settings.
    pub stream: StreamConfig,
    /// REST base URL override, for tests and private deployments.
    pub rest_url_override: Option<String>,
    /// Streaming base URL override.
    pub stream_url_override: Option<String>,
}

impl ClientConfig {
    /// Create a configuration with default timeout and stream settings.
    #[must_use]
    pub fn new(token: impl Into<String>, environment: Environment) -> Self {
        Self {
            token: token.into(),
            environment,
            datetime_format: DatetimeFormat::default(),
            timeout: Duration::from_secs(30),
            stream: StreamConfig::default(),
            rest_url_override: None,
            stream_url_override: None,
        }
    }

    /// Set the single-shot request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the datetime representation.
    #[must_use]
    pub const fn with_datetime_format(mut self, format: DatetimeFormat) -> Self {
        self.datetime_format = format;
        self
    }

    /// Set the streaming reader settings.
    #[must_use]
    pub fn with_stream(mut self, stream: StreamConfig) -> Self {
        self.stream = stream;
        self
    }

    /// Override the REST base URL.
    #[must_use]
    pub fn with_rest_url(mut self, url: impl Into<String>) -> Self {
        self.rest_url_override = Some(url.into());
        self
    }

    /// Override the streaming base URL.
    #[must_use]
    pub fn with_stream_url(mut self, url: impl Into<String>) -> Self {
        self.stream_url_override = Some(url.into());
        self
    }

    /// The effective REST base URL.
    pub(crate) fn resolved_rest_url(&self) -> String {
        self.rest_url_override
            .clone()
            .unwrap_or_else(|| self.environment.rest_base_url().to_string())
    }

    /// The effective streaming base URL.
    pub(crate) fn resolved_stream_url(&self) -> String {
        self.stream_url_override
            .clone()
            .unwrap_or_else(|| self.environment.stream_base_url().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn practice_environment_urls() {
        let env = Environment::Practice;
        assert!(env.rest_base_url().contains("fxpractice"));
        assert!(env.stream_base_url().contains("stream-fxpractice"));
        assert!(!env.is_live());
    }

    #[test]
    fn live_environment_urls() {
        let env = Environment::Live;
        assert!(env.rest_base_url().contains("fxtrade"));
        assert!(env.stream_base_url().contains("stream-fxtrade"));
        assert!(env.is_live());
    }

    #[test]
    fn environment_from_str() {
        assert_eq!("practice".parse::<Environment>().unwrap(), Environment::Practice);
        assert_eq!("LIVE".parse::<Environment>().unwrap(), Environment::Live);
        assert!(matches!(
            "staging".parse::<Environment>(),
            Err(Error::Configuration { .. })
        ));
    }

    #[test]
    fn environment_display() {
        assert_eq!(format!("{}", Environment::Practice), "practice");
        assert_eq!(format!("{}", Environment::Live), "live");
    }

    #[test]
    fn datetime_format_header_values() {
        assert_eq!(DatetimeFormat::Unix.header_value(), "UNIX");
        assert_eq!(DatetimeFormat::Rfc3339.header_value(), "RFC3339");
    }

    #[test]
    fn config_defaults() {
        let config = ClientConfig::new("token", Environment::Practice);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.datetime_format, DatetimeFormat::Unix);
        assert_eq!(config.resolved_rest_url(), "https://api-fxpractice.oanda.com");
    }

    #[test]
    fn config_url_overrides() {
        let config = ClientConfig::new("token", Environment::Practice)
            .with_rest_url("http://localhost:9000")
            .with_stream_url("http://localhost:9001");
        assert_eq!(config.resolved_rest_url(), "http://localhost:9000");
        assert_eq!(config.resolved_stream_url(), "http://localhost:9001");
    }

    #[test]
    fn config_with_timeout() {
        let config = ClientConfig::new("token", Environment::Live)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
