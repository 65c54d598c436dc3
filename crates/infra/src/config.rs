use agenda_domain::Tz;
use std::{collections::HashMap, str::FromStr};
use tracing::warn;

const DEFAULT_PORT: usize = 5000;
const DEFAULT_FROM_EMAIL: &str = "no-reply@agenda.local";
const DEFAULT_REMINDERS_JOB_INTERVAL_SECS: u64 = 60;

/// Which transport outgoing emails are handed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailBackend {
    /// Writes the emails to the log
    Console,
    /// Keeps the emails in memory, used by tests
    Memory,
    /// Posts the emails to an HTTP relay
    Http,
}

impl FromStr for EmailBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "console" => Ok(Self::Console),
            "memory" => Ok(Self::Memory),
            "http" => Ok(Self::Http),
            other => Err(format!("Unknown email backend: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Postgres connection string. The in-memory storage is used when unset.
    pub database_url: Option<String>,
    /// Time zone used for all-day normalization, date filters, form inputs
    /// and the times shown in emails and ICS exports
    pub time_zone: Tz,
    pub email_backend: EmailBackend,
    /// Sender address of reminder emails
    pub default_from_email: String,
    pub email_relay_url: Option<String>,
    pub email_relay_key: Option<String>,
    pub cors_allowed_origins: Vec<String>,
    /// Seconds between two passes of the due reminders job
    pub reminders_job_interval_secs: u64,
}

impl Config {
    pub fn new() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_vars(vars: &HashMap<String, String>) -> Self {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = parse_or_default("PORT", lookup("PORT"), DEFAULT_PORT);
        let time_zone = parse_or_default("TIME_ZONE", lookup("TIME_ZONE"), Tz::UTC);
        let email_backend =
            parse_or_default("EMAIL_BACKEND", lookup("EMAIL_BACKEND"), EmailBackend::Console);
        let reminders_job_interval_secs = match parse_or_default(
            "REMINDERS_JOB_INTERVAL_SECS",
            lookup("REMINDERS_JOB_INTERVAL_SECS"),
            DEFAULT_REMINDERS_JOB_INTERVAL_SECS,
        ) {
            0 => {
                warn!("REMINDERS_JOB_INTERVAL_SECS can not be zero, falling back to the default.");
                DEFAULT_REMINDERS_JOB_INTERVAL_SECS
            }
            secs => secs,
        };
        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Self {
            port,
            database_url: lookup("DATABASE_URL"),
            time_zone,
            email_backend,
            default_from_email: lookup("DEFAULT_FROM_EMAIL")
                .unwrap_or_else(|| DEFAULT_FROM_EMAIL.to_string()),
            email_relay_url: lookup("EMAIL_RELAY_URL"),
            email_relay_key: lookup("EMAIL_RELAY_KEY"),
            cors_allowed_origins,
            reminders_job_interval_secs,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_or_default<T: FromStr + std::fmt::Debug>(
    key: &str,
    value: Option<String>,
    default: T,
) -> T {
    match value {
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(
                    "The given {}: {} is not valid, falling back to the default: {:?}.",
                    key, value, default
                );
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn it_uses_defaults_when_nothing_is_set() {
        let config = Config::from_vars(&HashMap::new());
        assert_eq!(config.port, 5000);
        assert_eq!(config.time_zone, Tz::UTC);
        assert_eq!(config.email_backend, EmailBackend::Console);
        assert_eq!(config.default_from_email, "no-reply@agenda.local");
        assert_eq!(config.reminders_job_interval_secs, 60);
        assert!(config.database_url.is_none());
        assert!(config.cors_allowed_origins.is_empty());
    }

    #[test]
    fn it_reads_given_values() {
        let config = Config::from_vars(&vars(&[
            ("PORT", "8080"),
            ("TIME_ZONE", "America/Sao_Paulo"),
            ("EMAIL_BACKEND", "HTTP"),
            ("EMAIL_RELAY_URL", "https://relay.example.com/send"),
            ("DATABASE_URL", "postgres://localhost/agenda"),
            ("CORS_ALLOWED_ORIGINS", "http://a.com, http://b.com,"),
            ("REMINDERS_JOB_INTERVAL_SECS", "30"),
        ]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.time_zone, Tz::America__Sao_Paulo);
        assert_eq!(config.email_backend, EmailBackend::Http);
        assert_eq!(
            config.email_relay_url.as_deref(),
            Some("https://relay.example.com/send")
        );
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/agenda")
        );
        assert_eq!(config.cors_allowed_origins, vec!["http://a.com", "http://b.com"]);
        assert_eq!(config.reminders_job_interval_secs, 30);
    }

    #[test]
    fn it_falls_back_on_invalid_values() {
        let config = Config::from_vars(&vars(&[
            ("PORT", "not-a-port"),
            ("TIME_ZONE", "Mars/Olympus"),
            ("EMAIL_BACKEND", "pigeon"),
            ("REMINDERS_JOB_INTERVAL_SECS", "0"),
            ("DATABASE_URL", "  "),
        ]));
        assert_eq!(config.port, 5000);
        assert_eq!(config.time_zone, Tz::UTC);
        assert_eq!(config.email_backend, EmailBackend::Console);
        assert_eq!(config.reminders_job_interval_secs, 60);
        assert!(config.database_url.is_none());
    }
}
