use crate::config::{Config, EmailBackend};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{error, info};

/// A plain text email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

#[async_trait::async_trait]
pub trait IMailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()>;
}

/// Writes the emails to the log instead of sending them
pub struct ConsoleMailer {}

#[async_trait::async_trait]
impl IMailer for ConsoleMailer {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        info!(
            from = %message.from,
            to = ?message.to,
            subject = %message.subject,
            "Email:\n{}",
            message.body
        );
        Ok(())
    }
}

/// Keeps the sent emails in an outbox. Can be told to fail in order to
/// test failing deliveries.
#[derive(Default)]
pub struct InMemoryMailer {
    outbox: Mutex<Vec<EmailMessage>>,
    failure: Mutex<Option<String>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outbox(&self) -> Vec<EmailMessage> {
        self.outbox.lock().unwrap().clone()
    }

    /// Every following send fails with the given error until reset with `None`
    pub fn set_failure(&self, failure: Option<String>) {
        *self.failure.lock().unwrap() = failure;
    }
}

#[async_trait::async_trait]
impl IMailer for InMemoryMailer {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        if let Some(failure) = self.failure.lock().unwrap().clone() {
            anyhow::bail!(failure);
        }
        self.outbox.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Posts the emails as json to an HTTP mail relay
pub struct HttpRelayMailer {
    client: Client,
    url: String,
    key: Option<String>,
}

const RELAY_KEY_HEADER: &str = "x-relay-key";

impl HttpRelayMailer {
    pub fn new(url: String, key: Option<String>) -> anyhow::Result<Self> {
        reqwest::Url::parse(&url)?;
        Ok(Self {
            client: Client::new(),
            url,
            key,
        })
    }
}

#[async_trait::async_trait]
impl IMailer for HttpRelayMailer {
    async fn send(&self, message: &EmailMessage) -> anyhow::Result<()> {
        let mut req = self.client.post(&self.url).json(message);
        if let Some(key) = &self.key {
            req = req.header(RELAY_KEY_HEADER, key);
        }
        match req.send().await {
            Ok(res) => {
                res.error_for_status().map_err(|e| {
                    error!(
                        "[Unexpected Response] Mail relay POST error. Error message: {:?}",
                        e
                    );
                    anyhow::Error::new(e)
                })?;
                Ok(())
            }
            Err(e) => {
                error!("[Network Error] Mail relay POST error. Error message: {:?}", e);
                Err(anyhow::Error::new(e))
            }
        }
    }
}

/// Creates the mailer selected by `EMAIL_BACKEND`
pub fn create_mailer(config: &Config) -> anyhow::Result<Arc<dyn IMailer>> {
    let mailer: Arc<dyn IMailer> = match config.email_backend {
        EmailBackend::Console => Arc::new(ConsoleMailer {}),
        EmailBackend::Memory => Arc::new(InMemoryMailer::new()),
        EmailBackend::Http => {
            let url = config.email_relay_url.clone().ok_or_else(|| {
                anyhow::anyhow!("EMAIL_RELAY_URL must be set when EMAIL_BACKEND is http")
            })?;
            Arc::new(HttpRelayMailer::new(url, config.email_relay_key.clone())?)
        }
    };
    Ok(mailer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn message() -> EmailMessage {
        EmailMessage {
            from: "no-reply@agenda.local".into(),
            to: vec!["alice@example.com".into()],
            subject: "Reminder: Review".into(),
            body: "Hi".into(),
        }
    }

    #[tokio::test]
    async fn inmemory_mailer_keeps_outbox() {
        let mailer = InMemoryMailer::new();
        mailer.send(&message()).await.unwrap();
        assert_eq!(mailer.outbox(), vec![message()]);

        mailer.set_failure(Some("SMTP down".into()));
        let err = mailer.send(&message()).await.unwrap_err();
        assert_eq!(err.to_string(), "SMTP down");
        assert_eq!(mailer.outbox().len(), 1);

        mailer.set_failure(None);
        assert!(mailer.send(&message()).await.is_ok());
    }

    #[test]
    fn it_requires_relay_url_for_http_backend() {
        let mut vars = HashMap::new();
        vars.insert("EMAIL_BACKEND".to_string(), "http".to_string());
        assert!(create_mailer(&Config::from_vars(&vars)).is_err());

        vars.insert("EMAIL_RELAY_URL".to_string(), "not a url".to_string());
        assert!(create_mailer(&Config::from_vars(&vars)).is_err());

        vars.insert(
            "EMAIL_RELAY_URL".to_string(),
            "http://localhost:9000/send".to_string(),
        );
        assert!(create_mailer(&Config::from_vars(&vars)).is_ok());
    }

    #[test]
    fn it_serializes_messages_for_the_relay() {
        let json = serde_json::to_value(message()).unwrap();
        assert_eq!(json["subject"], "Reminder: Review");
        assert_eq!(json["to"][0], "alice@example.com");
    }
}
