mod mailer;

pub use mailer::{
    create_mailer, ConsoleMailer, EmailMessage, HttpRelayMailer, IMailer, InMemoryMailer,
};
