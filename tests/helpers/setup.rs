use agenda_api::Application;
use agenda_infra::{AgendaContext, InMemoryMailer};
use agenda_sdk::AgendaSDK;
use std::sync::Arc;

pub struct TestApp {
    /// Shares the storage of the running application
    pub ctx: AgendaContext,
    pub mailer: Arc<InMemoryMailer>,
    pub address: String,
}

impl TestApp {
    /// Signs up a new user and returns a client authenticated as that user
    pub async fn signup(&self, username: &str) -> (AgendaSDK, agenda_sdk::UserDTO) {
        let anonymous = AgendaSDK::new(self.address.clone(), "");
        let res = anonymous
            .user
            .signup(username, &format!("{}@example.com", username))
            .await
            .expect("Expected to sign up");
        (AgendaSDK::new(self.address.clone(), res.token), res.user)
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, AgendaSDK) {
    let mut ctx = AgendaContext::create_inmemory();
    ctx.config.port = 0; // Random port
    let mailer = Arc::new(InMemoryMailer::new());
    ctx.mailer = mailer.clone();

    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        ctx,
        mailer,
        address: address.clone(),
    };
    let sdk = AgendaSDK::new(address, "");
    (app, sdk)
}
