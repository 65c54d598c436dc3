mod telemetry;

use agenda_api::Application;
use agenda_infra::setup_context;
use telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Variables already set in the environment take precedence over `.env`
    let _ = dotenvy::dotenv();

    let subscriber = get_subscriber("agenda".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context()
        .await
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let app = Application::new(context).await?;
    app.start().await
}
