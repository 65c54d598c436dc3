use agenda_domain::User;
use agenda_infra::{AgendaContext, InMemoryMailer, StaticTimeSys};
use chrono::{DateTime, Utc};
use std::sync::Arc;

pub struct TestContext {
    pub ctx: AgendaContext,
    pub user: User,
    pub mailer: Arc<InMemoryMailer>,
}

/// In-memory context with a signed up `User` and an inspectable mailer
pub async fn setup() -> TestContext {
    let mut ctx = AgendaContext::create_inmemory();
    let mailer = Arc::new(InMemoryMailer::new());
    ctx.mailer = mailer.clone();
    let user = insert_user(&ctx, "alice").await;

    TestContext { ctx, user, mailer }
}

pub async fn insert_user(ctx: &AgendaContext, username: &str) -> User {
    let user = User::new(
        username,
        &format!("{}@example.com", username),
        agenda_utils::create_api_token(),
    )
    .unwrap();
    ctx.repos.users.insert(&user).await.unwrap();
    user
}

pub fn freeze_time(ctx: &mut AgendaContext, now: DateTime<Utc>) {
    ctx.sys = Arc::new(StaticTimeSys::at(now));
}
