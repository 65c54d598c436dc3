use super::IUserRepo;
use crate::repos::shared::inmemory_repo::*;
use agenda_domain::{User, ID};
use std::sync::Arc;

pub struct InMemoryUserRepo {
    tables: Arc<InMemoryTables>,
}

impl InMemoryUserRepo {
    pub fn new(tables: Arc<InMemoryTables>) -> Self {
        Self { tables }
    }

    fn find_one<F: FnMut(&User) -> bool>(&self, compare: F) -> Option<User> {
        find_by(&self.tables.users, compare).into_iter().next()
    }
}

#[async_trait::async_trait]
impl IUserRepo for InMemoryUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        if self
            .find_one(|u| {
                u.username == user.username
                    || u.email == user.email
                    || u.api_token == user.api_token
            })
            .is_some()
        {
            anyhow::bail!("A user with the same username, email or api token already exists");
        }
        insert(user, &self.tables.users);
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> Option<User> {
        find(user_id, &self.tables.users)
    }

    async fn find_by_api_token(&self, api_token: &str) -> Option<User> {
        if api_token.is_empty() {
            return None;
        }
        self.find_one(|u| u.api_token == api_token)
    }

    async fn find_by_username(&self, username: &str) -> Option<User> {
        self.find_one(|u| u.username == username)
    }

    async fn find_by_email(&self, email: &str) -> Option<User> {
        let email = User::normalize_email(email);
        self.find_one(|u| u.email == email)
    }
}
