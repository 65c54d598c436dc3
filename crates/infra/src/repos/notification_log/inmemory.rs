use super::INotificationLogRepo;
use crate::repos::shared::inmemory_repo::*;
use crate::repos::shared::query_structs::{NotificationLogOrderField, OrderBy};
use agenda_domain::{NotificationLog, ID};
use std::sync::Arc;

pub struct InMemoryNotificationLogRepo {
    tables: Arc<InMemoryTables>,
}

impl InMemoryNotificationLogRepo {
    pub fn new(tables: Arc<InMemoryTables>) -> Self {
        Self { tables }
    }
}

#[async_trait::async_trait]
impl INotificationLogRepo for InMemoryNotificationLogRepo {
    async fn insert(&self, log: &NotificationLog) -> anyhow::Result<()> {
        insert(log, &self.tables.notification_logs);
        Ok(())
    }

    async fn find(&self, log_id: &ID) -> Option<NotificationLog> {
        find(log_id, &self.tables.notification_logs)
    }

    async fn find_by_user(
        &self,
        user_id: &ID,
        order_by: OrderBy<NotificationLogOrderField>,
    ) -> anyhow::Result<Vec<NotificationLog>> {
        let mut logs = find_by(&self.tables.notification_logs, |log| log.user_id == *user_id);
        match order_by.field {
            NotificationLogOrderField::CreatedAt => logs.sort_by_key(|log| log.created),
        }
        if order_by.descending {
            logs.reverse();
        }
        Ok(logs)
    }
}
