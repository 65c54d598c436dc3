use super::{IReminderLock, IReminderRepo};
use crate::repos::shared::inmemory_repo::*;
use crate::repos::shared::query_structs::{OrderBy, ReminderOrderField};
use agenda_domain::{NotificationLog, Reminder, ID};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;

pub struct InMemoryReminderRepo {
    tables: Arc<InMemoryTables>,
}

impl InMemoryReminderRepo {
    pub fn new(tables: Arc<InMemoryTables>) -> Self {
        Self { tables }
    }
}

fn sort_reminders(reminders: &mut [Reminder], order_by: OrderBy<ReminderOrderField>) {
    reminders.sort_by(|a, b| {
        let ordering = match order_by.field {
            ReminderOrderField::ScheduledFor => a.scheduled_for().cmp(&b.scheduled_for()),
            ReminderOrderField::MinutesBefore => a.minutes_before.cmp(&b.minutes_before),
        };
        if order_by.descending {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        if !find_by(&self.tables.reminders, |r| r.conflicts_with(reminder)).is_empty() {
            anyhow::bail!("Duplicate reminder for event {}", reminder.event_id);
        }
        insert(reminder, &self.tables.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        update_many(
            &self.tables.reminders,
            |r| r.id == reminder.id,
            |r| {
                let (is_sent, sent_at) = (r.is_sent, r.sent_at);
                *r = reminder.clone();
                r.is_sent = is_sent;
                r.sent_at = sent_at;
            },
        );
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.tables.reminders)
    }

    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.tables.reminders, |r| r.event_id == *event_id);
        sort_reminders(&mut reminders, Default::default());
        Ok(reminders)
    }

    async fn find_by_events(&self, event_ids: &[ID]) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.tables.reminders, |r| event_ids.contains(&r.event_id));
        sort_reminders(&mut reminders, Default::default());
        Ok(reminders)
    }

    async fn find_by_user(
        &self,
        user_id: &ID,
        order_by: OrderBy<ReminderOrderField>,
    ) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.tables.reminders, |r| {
            self.tables.user_owns_event(user_id, &r.event_id)
        });
        sort_reminders(&mut reminders, order_by);
        Ok(reminders)
    }

    async fn find_due(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<Reminder>> {
        let mut reminders = find_by(&self.tables.reminders, |r| r.is_due(&now));
        sort_reminders(&mut reminders, Default::default());
        Ok(reminders)
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        self.tables.delete_reminder(reminder_id)
    }

    async fn delete_by_event(&self, event_id: &ID) -> anyhow::Result<()> {
        let reminder_ids = find_by(&self.tables.reminders, |r| r.event_id == *event_id)
            .into_iter()
            .map(|r| r.id)
            .collect::<Vec<_>>();
        for reminder_id in reminder_ids {
            self.tables.delete_reminder(&reminder_id);
        }
        Ok(())
    }

    async fn lock_for_dispatch(
        &self,
        reminder_id: &ID,
    ) -> anyhow::Result<Option<Box<dyn IReminderLock>>> {
        let guard = self.tables.lock_row(reminder_id).await;
        let reminder = match find(reminder_id, &self.tables.reminders) {
            Some(reminder) => reminder,
            None => {
                drop(guard);
                self.tables.forget_row_lock(reminder_id);
                return Ok(None);
            }
        };
        Ok(Some(Box::new(InMemoryReminderLock {
            _guard: guard,
            tables: self.tables.clone(),
            reminder,
            logs: Vec::new(),
            sent_at: None,
        })))
    }
}

struct InMemoryReminderLock {
    _guard: OwnedMutexGuard<()>,
    tables: Arc<InMemoryTables>,
    reminder: Reminder,
    logs: Vec<NotificationLog>,
    sent_at: Option<DateTime<Utc>>,
}

#[async_trait::async_trait]
impl IReminderLock for InMemoryReminderLock {
    fn reminder(&self) -> &Reminder {
        &self.reminder
    }

    async fn append_log(&mut self, log: &NotificationLog) -> anyhow::Result<()> {
        self.logs.push(log.clone());
        Ok(())
    }

    async fn mark_sent(&mut self, sent_at: DateTime<Utc>) -> anyhow::Result<()> {
        self.sent_at = Some(sent_at);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> anyhow::Result<()> {
        let lock = *self;
        lock.tables.insert_logs(lock.logs);
        if let Some(sent_at) = lock.sent_at {
            update_many(
                &lock.tables.reminders,
                |r| r.id == lock.reminder.id,
                |r| r.mark_sent(sent_at),
            );
        }
        Ok(())
    }
}
