use agenda_domain::{Entity, Event, NotificationLog, Reminder, User, ID};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Useful functions for creating inmemory repositories

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    collection.push(val.clone());
}

pub fn save<T: Clone + Entity>(val: &T, collection: &Mutex<Vec<T>>) {
    let mut collection = collection.lock().unwrap();
    if let Some(existing) = collection.iter_mut().find(|item| item.id() == val.id()) {
        *existing = val.clone();
    }
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let collection = collection.lock().unwrap();
    collection.iter().find(|item| item.id() == val_id).cloned()
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    let collection = collection.lock().unwrap();
    collection.iter().filter(|item| compare(item)).cloned().collect()
}

pub fn delete<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = collection.lock().unwrap();
    let index = collection.iter().position(|item| item.id() == val_id)?;
    Some(collection.remove(index))
}

pub fn find_and_delete_by<T: Clone, F: Fn(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> Vec<T> {
    let mut collection = collection.lock().unwrap();
    let mut deleted_items = Vec::new();
    collection.retain(|item| {
        if compare(item) {
            deleted_items.push(item.clone());
            false
        } else {
            true
        }
    });
    deleted_items
}

pub fn update_many<T, F: Fn(&T) -> bool, U: Fn(&mut T)>(
    collection: &Mutex<Vec<T>>,
    compare: F,
    update: U,
) {
    let mut collection = collection.lock().unwrap();
    for item in collection.iter_mut().filter(|item| compare(item)) {
        update(item);
    }
}

/// Tables shared by all the inmemory repositories so that they can
/// emulate the foreign key rules of the database schema.
#[derive(Default)]
pub struct InMemoryTables {
    pub users: Mutex<Vec<User>>,
    pub events: Mutex<Vec<Event>>,
    pub reminders: Mutex<Vec<Reminder>>,
    pub notification_logs: Mutex<Vec<NotificationLog>>,
    row_locks: Mutex<HashMap<ID, Arc<tokio::sync::Mutex<()>>>>,
}

impl InMemoryTables {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Exclusive lock of a single row, the inmemory version of
    /// `SELECT ... FOR UPDATE`
    pub async fn lock_row(&self, id: &ID) -> tokio::sync::OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.row_locks.lock().unwrap();
            locks.entry(*id).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Drops the lock entry of a row that turned out not to exist
    pub fn forget_row_lock(&self, id: &ID) {
        self.row_locks.lock().unwrap().remove(id);
    }

    #[cfg(test)]
    pub fn row_lock_count(&self) -> usize {
        self.row_locks.lock().unwrap().len()
    }

    /// Inserts `NotificationLog`s written under a row lock. Logs of a deleted
    /// `Event` are dropped and logs of a deleted `Reminder` are detached. The
    /// log table stays locked during the checks so that a concurrent delete
    /// sees the inserted rows.
    pub fn insert_logs(&self, logs: Vec<NotificationLog>) {
        let mut table = self.notification_logs.lock().unwrap();
        for mut log in logs {
            if find(&log.event_id, &self.events).is_none() {
                continue;
            }
            if let Some(reminder_id) = log.reminder_id {
                if find(&reminder_id, &self.reminders).is_none() {
                    log.reminder_id = None;
                }
            }
            table.push(log);
        }
    }

    /// Removes the `Event` together with everything referencing it
    pub fn delete_event_cascade(&self, event_id: &ID) -> Option<Event> {
        let event = delete(event_id, &self.events)?;
        let reminders = find_and_delete_by(&self.reminders, |r| r.event_id == *event_id);
        find_and_delete_by(&self.notification_logs, |log| log.event_id == *event_id);
        let mut locks = self.row_locks.lock().unwrap();
        for reminder in reminders {
            locks.remove(&reminder.id);
        }
        Some(event)
    }

    /// Removes the `Reminder` and detaches the logs pointing at it
    pub fn delete_reminder(&self, reminder_id: &ID) -> Option<Reminder> {
        let reminder = delete(reminder_id, &self.reminders)?;
        update_many(
            &self.notification_logs,
            |log| log.reminder_id == Some(*reminder_id),
            |log| log.reminder_id = None,
        );
        self.row_locks.lock().unwrap().remove(reminder_id);
        Some(reminder)
    }

    pub fn user_owns_event(&self, user_id: &ID, event_id: &ID) -> bool {
        self.events
            .lock()
            .unwrap()
            .iter()
            .any(|e| e.id == *event_id && e.user_id == *user_id)
    }
}
