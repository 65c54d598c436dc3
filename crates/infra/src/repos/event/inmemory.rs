use super::IEventRepo;
use crate::repos::shared::inmemory_repo::*;
use crate::repos::shared::query_structs::{EventOrderField, EventQuery};
use agenda_domain::{Event, ID};
use std::sync::Arc;

pub struct InMemoryEventRepo {
    tables: Arc<InMemoryTables>,
}

impl InMemoryEventRepo {
    pub fn new(tables: Arc<InMemoryTables>) -> Self {
        Self { tables }
    }
}

fn matches(event: &Event, query: &EventQuery) -> bool {
    if event.user_id != query.user_id {
        return false;
    }
    if let Some(start_after) = query.start_after {
        if event.start < start_after {
            return false;
        }
    }
    if let Some(end_before) = query.end_before {
        if event.end > end_before {
            return false;
        }
    }
    if let Some((start, end)) = query.touching {
        if !event.touches(&start, &end) {
            return false;
        }
    }
    if let Some(is_all_day) = query.is_all_day {
        if event.is_all_day != is_all_day {
            return false;
        }
    }
    if let Some(search) = &query.search {
        let search = search.to_lowercase();
        if ![&event.title, &event.description, &event.location]
            .iter()
            .any(|field| field.to_lowercase().contains(&search))
        {
            return false;
        }
    }
    true
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn insert(&self, e: &Event) -> anyhow::Result<()> {
        insert(e, &self.tables.events);
        Ok(())
    }

    async fn save(&self, e: &Event) -> anyhow::Result<()> {
        save(e, &self.tables.events);
        Ok(())
    }

    async fn find(&self, event_id: &ID) -> Option<Event> {
        find(event_id, &self.tables.events)
    }

    async fn find_by_user(&self, query: &EventQuery) -> anyhow::Result<Vec<Event>> {
        let mut events = find_by(&self.tables.events, |e| matches(e, query));
        events.sort_by(|a, b| {
            let ordering = match query.order_by.field {
                EventOrderField::Start => a.start.cmp(&b.start),
                EventOrderField::End => a.end.cmp(&b.end),
                EventOrderField::Title => a.title.cmp(&b.title),
            };
            if query.order_by.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        Ok(events)
    }

    async fn delete(&self, event_id: &ID) -> Option<Event> {
        self.tables.delete_event_cascade(event_id)
    }
}
