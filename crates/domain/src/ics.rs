//! iCalendar export of a single `Event`

use crate::{date::format_local, Event};
use chrono::prelude::*;
use chrono_tz::Tz;
use icalendar::{Calendar, Component, EventLike, Property};

const PRODID: &str = "-//Agenda//Agenda//EN";
const ICS_DATETIME_FORMAT: &str = "%Y%m%dT%H%M%S";

pub fn uid(event: &Event) -> String {
    format!("event-{}@agenda", event.id)
}

pub fn filename(event: &Event) -> String {
    format!("event-{}.ics", event.id)
}

/// Serializes the `Event` as a VCALENDAR with a single VEVENT.
/// Times are written as floating local times in the given timezone.
pub fn event_to_ics(event: &Event, tz: &Tz, now: DateTime<Utc>) -> String {
    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&uid(event));
    ics_event.add_property("DTSTAMP", format_local(&now, tz, ICS_DATETIME_FORMAT));
    ics_event.add_property(
        "DTSTART",
        format_local(&event.start, tz, ICS_DATETIME_FORMAT),
    );
    ics_event.add_property("DTEND", format_local(&event.end, tz, ICS_DATETIME_FORMAT));
    ics_event.summary(&event.title);
    ics_event.description(&event.description.replace("\r\n", " ").replace('\n', " "));
    ics_event.location(&event.location);

    let mut cal = Calendar::new();
    cal.append_property(Property::new("METHOD", "PUBLISH"));
    cal.push(ics_event.done());
    let cal = cal.done();

    replace_prodid(&cal.to_string())
}

fn replace_prodid(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());
    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
        } else {
            result.push_str(line);
        }
        result.push_str("\r\n");
    }
    result
}
