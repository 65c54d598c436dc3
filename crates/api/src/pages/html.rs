use crate::error::AgendaError;
use actix_web::{http::header, HttpResponse};
use agenda_domain::{format_local, Event, Reminder, Tz};

const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M";

pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Full html document around `body`
pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Agenda</title>
<link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css">
<script src="https://unpkg.com/htmx.org@1.9.12"></script>
</head>
<body>
<nav class="navbar navbar-light bg-light mb-4">
<div class="container">
<a class="navbar-brand" href="/">Agenda</a>
<span>
<a href="/web/events/">Events</a> |
<a href="/ui/events/">Quick events</a> |
<a href="/web/logout/">Log out</a>
</span>
</div>
</nav>
<main class="container">
<h1>{title}</h1>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        body = body
    )
}

pub fn html_response(builder: &mut actix_web::HttpResponseBuilder, html: String) -> HttpResponse {
    builder
        .insert_header((header::CONTENT_TYPE, "text/html; charset=utf-8"))
        .body(html)
}

pub fn ok_page(title: &str, body: &str) -> HttpResponse {
    html_response(&mut HttpResponse::Ok(), page(title, body))
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// The human readable part of an error
pub fn error_message(e: &AgendaError) -> String {
    match e {
        AgendaError::InternalError => "Something went wrong, please try again.".into(),
        AgendaError::BadClientData(msg)
        | AgendaError::Conflict(msg)
        | AgendaError::Unauthorized(msg)
        | AgendaError::Forbidden(msg)
        | AgendaError::NotFound(msg) => msg.clone(),
    }
}

pub fn errors_list(errors: &[String]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let items: String = errors
        .iter()
        .map(|e| format!("<li>{}</li>", escape(e)))
        .collect();
    format!(r#"<div class="alert alert-danger"><ul class="mb-0">{}</ul></div>"#, items)
}

pub fn when(event: &Event, tz: &Tz) -> String {
    if event.is_all_day {
        format!("{} (all day)", format_local(&event.start, tz, "%d/%m/%Y"))
    } else {
        format!(
            "{} - {}",
            format_local(&event.start, tz, DISPLAY_FORMAT),
            format_local(&event.end, tz, DISPLAY_FORMAT)
        )
    }
}

/// Row of the classic events table
pub fn event_list_row(event: &Event, tz: &Tz) -> String {
    format!(
        r#"<tr><td><a href="/web/events/{id}/">{title}</a></td><td>{when}</td><td>{location}</td></tr>"#,
        id = event.id,
        title = escape(&event.title),
        when = escape(&when(event, tz)),
        location = escape(&event.location),
    )
}

/// Row of the htmx events table, deletable in place
pub fn event_htmx_row(event: &Event, tz: &Tz) -> String {
    format!(
        r#"<tr id="event-{id}"><td>{title}</td><td>{when}</td><td>{location}</td><td><button class="btn btn-sm btn-outline-danger" hx-post="/ui/events/{id}/delete/" hx-target="closest tr" hx-swap="delete" hx-confirm="Delete this event?">Delete</button></td></tr>"#,
        id = event.id,
        title = escape(&event.title),
        when = escape(&when(event, tz)),
        location = escape(&event.location),
    )
}

pub fn event_detail(event: &Event, reminders: &[Reminder], tz: &Tz) -> String {
    let reminders = if reminders.is_empty() {
        "<p>No reminders.</p>".to_string()
    } else {
        let items: String = reminders
            .iter()
            .map(|r| {
                format!(
                    "<li>{} minutes before by {} ({})</li>",
                    r.minutes_before,
                    r.channel,
                    if r.is_sent { "sent" } else { "pending" }
                )
            })
            .collect();
        format!("<ul>{}</ul>", items)
    };

    format!(
        r#"<dl>
<dt>When</dt><dd>{when}</dd>
<dt>Location</dt><dd>{location}</dd>
<dt>Description</dt><dd>{description}</dd>
</dl>
<h2>Reminders</h2>
{reminders}
<p><a href="/api/events/{id}/export/ics">Download .ics</a> | <a href="/web/events/">Back to events</a></p>"#,
        when = escape(&when(event, tz)),
        location = escape(or_dash(&event.location)),
        description = escape(or_dash(&event.description)),
        reminders = reminders,
        id = event.id,
    )
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::prelude::*;

    #[test]
    fn it_escapes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#x27;y&#x27;&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape("Standup"), "Standup");
    }

    #[test]
    fn it_renders_escaped_rows() {
        let start = Utc.with_ymd_and_hms(2025, 10, 8, 14, 0, 0).unwrap();
        let event = Event::new(Default::default(), "<b>Review</b>".into(), start, start);
        let row = event_htmx_row(&event, &Tz::UTC);
        assert!(row.contains("&lt;b&gt;Review&lt;/b&gt;"));
        assert!(row.contains("08/10/2025 14:00"));
        assert!(row.contains(&format!("/ui/events/{}/delete/", event.id)));
    }
}
