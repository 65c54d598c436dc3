use super::html::escape;
use agenda_domain::{parse_local_datetime, Tz};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Event form as posted by the web UIs. Times are `datetime-local` values in
/// the configured time zone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    /// Checkboxes are only posted when checked
    #[serde(default)]
    pub is_all_day: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct ValidEventForm {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub is_all_day: bool,
}

impl EventForm {
    pub fn is_all_day(&self) -> bool {
        matches!(
            self.is_all_day.as_deref(),
            Some("on") | Some("true") | Some("1")
        )
    }

    /// Field errors are returned in form order
    pub fn validate(&self, tz: &Tz) -> Result<ValidEventForm, Vec<String>> {
        let mut errors = Vec::new();
        if self.title.trim().is_empty() {
            errors.push("Title: this field is required.".to_string());
        }
        let start = parse_local_datetime(&self.start, tz)
            .map_err(|_| errors.push("Start: enter a valid date and time.".to_string()))
            .ok();
        let end = parse_local_datetime(&self.end, tz)
            .map_err(|_| errors.push("End: enter a valid date and time.".to_string()))
            .ok();

        match (start, end) {
            (Some(start), Some(end)) if errors.is_empty() => Ok(ValidEventForm {
                title: self.title.trim().to_string(),
                description: self.description.clone(),
                location: self.location.trim().to_string(),
                start,
                end,
                is_all_day: self.is_all_day(),
            }),
            _ => Err(errors),
        }
    }
}

/// The `<form>` of the classic UI, filled with `form`
pub fn render_event_form(form: &EventForm) -> String {
    format!(
        r#"<form method="post" action="/web/events/create/">
<div class="mb-3"><label class="form-label" for="title">Title</label><input class="form-control" id="title" name="title" maxlength="200" required value="{title}"></div>
<div class="mb-3"><label class="form-label" for="description">Description</label><textarea class="form-control" id="description" name="description">{description}</textarea></div>
<div class="mb-3"><label class="form-label" for="location">Location</label><input class="form-control" id="location" name="location" maxlength="200" value="{location}"></div>
<div class="mb-3"><label class="form-label" for="start">Start</label><input class="form-control" id="start" name="start" type="datetime-local" required value="{start}"></div>
<div class="mb-3"><label class="form-label" for="end">End</label><input class="form-control" id="end" name="end" type="datetime-local" required value="{end}"></div>
<div class="form-check mb-3"><input class="form-check-input" id="is_all_day" name="is_all_day" type="checkbox"{checked}><label class="form-check-label" for="is_all_day">All day</label></div>
<button class="btn btn-primary" type="submit">Save</button>
</form>"#,
        title = escape(&form.title),
        description = escape(&form.description),
        location = escape(&form.location),
        start = escape(&form.start),
        end = escape(&form.end),
        checked = if form.is_all_day() { " checked" } else { "" },
    )
}

/// Inline create form of the htmx UI, appending the created row to the table
pub fn render_htmx_event_form() -> String {
    r##"<form class="row g-2 mb-4" hx-post="/ui/events/create/" hx-target="#events tbody" hx-swap="beforeend" hx-on::after-request="if(event.detail.successful) this.reset()">
<div class="col-md-3"><input class="form-control" name="title" placeholder="Title" maxlength="200" required></div>
<div class="col-md-2"><input class="form-control" name="location" placeholder="Location" maxlength="200"></div>
<div class="col-md-2"><input class="form-control" name="start" type="datetime-local" required></div>
<div class="col-md-2"><input class="form-control" name="end" type="datetime-local" required></div>
<div class="col-md-1 form-check"><input class="form-check-input" id="is_all_day" name="is_all_day" type="checkbox"><label class="form-check-label" for="is_all_day">All day</label></div>
<div class="col-md-2"><button class="btn btn-primary" type="submit">Add</button></div>
</form>"##
        .to_string()
}
