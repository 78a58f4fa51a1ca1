use crate::{event::Event, reminder::Reminder, user::User};
use chrono::{Locale, TimeZone};
use chrono_tz::Tz;

const UNTITLED_EVENT: &str = "Untitled event";
const START_TIME_FORMAT: &str = "%A, %d %B %Y %H:%M";

/// Deployment specific inputs to the reminder email
#[derive(Debug, Clone)]
pub struct NotificationSettings {
    /// Brand name used in the subject and the footer
    pub app_name: String,
    /// Base url of the frontend, event links are `{link_base}/events/{event_id}`
    pub link_base: String,
    pub locale: Locale,
    pub timezone: Tz,
    /// Shown instead of event fields that are missing
    pub placeholder: String,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            app_name: "Sevent".into(),
            link_base: "http://localhost:5174".into(),
            locale: Locale::vi_VN,
            timezone: chrono_tz::Asia::Ho_Chi_Minh,
            placeholder: "Chưa xác định".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub subject: String,
    /// Self contained html document
    pub body: String,
}

/// Builds the reminder email. Never fails: every event field has a fallback
/// and the event itself may be missing.
pub fn render(
    reminder: &Reminder,
    user: &User,
    event: Option<&Event>,
    settings: &NotificationSettings,
) -> Notification {
    let title = event
        .and_then(|e| e.title.as_deref())
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .unwrap_or(UNTITLED_EVENT);
    let start_time = event
        .and_then(|e| e.start_ts)
        .and_then(|ts| format_start_time(ts, settings))
        .unwrap_or_else(|| settings.placeholder.clone());
    let location = event
        .and_then(|e| e.location.as_deref())
        .map(str::trim)
        .filter(|location| !location.is_empty())
        .unwrap_or(&settings.placeholder);
    let link = match event {
        Some(e) => format!(
            "{}/events/{}",
            settings.link_base.trim_end_matches('/'),
            e.id
        ),
        None => "#".to_string(),
    };
    let name = match user.name.trim() {
        "" => user.email.as_str(),
        name => name,
    };

    let note_section = match reminder.trimmed_note() {
        Some(note) => format!(
            "<p><strong>Your notes:</strong><br/><em>{}</em></p>",
            escape_html(note)
        ),
        None => String::new(),
    };

    let body = format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{app} Reminder</title></head>
<body>
<h1>{app} Reminder</h1>
<p>Dear <strong>{name}</strong>,</p>
<h2>{title}</h2>
<p><strong>Time:</strong> {time}</p>
<p><strong>Location:</strong> {location}</p>
{note}
<p>This is an automatic message. You can check the event's details here: <a href="{link}">{title}</a></p>
<p>Never miss an important event again with {app}.</p>
</body>
</html>"#,
        app = escape_html(&settings.app_name),
        name = escape_html(name),
        title = escape_html(title),
        time = escape_html(&start_time),
        location = escape_html(location),
        note = note_section,
        link = escape_html(&link),
    );

    Notification {
        subject: format!("{} reminds you about: {}", settings.app_name, title),
        body,
    }
}

fn format_start_time(ts: i64, settings: &NotificationSettings) -> Option<String> {
    settings
        .timezone
        .timestamp_millis_opt(ts)
        .single()
        .map(|dt| {
            dt.format_localized(START_TIME_FORMAT, settings.locale)
                .to_string()
        })
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
