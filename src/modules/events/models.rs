use serde::{Deserialize, Serialize};
use time::{macros::format_description, Date};

use crate::modules::support::Violations;
use catalog_http::error::AppError;

/// A scheduled event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Sequentially assigned identifier
    pub id: u64,
    /// Display name of the event
    pub name: String,
    /// Calendar date in `YYYY-MM-DD` form
    pub date: String,
    /// Where the event takes place
    pub location: String,
}

/// A person registered for an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendee {
    pub id: u64,
    pub event_id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Request body for `POST /events`.
#[derive(Debug, Default, Deserialize)]
pub struct EventDraft {
    pub name: Option<String>,
    pub date: Option<String>,
    pub location: Option<String>,
}

/// Validated event fields, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub name: String,
    pub date: String,
    pub location: String,
}

impl EventDraft {
    pub fn validate(self) -> Result<NewEvent, AppError> {
        let mut violations = Violations::new();

        let name = violations.required("name", self.name);
        let date = violations.required("date", self.date);
        let location = violations.required("location", self.location);

        if let Some(date) = &date {
            if !is_calendar_date(date) {
                violations.push("date", "must be a calendar date (YYYY-MM-DD)");
            }
        }

        violations.into_result("invalid event")?;

        match (name, date, location) {
            (Some(name), Some(date), Some(location)) => Ok(NewEvent {
                name,
                date,
                location,
            }),
            _ => Err(AppError::validation(vec![], "invalid event")),
        }
    }
}

/// Request body for `POST /events/{id}/attendees`.
#[derive(Debug, Default, Deserialize)]
pub struct AttendeeDraft {
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendee {
    pub name: String,
    pub email: Option<String>,
}

impl AttendeeDraft {
    pub fn validate(self) -> Result<NewAttendee, AppError> {
        let mut violations = Violations::new();
        let name = violations.required("name", self.name);
        violations.optional("email", self.email.as_deref());
        violations.into_result("invalid attendee")?;

        name.map(|name| NewAttendee {
            name,
            email: self.email,
        })
        .ok_or_else(|| AppError::validation(vec![], "invalid attendee"))
    }
}

fn is_calendar_date(value: &str) -> bool {
    Date::parse(value, format_description!("[year]-[month]-[day]")).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: Option<&str>, date: Option<&str>, location: Option<&str>) -> EventDraft {
        EventDraft {
            name: name.map(str::to_string),
            date: date.map(str::to_string),
            location: location.map(str::to_string),
        }
    }

    #[test]
    fn complete_draft_validates() {
        let event = draft(Some("My new event"), Some("2024-05-01"), Some("Harpa"))
            .validate()
            .unwrap();
        assert_eq!(event.name, "My new event");
        assert_eq!(event.date, "2024-05-01");
        assert_eq!(event.location, "Harpa");
    }

    #[test]
    fn missing_fields_are_all_reported() {
        match draft(None, None, Some("Harpa")).validate().unwrap_err() {
            AppError::Validation { details, .. } => {
                let fields: Vec<_> = details.iter().map(|d| d["field"].clone()).collect();
                assert_eq!(fields, vec!["name", "date"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn impossible_dates_are_rejected() {
        assert!(draft(Some("x"), Some("2024-02-30"), Some("y"))
            .validate()
            .is_err());
        assert!(draft(Some("x"), Some("May 1st"), Some("y"))
            .validate()
            .is_err());
        assert!(draft(Some("x"), Some("2024-02-29"), Some("y"))
            .validate()
            .is_ok());
    }

    #[test]
    fn attendee_requires_name() {
        let err = AttendeeDraft {
            name: None,
            email: Some("gudrun@example.is".into()),
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn attendee_email_is_omitted_when_absent() {
        let attendee = Attendee {
            id: 1,
            event_id: 2,
            name: "Jon".into(),
            email: None,
        };
        let json = serde_json::to_value(&attendee).unwrap();
        assert_eq!(json["eventId"], 2);
        assert!(json.get("email").is_none());
    }
}
