// --- File: crates/tourlink_booking/src/models.rs ---
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tourlink_common::validation::{is_blank, is_valid_email};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// A tour booking as submitted by the booking form.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    #[cfg_attr(feature = "openapi", schema(example = "asha@example.com"))]
    pub customer_email: String,
    #[cfg_attr(feature = "openapi", schema(example = "Asha"))]
    pub first_name: String,
    #[cfg_attr(feature = "openapi", schema(example = "Rao"))]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "Old Delhi Food Walk"))]
    pub tour_type: String,
    #[cfg_attr(feature = "openapi", schema(example = 2, minimum = 1))]
    pub participants: u32,
    #[cfg_attr(feature = "openapi", schema(example = "2025-10-25"))]
    pub tour_date: String,
    #[serde(default)]
    pub tour_time: Option<String>,
    #[serde(default)]
    pub is_adult: bool,
    #[serde(default)]
    pub terms_accepted: bool,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    pub calendar_event: CalendarEventDetails,
    /// Fulfillment status as tracked by the storefront
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub order_timestamp: Option<String>,
}

/// The calendar entry embedded in a booking.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventDetails {
    #[cfg_attr(feature = "openapi", schema(example = "Old Delhi Food Walk - Asha Rao"))]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// RFC 3339, or local time in the calendar's zone
    #[cfg_attr(feature = "openapi", schema(example = "2025-10-25T19:00:00+05:30"))]
    pub start_date_time: String,
    #[cfg_attr(feature = "openapi", schema(example = "2025-10-25T21:00:00+05:30"))]
    pub end_date_time: String,
    #[serde(default)]
    pub location: Option<String>,
    /// Extra invitees besides the customer
    #[serde(default)]
    pub attendees: Vec<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingValidationError {
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("{0} must not be empty")]
    Blank(&'static str),
    #[error("participants must be at least 1")]
    NoParticipants,
}

impl BookingRequest {
    /// Checks the booking fields. Event timing is checked when the calendar
    /// event is prepared.
    pub fn validate(&self) -> Result<(), BookingValidationError> {
        if !is_valid_email(&self.customer_email) {
            return Err(BookingValidationError::InvalidEmail(
                self.customer_email.clone(),
            ));
        }

        let required = [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("tourType", &self.tour_type),
            ("tourDate", &self.tour_date),
            ("calendarEvent.title", &self.calendar_event.title),
        ];
        if let Some((name, _)) = required.iter().find(|(_, value)| is_blank(value)) {
            return Err(BookingValidationError::Blank(*name));
        }

        if self.participants < 1 {
            return Err(BookingValidationError::NoParticipants);
        }

        Ok(())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// Body returned on success.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ConfirmationResponse {
    #[cfg_attr(
        feature = "openapi",
        schema(example = "Email sent and event added to Google Calendar successfully!")
    )]
    pub message: String,
}

/// Outcome of a completed booking notification.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationResult {
    pub message: String,
    pub email_id: String,
    pub event_id: Option<String>,
    pub event_link: Option<String>,
}

impl From<ConfirmationResult> for ConfirmationResponse {
    fn from(result: ConfirmationResult) -> Self {
        Self {
            message: result.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload() -> serde_json::Value {
        json!({
            "customerEmail": "asha@example.com",
            "firstName": "Asha",
            "lastName": "Rao",
            "phone": "+91 98100 00000",
            "tourType": "Old Delhi Food Walk",
            "participants": 2,
            "tourDate": "2025-10-25",
            "tourTime": "19:00",
            "isAdult": true,
            "termsAccepted": true,
            "signature": "Asha Rao",
            "paymentMethod": "card",
            "paymentStatus": "paid",
            "price": 49.5,
            "calendarEvent": {
                "title": "Old Delhi Food Walk - Asha Rao",
                "description": "2 participants",
                "startDateTime": "2025-10-25T19:00:00+05:30",
                "endDateTime": "2025-10-25T21:00:00+05:30"
            },
            "status": "pending",
            "orderTimestamp": "2025-10-01T08:15:00Z"
        })
    }

    #[test]
    fn test_deserializes_camel_case() {
        let request: BookingRequest = serde_json::from_value(payload()).unwrap();
        assert_eq!(request.customer_email, "asha@example.com");
        assert_eq!(request.participants, 2);
        assert_eq!(request.price, Some(49.5));
        assert!(request.is_adult);
        assert_eq!(request.calendar_event.start_date_time, "2025-10-25T19:00:00+05:30");
        assert!(request.calendar_event.attendees.is_empty());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_optional_fields_default() {
        let mut value = payload();
        let object = value.as_object_mut().unwrap();
        for key in ["phone", "tourTime", "isAdult", "termsAccepted", "price", "status"] {
            object.remove(key);
        }
        let request: BookingRequest = serde_json::from_value(value).unwrap();
        assert!(!request.is_adult);
        assert!(!request.terms_accepted);
        assert!(request.price.is_none());
    }

    #[test]
    fn test_missing_required_fields_fail_to_parse() {
        for key in ["customerEmail", "calendarEvent", "participants"] {
            let mut value = payload();
            value.as_object_mut().unwrap().remove(key);
            assert!(
                serde_json::from_value::<BookingRequest>(value).is_err(),
                "parsed without {key}"
            );
        }
    }

    #[test]
    fn test_validate_rejects() {
        let base: BookingRequest = serde_json::from_value(payload()).unwrap();

        let mut bad_email = base.clone();
        bad_email.customer_email = "asha at example.com".to_string();
        assert!(matches!(
            bad_email.validate(),
            Err(BookingValidationError::InvalidEmail(_))
        ));

        let mut no_one = base.clone();
        no_one.participants = 0;
        assert_eq!(no_one.validate(), Err(BookingValidationError::NoParticipants));

        let mut blank = base;
        blank.tour_type = " ".to_string();
        assert_eq!(blank.validate(), Err(BookingValidationError::Blank("tourType")));
    }
}
