#[cfg(test)]
mod tests {
    use crate::logic::{BookingNotifier, NotifyError};
    use crate::models::{BookingRequest, CalendarEventDetails};
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use proptest::prelude::*;
    use std::sync::Arc;
    use tourlink_common::services::{
        BoxFuture, CalendarEvent, CalendarEventResult, CalendarService, NotificationResult,
        NotificationService, ServiceError,
    };
    use tourlink_config::GcalConfig;
    use tourlink_gcal::logic::EventDefaults;

    // prepare() must never reach a collaborator
    struct Unreachable;

    impl NotificationService for Unreachable {
        type Error = ServiceError;

        fn send_email(
            &self,
            _to: &str,
            _subject: &str,
            _body: &str,
            _is_html: bool,
        ) -> BoxFuture<'_, NotificationResult, Self::Error> {
            panic!("email sent during prepare")
        }
    }

    impl CalendarService for Unreachable {
        type Error = ServiceError;

        fn create_event(
            &self,
            _calendar_id: &str,
            _event: CalendarEvent,
        ) -> BoxFuture<'_, CalendarEventResult, Self::Error> {
            panic!("calendar called during prepare")
        }
    }

    fn notifier() -> BookingNotifier {
        let defaults = EventDefaults::from_config(&GcalConfig::default()).unwrap();
        BookingNotifier::new(Arc::new(Unreachable), Arc::new(Unreachable), defaults)
    }

    fn booking(
        email: &str,
        tour_type: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        attendees: Vec<String>,
    ) -> BookingRequest {
        BookingRequest {
            customer_email: email.to_string(),
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            phone: None,
            tour_type: tour_type.to_string(),
            participants: 1,
            tour_date: start.format("%Y-%m-%d").to_string(),
            tour_time: None,
            is_adult: false,
            terms_accepted: false,
            signature: None,
            payment_method: None,
            payment_status: None,
            price: None,
            calendar_event: CalendarEventDetails {
                title: format!("{tour_type} booking"),
                description: None,
                start_date_time: start.to_rfc3339(),
                end_date_time: end.to_rfc3339(),
                location: None,
                attendees,
            },
            status: None,
            order_timestamp: None,
        }
    }

    fn base_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    proptest! {
        // Created event keeps the exact instants and invites the customer first
        #[test]
        fn test_prepared_event_round_trips(
            start_offset_minutes in 0..525_600i64,
            duration_minutes in 1..1_440i64,
            local in "[a-z]{1,12}",
            domain in "[a-z]{1,10}",
            tour_type in "[A-Za-z][A-Za-z ]{0,20}",
            extra in proptest::collection::vec("[a-z]{1,8}@guests\\.example", 0..4),
        ) {
            let email = format!("{local}@{domain}.com");
            let start = base_time() + Duration::minutes(start_offset_minutes);
            let end = start + Duration::minutes(duration_minutes);
            let request = booking(&email, &tour_type, start, end, extra.clone());

            let (mail, event) = notifier().prepare(&request).unwrap();

            prop_assert_eq!(event.start_time, start);
            prop_assert_eq!(event.end_time, end);
            prop_assert_eq!(&event.attendees[0], &email);
            for guest in &extra {
                prop_assert!(event.attendees.iter().any(|a| a.eq_ignore_ascii_case(guest)));
            }
            let unique: std::collections::HashSet<_> =
                event.attendees.iter().map(|a| a.to_ascii_lowercase()).collect();
            prop_assert_eq!(unique.len(), event.attendees.len());
            prop_assert!(mail.subject.contains(tour_type.trim()));
        }

        // A range that is empty or reversed never gets past validation
        #[test]
        fn test_non_positive_range_rejected(
            start_offset_minutes in 0..525_600i64,
            back_minutes in 0..1_440i64,
        ) {
            let start = base_time() + Duration::minutes(start_offset_minutes);
            let end = start - Duration::minutes(back_minutes);
            let request = booking("asha@example.com", "City Walk", start, end, vec![]);

            let result = notifier().prepare(&request);
            prop_assert!(matches!(result, Err(NotifyError::Validation(_))));
        }

        // Addresses with whitespace are rejected before anything is sent
        #[test]
        fn test_whitespace_email_rejected(
            left in "[a-z]{1,6}",
            right in "[a-z]{1,6}",
        ) {
            let email = format!("{left} {right}@example.com");
            let start = base_time();
            let request = booking(&email, "City Walk", start, start + Duration::hours(2), vec![]);

            let result = notifier().prepare(&request);
            prop_assert!(matches!(result, Err(NotifyError::Validation(_))));
        }
    }
}
