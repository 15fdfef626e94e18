// --- File: crates/tourlink_mail/src/payload.rs ---
//! Request body of the `v3/mail/send` endpoint.

use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Address {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Address {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Personalization {
    pub to: Vec<Address>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Content {
    #[serde(rename = "type")]
    pub content_type: String,
    pub value: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct MailSendRequest {
    pub personalizations: Vec<Personalization>,
    pub from: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<Address>,
    pub subject: String,
    pub content: Vec<Content>,
}

impl MailSendRequest {
    /// A single-recipient message with one body part.
    pub fn single(
        from: Address,
        reply_to: Option<Address>,
        to: &str,
        subject: &str,
        body: &str,
        is_html: bool,
    ) -> Self {
        Self {
            personalizations: vec![Personalization {
                to: vec![Address::new(to)],
            }],
            from,
            reply_to,
            subject: subject.to_string(),
            content: vec![Content {
                content_type: if is_html { "text/html" } else { "text/plain" }.to_string(),
                value: body.to_string(),
            }],
        }
    }
}
