// --- File: crates/tourlink_mail/src/lib.rs ---
pub mod payload;
pub mod service;

pub use service::{HttpMailService, MailError};
