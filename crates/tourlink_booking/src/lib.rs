// --- File: crates/tourlink_booking/src/lib.rs ---
pub mod doc;
pub mod email;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod models;
pub mod routes;
