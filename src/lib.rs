//! Intake bot — guided registration over chat.
//!
//! Walks a user through first name, last name, email, and phone, then
//! submits the collected record to the backend. The process also serves a
//! liveness endpoint and an optional periodic ping loop.

pub mod backend;
pub mod channels;
pub mod config;
pub mod error;
pub mod health;
pub mod intake;
pub mod pinger;
