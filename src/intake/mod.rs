//! The intake conversation — state machine, sessions, engine, and dispatch.

pub mod dispatch;
pub mod engine;
pub mod session;
pub mod state;
pub mod texts;

pub use dispatch::Dispatcher;
pub use engine::IntakeEngine;
pub use session::{Session, SessionStore, StepOutcome};
pub use state::ConversationStep;
