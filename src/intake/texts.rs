//! User-facing reply text for the intake conversation.

use crate::backend::Outcome;

pub const PROMPT_FIRST_NAME: &str =
    "Welcome! Let's get you registered. What is your first name?";
pub const PROMPT_LAST_NAME: &str = "Thanks! Now, what is your last name?";
pub const PROMPT_EMAIL: &str = "Got it. What is your email address?";
pub const PROMPT_PHONE: &str = "Almost done! What is your phone number?";

pub const CANCELLED: &str =
    "Registration cancelled. Send /start whenever you want to try again.";

pub const SUBMITTED: &str =
    "You're all set! We've received your details and will contact you soon.";
pub const REJECTED_MISSING_FIELDS: &str =
    "Some of your details were missing or incomplete. Please send /start and try again.";
pub const REJECTED_DUPLICATE: &str =
    "It looks like you're already registered. Contact an administrator if that seems wrong.";
pub const BACKEND_ERROR: &str =
    "Something went wrong while saving your registration. Please try again later.";
pub const CONNECTION_ERROR: &str =
    "We couldn't reach the registration service. Please try again later.";

/// Reply text for a submission outcome.
pub fn outcome_text(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Submitted => SUBMITTED,
        Outcome::RejectedMissingFields => REJECTED_MISSING_FIELDS,
        Outcome::RejectedDuplicate => REJECTED_DUPLICATE,
        Outcome::BackendError => BACKEND_ERROR,
        Outcome::ConnectionError => CONNECTION_ERROR,
    }
}
