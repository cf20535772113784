pub mod assessments;

pub mod auth;

pub mod notifications;

pub mod questions;

pub use assessments::configure_assessments_routes;
pub use auth::configure_auth_routes;
pub use notifications::configure_notifications_routes;
pub use questions::configure_questions_routes;
