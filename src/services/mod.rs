pub mod assessments;
pub mod auth;
pub mod notifications;
pub mod questions;

pub use assessments::AssessmentService;
pub use auth::AuthService;
pub use notifications::NotificationService;
pub use questions::QuestionService;
