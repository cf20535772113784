pub use super::assessments::Entity as Assessments;
pub use super::employees::Entity as Employees;
pub use super::notifications::Entity as Notifications;
pub use super::questions::Entity as Questions;
pub use super::responses::Entity as Responses;
