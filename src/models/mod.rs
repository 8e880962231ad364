pub mod password_reset;
pub mod reminder;
pub mod role;
pub mod user;

pub use password_reset::PasswordReset;
pub use reminder::{Reminder, ReminderStatus};
pub use role::UserRole;
pub use user::User;
