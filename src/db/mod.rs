pub mod password_resets;
pub mod reminders;
pub mod roles;
pub mod users;
