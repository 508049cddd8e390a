pub mod baby;
pub mod event;
pub mod event_type;
pub mod session;
pub mod user;
