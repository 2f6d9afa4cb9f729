pub mod action;
pub mod intent;
pub mod locale;
pub mod message;
pub mod reply;
pub mod transcript;
