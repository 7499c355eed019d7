pub mod auth;
pub mod log;
pub mod request;
pub mod user;
