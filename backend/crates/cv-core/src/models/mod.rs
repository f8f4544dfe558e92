pub mod udid;
pub mod user;
