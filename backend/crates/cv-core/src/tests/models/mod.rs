mod udid;
mod user;
