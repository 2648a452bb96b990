mod permission;
mod user;
