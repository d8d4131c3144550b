pub mod access;
pub mod page;
pub mod todo;
pub mod user;
