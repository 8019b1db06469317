pub mod screening;
pub mod user;
