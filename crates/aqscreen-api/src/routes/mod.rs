pub mod health;
pub mod history;
pub mod instruments;
pub mod screening;
