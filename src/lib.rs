pub mod coffee;
pub mod dom;
pub mod ui;
