//! Desktop front end: draws the page with iced and feeds clicks back into it.

pub mod app;

pub use app::{CoffeeApp, Message, Variant, run};
