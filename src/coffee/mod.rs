//! The coffee counter view controller and the pieces it renders from.

pub mod config;
pub mod controller;
pub mod error;
pub mod markup;
pub mod role;
pub mod skeleton;
pub mod view;

pub use config::MarkupConfig;
pub use controller::CoffeeController;
pub use error::ControllerError;
pub use role::ButtonRole;
pub use skeleton::SkeletonController;
pub use view::{ImageSize, ViewState, message_for};

use crate::dom::{Event, NodeId};

/// Something that releases its listeners and page content on request.
pub trait Disposable {
    /// Idempotent.
    fn dispose(&mut self);
    fn is_disposed(&self) -> bool;
}

/// A controller mounted on one container of a page.
pub trait Controller: Disposable {
    /// Reacts to an event delivered by the page. Returns the role it was handled as, if any.
    fn handle_event(&mut self, event: &Event) -> Result<Option<ButtonRole>, ControllerError>;
    fn container(&self) -> NodeId;
}
