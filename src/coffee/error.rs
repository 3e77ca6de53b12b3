use thiserror::Error;

use super::ButtonRole;
use crate::dom::DomError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControllerError {
    #[error("expected {expected} buttons in the container, found {found}")]
    ButtonCount { expected: usize, found: usize },
    #[error("button has unknown role {0:?}")]
    UnknownRole(String),
    #[error("more than one button is bound to {0}")]
    DuplicateRole(ButtonRole),
    #[error("either every button names its role or none does")]
    MixedRoleBinding,
    #[error("required {0} element is missing from the container")]
    MissingElement(&'static str),
    #[error("controller has been disposed")]
    Disposed,
    #[error(transparent)]
    Dom(#[from] DomError),
}
