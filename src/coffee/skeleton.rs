use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};

use super::{ButtonRole, Controller, ControllerError, Disposable};
use crate::dom::{Document, Event, NodeId};

/// Starting point of the exercise: same lifecycle as
/// [`CoffeeController`](super::CoffeeController), but it binds no buttons,
/// keeps no count and renders nothing.
#[derive(Debug)]
pub struct SkeletonController {
    document: Rc<RefCell<Document>>,
    container: NodeId,
    disposed: bool,
}

impl SkeletonController {
    pub fn new(document: Rc<RefCell<Document>>, container: NodeId) -> Result<Self, ControllerError> {
        document.borrow().element(container)?;
        info!("skeleton controller attached to {container:?}");
        Ok(Self {
            document,
            container,
            disposed: false,
        })
    }
}

impl Disposable for SkeletonController {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        let Ok(mut doc) = self.document.try_borrow_mut() else {
            warn!("document is borrowed, skeleton controller not disposed yet");
            return;
        };
        if let Err(err) = doc.remove_children(self.container) {
            warn!("container vanished before disposal: {err}");
        }
        drop(doc);
        self.disposed = true;
        info!("skeleton controller disposed");
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Controller for SkeletonController {
    fn handle_event(&mut self, event: &Event) -> Result<Option<ButtonRole>, ControllerError> {
        if self.disposed {
            return Err(ControllerError::Disposed);
        }
        debug!("skeleton ignores event on {:?}", event.target);
        Ok(None)
    }

    fn container(&self) -> NodeId {
        self.container
    }
}
