use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};

use super::{ButtonRole, Controller, ControllerError, Disposable, MarkupConfig, ViewState};
use crate::dom::{Document, Event, EventType, ListenerKey, NodeId};

/// Expected number of buttons in the container, one per role.
pub const BUTTON_COUNT: usize = ButtonRole::ALL.len();

#[derive(Clone, Copy, Debug)]
struct Binding {
    key: ListenerKey,
    button: NodeId,
    role: ButtonRole,
}

/// View controller for the coffee counter.
///
/// Owns the cup count and the listener registrations for its three buttons.
/// The document is shared with the host; the container element is borrowed
/// and only its children are removed when the controller is disposed.
#[derive(Debug)]
pub struct CoffeeController {
    document: Rc<RefCell<Document>>,
    container: NodeId,
    config: MarkupConfig,
    cups: i64,
    bindings: Vec<Binding>,
    message: NodeId,
    image: NodeId,
    disposed: bool,
}

impl CoffeeController {
    pub fn new(document: Rc<RefCell<Document>>, container: NodeId) -> Result<Self, ControllerError> {
        Self::with_config(document, container, MarkupConfig::default())
    }

    /// Validates the markup, binds the buttons and renders the initial view.
    pub fn with_config(
        document: Rc<RefCell<Document>>,
        container: NodeId,
        config: MarkupConfig,
    ) -> Result<Self, ControllerError> {
        let (bindings, message, image) = {
            let mut doc = document.borrow_mut();
            doc.element(container)?;

            let roles = bind_roles(&doc, container, &config)?;
            let message = doc
                .element_by_class(container, &config.message_class)
                .ok_or(ControllerError::MissingElement("message"))?;
            let image = doc
                .element_by_tag(container, &config.image_tag)
                .ok_or(ControllerError::MissingElement("image"))?;

            //render before listening so a failure leaves no bindings behind
            render_view(&mut doc, &config, message, image, 0)?;

            let mut bindings = Vec::with_capacity(roles.len());
            for (button, role) in roles {
                let key = doc.listen(button, EventType::Action)?;
                bindings.push(Binding { key, button, role });
            }
            (bindings, message, image)
        };

        let controller = Self {
            document,
            container,
            config,
            cups: 0,
            bindings,
            message,
            image,
            disposed: false,
        };
        info!(
            "coffee controller bound {} buttons in {:?}",
            controller.bindings.len(),
            container
        );
        Ok(controller)
    }

    pub fn cups(&self) -> i64 {
        self.cups
    }

    pub fn view_state(&self) -> ViewState {
        ViewState::for_cups(self.cups)
    }

    /// Button bound to `role`, if the controller is still live.
    pub fn button(&self, role: ButtonRole) -> Option<NodeId> {
        self.bindings
            .iter()
            .find(|b| b.role == role)
            .map(|b| b.button)
    }

    pub fn press(&mut self, role: ButtonRole) -> Result<(), ControllerError> {
        if self.disposed {
            return Err(ControllerError::Disposed);
        }
        self.cups = role.apply(self.cups);
        debug!("{role} pressed, cups = {}", self.cups);
        self.render()
    }

    fn render(&self) -> Result<(), ControllerError> {
        let mut doc = self.document.borrow_mut();
        render_view(&mut doc, &self.config, self.message, self.image, self.cups)
    }

    fn teardown(&mut self, doc: &mut Document) {
        for binding in self.bindings.drain(..) {
            if !doc.unlisten(binding.key) {
                debug!("listener for {} was already released", binding.role);
            }
        }
        if let Err(err) = doc.remove_children(self.container) {
            warn!("container vanished before disposal: {err}");
        }
        self.disposed = true;
        info!("coffee controller disposed");
    }
}

impl Disposable for CoffeeController {
    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        let document = Rc::clone(&self.document);
        match document.try_borrow_mut() {
            Ok(mut doc) => self.teardown(&mut doc),
            Err(_) => warn!("document is borrowed, coffee controller not disposed yet"),
        }
    }

    fn is_disposed(&self) -> bool {
        self.disposed
    }
}

impl Controller for CoffeeController {
    fn handle_event(&mut self, event: &Event) -> Result<Option<ButtonRole>, ControllerError> {
        if self.disposed {
            return Err(ControllerError::Disposed);
        }
        let Some(role) = self
            .bindings
            .iter()
            .find(|b| b.key == event.key)
            .map(|b| b.role)
        else {
            warn!("event on {:?} matches no bound button", event.target);
            self.render()?;
            return Ok(None);
        };
        self.press(role)?;
        Ok(Some(role))
    }

    fn container(&self) -> NodeId {
        self.container
    }
}

impl Drop for CoffeeController {
    fn drop(&mut self) {
        if self.disposed {
            return;
        }
        let document = Rc::clone(&self.document);
        //a host holding the document borrowed here can only leak listeners, not panic
        if let Ok(mut doc) = document.try_borrow_mut() {
            self.teardown(&mut doc);
        }
    }
}

fn render_view(
    doc: &mut Document,
    config: &MarkupConfig,
    message: NodeId,
    image: NodeId,
    cups: i64,
) -> Result<(), ControllerError> {
    let view = ViewState::for_cups(cups);
    let body = doc.body();
    if view.no_cups {
        doc.add_class(body, &config.no_cups_class)?;
    } else {
        doc.remove_class(body, &config.no_cups_class)?;
    }
    doc.set_text(message, view.message)?;
    doc.set_classes(image, view.image.css_class())?;
    Ok(())
}

/// Pairs each button under `container` with its role.
///
/// With the role attribute on every button, roles come from it. With it on
/// none, roles follow document order. Exactly one button per role is required.
fn bind_roles(
    doc: &Document,
    container: NodeId,
    config: &MarkupConfig,
) -> Result<Vec<(NodeId, ButtonRole)>, ControllerError> {
    let buttons = doc.elements_by_class(container, &config.button_class);
    if buttons.len() != BUTTON_COUNT {
        return Err(ControllerError::ButtonCount {
            expected: BUTTON_COUNT,
            found: buttons.len(),
        });
    }

    let named: Vec<Option<&str>> = buttons
        .iter()
        .map(|b| doc.attribute(*b, &config.role_attribute))
        .collect();

    let mut bound: Vec<(NodeId, ButtonRole)> = Vec::with_capacity(BUTTON_COUNT);
    if named.iter().all(Option::is_none) {
        for (index, button) in buttons.into_iter().enumerate() {
            let role = ButtonRole::from_position(index).ok_or(ControllerError::ButtonCount {
                expected: BUTTON_COUNT,
                found: index + 1,
            })?;
            bound.push((button, role));
        }
        return Ok(bound);
    }

    for (button, name) in buttons.into_iter().zip(named) {
        let name = name.ok_or(ControllerError::MixedRoleBinding)?;
        let role = ButtonRole::from_name(name)
            .ok_or_else(|| ControllerError::UnknownRole(name.to_string()))?;
        if bound.iter().any(|(_, r)| *r == role) {
            return Err(ControllerError::DuplicateRole(role));
        }
        bound.push((button, role));
    }
    Ok(bound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coffee::markup::build_coffee_page;
    use crate::coffee::ImageSize;

    fn page() -> (Rc<RefCell<Document>>, NodeId) {
        let mut doc = Document::new();
        let container = build_coffee_page(&mut doc, &MarkupConfig::default()).unwrap();
        (Rc::new(RefCell::new(doc)), container)
    }

    fn bare_page(roles: &[Option<&str>]) -> (Rc<RefCell<Document>>, NodeId) {
        let mut doc = Document::new();
        let container = doc.create_element("div");
        doc.append_child(doc.body(), container).unwrap();
        for role in roles {
            let button = doc.create_element("div");
            doc.add_class(button, "button").unwrap();
            if let Some(role) = role {
                doc.set_attribute(button, "data-role", *role).unwrap();
            }
            doc.append_child(container, button).unwrap();
        }
        let message = doc.create_element("p");
        doc.add_class(message, "message").unwrap();
        doc.append_child(container, message).unwrap();
        let image = doc.create_element("img");
        doc.append_child(container, image).unwrap();
        (Rc::new(RefCell::new(doc)), container)
    }

    #[test]
    fn press_updates_document() {
        let (doc, container) = page();
        let mut controller = CoffeeController::new(Rc::clone(&doc), container).unwrap();
        for _ in 0..3 {
            controller.press(ButtonRole::Increment).unwrap();
        }

        let d = doc.borrow();
        let message = d.element_by_class(container, "message").unwrap();
        let image = d.element_by_tag(container, "img").unwrap();
        assert_eq!(d.text(message), Some("You've had 3 cups of coffee."));
        assert_eq!(
            ImageSize::from_classes(d.element(image).unwrap().classes()),
            ImageSize::Three
        );
        assert!(!d.has_class(d.body(), "no-cups"));
    }

    #[test]
    fn positional_roles_without_attributes() {
        let (doc, container) = bare_page(&[None, None, None]);
        let controller = CoffeeController::new(doc, container).unwrap();
        let buttons: Vec<_> = ButtonRole::ALL
            .iter()
            .map(|r| controller.button(*r).unwrap())
            .collect();
        let mut sorted = buttons.clone();
        sorted.sort();
        assert_eq!(buttons, sorted);
    }

    #[test]
    fn named_roles_override_order() {
        let (doc, container) =
            bare_page(&[Some("increment"), Some("decrement"), Some("reset")]);
        let mut controller = CoffeeController::new(Rc::clone(&doc), container).unwrap();
        let first = doc.borrow().elements_by_class(container, "button")[0];
        assert_eq!(controller.button(ButtonRole::Increment), Some(first));

        let events = doc.borrow().click(first);
        assert_eq!(
            controller.handle_event(&events[0]).unwrap(),
            Some(ButtonRole::Increment)
        );
        assert_eq!(controller.cups(), 1);
    }

    #[test]
    fn rejects_wrong_button_count() {
        let (doc, container) = bare_page(&[None, None]);
        assert_eq!(
            CoffeeController::new(Rc::clone(&doc), container).unwrap_err(),
            ControllerError::ButtonCount {
                expected: 3,
                found: 2
            }
        );
        assert_eq!(doc.borrow().listener_count(), 0);
    }

    #[test]
    fn rejects_bad_role_names() {
        let (doc, container) = bare_page(&[Some("reset"), Some("reset"), Some("increment")]);
        assert_eq!(
            CoffeeController::new(doc, container).unwrap_err(),
            ControllerError::DuplicateRole(ButtonRole::Reset)
        );

        let (doc, container) = bare_page(&[Some("reset"), Some("refill"), Some("increment")]);
        assert_eq!(
            CoffeeController::new(doc, container).unwrap_err(),
            ControllerError::UnknownRole("refill".to_string())
        );

        let (doc, container) = bare_page(&[Some("reset"), None, Some("increment")]);
        assert_eq!(
            CoffeeController::new(doc, container).unwrap_err(),
            ControllerError::MixedRoleBinding
        );
    }

    #[test]
    fn rejects_missing_view_elements() {
        let mut doc = Document::new();
        let container = doc.create_element("div");
        doc.append_child(doc.body(), container).unwrap();
        for _ in 0..3 {
            let button = doc.create_element("div");
            doc.add_class(button, "button").unwrap();
            doc.append_child(container, button).unwrap();
        }
        let doc = Rc::new(RefCell::new(doc));
        assert_eq!(
            CoffeeController::new(Rc::clone(&doc), container).unwrap_err(),
            ControllerError::MissingElement("message")
        );

        let message = doc.borrow_mut().create_element("p");
        doc.borrow_mut().add_class(message, "message").unwrap();
        doc.borrow_mut().append_child(container, message).unwrap();
        assert_eq!(
            CoffeeController::new(doc, container).unwrap_err(),
            ControllerError::MissingElement("image")
        );
    }

    #[test]
    fn disposed_controller_is_inert() {
        let (doc, container) = page();
        let mut controller = CoffeeController::new(doc, container).unwrap();
        controller.dispose();
        controller.dispose();
        assert!(controller.is_disposed());
        assert_eq!(
            controller.press(ButtonRole::Increment),
            Err(ControllerError::Disposed)
        );
        assert_eq!(controller.button(ButtonRole::Reset), None);
    }

    #[test]
    fn foreign_listener_leaves_count_alone() {
        let (doc, container) = page();
        let mut controller = CoffeeController::new(Rc::clone(&doc), container).unwrap();
        let increment = controller.button(ButtonRole::Increment).unwrap();
        controller.press(ButtonRole::Increment).unwrap();
        doc.borrow_mut().listen(increment, EventType::Action).unwrap();

        let events = doc.borrow().click(increment);
        assert_eq!(events.len(), 2);
        let handled: Vec<_> = events
            .iter()
            .map(|e| controller.handle_event(e).unwrap())
            .collect();

        assert_eq!(handled, vec![Some(ButtonRole::Increment), None]);
        assert_eq!(controller.cups(), 2);
    }

    #[test]
    fn dispose_waits_for_document_borrow() {
        let (doc, container) = page();
        let mut controller = CoffeeController::new(Rc::clone(&doc), container).unwrap();

        let held = doc.borrow();
        controller.dispose();
        assert!(!controller.is_disposed());
        drop(held);

        controller.dispose();
        assert!(controller.is_disposed());
        assert_eq!(doc.borrow().listener_count(), 0);
    }

    #[test]
    fn failed_construction_leaves_page_untouched() {
        let (doc, container) = bare_page(&[None, None, None]);
        let children = doc.borrow().children(container).to_vec();
        {
            let mut d = doc.borrow_mut();
            let message = d.element_by_class(container, "message").unwrap();
            d.set_classes(message, "").unwrap();
        }

        assert_eq!(
            CoffeeController::new(Rc::clone(&doc), container).unwrap_err(),
            ControllerError::MissingElement("message")
        );
        assert_eq!(doc.borrow().children(container), children.as_slice());
        assert_eq!(doc.borrow().listener_count(), 0);
        assert!(!doc.borrow().has_class(doc.borrow().body(), "no-cups"));
    }

    #[test]
    fn drop_disposes() {
        let (doc, container) = page();
        let controller = CoffeeController::new(Rc::clone(&doc), container).unwrap();
        assert_eq!(doc.borrow().listener_count(), BUTTON_COUNT);
        drop(controller);
        assert_eq!(doc.borrow().listener_count(), 0);
        assert!(doc.borrow().children(container).is_empty());
    }
}
