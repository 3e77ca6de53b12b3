use super::{ButtonRole, MarkupConfig};
use crate::dom::{Document, DomError, NodeId};

pub const CONTAINER_CLASS: &str = "content";
pub const BUTTON_ROW_CLASS: &str = "buttons";

fn label(role: ButtonRole) -> &'static str {
    match role {
        ButtonRole::Decrement => "-",
        ButtonRole::Reset => "Reset",
        ButtonRole::Increment => "+",
    }
}

/// Builds the coffee counter page under body and returns its container.
///
/// ```text
/// body
/// └── div.content
///     ├── h1
///     ├── img
///     ├── p.message
///     └── div.buttons
///         ├── div.button[data-role=decrement]  "-"
///         ├── div.button[data-role=reset]      "Reset"
///         └── div.button[data-role=increment]  "+"
/// ```
pub fn build_coffee_page(doc: &mut Document, config: &MarkupConfig) -> Result<NodeId, DomError> {
    let container = doc.create_element("div");
    doc.add_class(container, CONTAINER_CLASS)?;
    doc.append_child(doc.body(), container)?;

    let title = doc.create_element("h1");
    doc.set_text(title, "Coffee Counter")?;
    doc.append_child(container, title)?;

    let image = doc.create_element(&config.image_tag);
    doc.set_attribute(image, "alt", "coffee cup")?;
    doc.append_child(container, image)?;

    let message = doc.create_element("p");
    doc.add_class(message, &config.message_class)?;
    doc.append_child(container, message)?;

    let row = doc.create_element("div");
    doc.add_class(row, BUTTON_ROW_CLASS)?;
    doc.append_child(container, row)?;
    for role in ButtonRole::ALL {
        let button = doc.create_element("div");
        doc.add_class(button, &config.button_class)?;
        doc.set_attribute(button, &config.role_attribute, role.as_str())?;
        doc.set_text(button, label(role))?;
        doc.append_child(row, button)?;
    }
    Ok(container)
}
