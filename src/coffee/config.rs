/// Names the controller uses to find its elements and mark the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkupConfig {
    pub button_class: String,
    pub message_class: String,
    pub image_tag: String,
    /// Set on body while the count is zero or below.
    pub no_cups_class: String,
    /// Optional per-button attribute naming its role explicitly.
    pub role_attribute: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            button_class: "button".to_string(),
            message_class: "message".to_string(),
            image_tag: "img".to_string(),
            no_cups_class: "no-cups".to_string(),
            role_attribute: "data-role".to_string(),
        }
    }
}
