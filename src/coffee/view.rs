/// Size class carried by the coffee image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ImageSize {
    /// Zero, one or a negative number of cups.
    #[default]
    None,
    Two,
    Three,
    Four,
    Many,
}

impl ImageSize {
    pub fn for_cups(cups: i64) -> Self {
        match cups {
            2 => Self::Two,
            3 => Self::Three,
            4 => Self::Four,
            5.. => Self::Many,
            _ => Self::None,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Two => "two-cups",
            Self::Three => "three-cups",
            Self::Four => "four-cups",
            Self::Many => "many-cups",
        }
    }

    /// Reads back the size from an element's class list; unrelated classes are ignored.
    pub fn from_classes<S: AsRef<str>>(classes: &[S]) -> Self {
        classes
            .iter()
            .find_map(|c| match c.as_ref() {
                "two-cups" => Some(Self::Two),
                "three-cups" => Some(Self::Three),
                "four-cups" => Some(Self::Four),
                "many-cups" => Some(Self::Many),
                _ => None,
            })
            .unwrap_or_default()
    }
}

pub fn message_for(cups: i64) -> String {
    if cups == 1 {
        format!("You've had {cups} cup of coffee.")
    } else {
        format!("You've had {cups} cups of coffee.")
    }
}

/// Everything the page shows, derived from the cup count alone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub message: String,
    /// Body carries the "no cups" marker.
    pub no_cups: bool,
    pub image: ImageSize,
}

impl ViewState {
    pub fn for_cups(cups: i64) -> Self {
        Self {
            message: message_for(cups),
            no_cups: cups <= 0,
            image: ImageSize::for_cups(cups),
        }
    }
}
