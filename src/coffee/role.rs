use std::fmt;

/// What a bound button does to the cup count.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ButtonRole {
    Decrement,
    Reset,
    Increment,
}

impl ButtonRole {
    /// Roles in the order the buttons appear in the markup.
    pub const ALL: [ButtonRole; 3] = [Self::Decrement, Self::Reset, Self::Increment];

    pub fn from_position(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "decrement" => Some(Self::Decrement),
            "reset" => Some(Self::Reset),
            "increment" => Some(Self::Increment),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Decrement => "decrement",
            Self::Reset => "reset",
            Self::Increment => "increment",
        }
    }

    /// Cup count after this button is pressed at `cups`.
    pub fn apply(self, cups: i64) -> i64 {
        match self {
            Self::Decrement => cups.saturating_sub(1),
            Self::Reset => 0,
            Self::Increment => cups.saturating_add(1),
        }
    }
}

impl fmt::Display for ButtonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
