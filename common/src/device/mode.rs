use std::fmt;
use std::str::FromStr;

/// Operation modes of the Air Fresh A1.
///
/// The wire value is lowercase (`"auto"`), the user facing name is title case
/// (`"Auto"`). `Off` is not a mode the device reports, it maps to powering off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationMode {
    Off,
    Auto,
    Sleep,
    Favourite,
}

impl OperationMode {
    pub const ALL: [OperationMode; 4] = [
        OperationMode::Off,
        OperationMode::Auto,
        OperationMode::Sleep,
        OperationMode::Favourite,
    ];

    pub fn value(&self) -> &'static str {
        match self {
            OperationMode::Off => "off",
            OperationMode::Auto => "auto",
            OperationMode::Sleep => "sleep",
            OperationMode::Favourite => "favourite",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OperationMode::Off => "Off",
            OperationMode::Auto => "Auto",
            OperationMode::Sleep => "Sleep",
            OperationMode::Favourite => "Favourite",
        }
    }

    /// Parses the value reported by the device.
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.value() == value)
    }
}

impl FromStr for OperationMode {
    type Err = String;

    /// Parses a user supplied speed name, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower: String = s.trim().to_ascii_lowercase();
        Self::from_value(&lower).ok_or_else(|| format!("unknown operation mode: {s}"))
    }
}

impl fmt::Display for OperationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
