use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::extension_system::error::ExtensionSystemError;

/// Priority levels for extensions.
///
/// Variants are declared in ascending execution order: `Root` runs before
/// everything else, `Low` runs last. Each level maps to a single mask bit,
/// except `Root`, which carries no bit and therefore matches any
/// [`PriorityMask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Reserved for the framework's own baseline extensions
    Root,
    /// Critical core functionality
    Core,
    /// High-priority extensions
    High,
    /// Slightly ahead of the default
    AboveNormal,
    /// The default for any extension that does not override it
    Normal,
    /// Slightly behind the default
    BelowNormal,
    /// Lowest priority, processed last
    Low,
}

impl Priority {
    /// Get the mask bit for this priority. `Root` is the value preceding
    /// all bits and yields zero.
    pub fn bit(&self) -> u8 {
        match self {
            Priority::Root => 0,
            Priority::Core => 1,
            Priority::High => 1 << 1,
            Priority::AboveNormal => 1 << 2,
            Priority::Normal => 1 << 3,
            Priority::BelowNormal => 1 << 4,
            Priority::Low => 1 << 5,
        }
    }

    /// The canonical lowercase name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            Priority::Root => "root",
            Priority::Core => "core",
            Priority::High => "high",
            Priority::AboveNormal => "above_normal",
            Priority::Normal => "normal",
            Priority::BelowNormal => "below_normal",
            Priority::Low => "low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Normal
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Priority {
    type Err = ExtensionSystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "root" => Ok(Priority::Root),
            "core" => Ok(Priority::Core),
            "high" => Ok(Priority::High),
            "above_normal" | "abovenormal" => Ok(Priority::AboveNormal),
            "normal" => Ok(Priority::Normal),
            "below_normal" | "belownormal" => Ok(Priority::BelowNormal),
            "low" => Ok(Priority::Low),
            _ => Err(ExtensionSystemError::UnknownPriority {
                value: s.to_string(),
            }),
        }
    }
}

bitflags! {
    /// Bit-set over the non-root priority levels.
    ///
    /// Used by callers that restrict an operation to certain priority
    /// classes. `Root` extensions carry no bit and pass every mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PriorityMask: u8 {
        const CORE = 1;
        const HIGH = 1 << 1;
        const ABOVE_NORMAL = 1 << 2;
        const NORMAL = 1 << 3;
        const BELOW_NORMAL = 1 << 4;
        const LOW = 1 << 5;
        /// Every priority level.
        const ALL = Self::CORE.bits()
            | Self::HIGH.bits()
            | Self::ABOVE_NORMAL.bits()
            | Self::NORMAL.bits()
            | Self::BELOW_NORMAL.bits()
            | Self::LOW.bits();
    }
}

impl PriorityMask {
    /// Whether the given priority passes this mask.
    ///
    /// `Priority::Root` has the empty bit value, which is a subset of every
    /// mask, so root extensions always pass.
    pub fn matches(&self, priority: Priority) -> bool {
        self.contains(PriorityMask::from_bits_truncate(priority.bit()))
    }
}

impl From<Priority> for PriorityMask {
    fn from(priority: Priority) -> Self {
        PriorityMask::from_bits_truncate(priority.bit())
    }
}
