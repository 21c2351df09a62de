//! The fixed set of bookable time slots.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::reservation::ValidationError;

/// A bookable seating time.
///
/// Variant order is the order used for sorting and for storage; the
/// ordinal of a slot is its position in [`TimeSlot::ALL`].
///
/// # Examples
///
/// ```
/// use tablebook::TimeSlot;
///
/// let slot: TimeSlot = "7:00 PM".parse().unwrap();
/// assert_eq!(slot, TimeSlot::SevenPm);
/// assert!(TimeSlot::ElevenAm < TimeSlot::SixPm);
/// assert_eq!(slot.to_string(), "7:00 PM");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeSlot {
    /// 11:00 AM
    #[serde(rename = "11:00 AM")]
    ElevenAm,
    /// 12:00 PM
    #[serde(rename = "12:00 PM")]
    TwelvePm,
    /// 1:00 PM
    #[serde(rename = "1:00 PM")]
    OnePm,
    /// 2:00 PM
    #[serde(rename = "2:00 PM")]
    TwoPm,
    /// 6:00 PM
    #[serde(rename = "6:00 PM")]
    SixPm,
    /// 7:00 PM
    #[serde(rename = "7:00 PM")]
    SevenPm,
    /// 8:00 PM
    #[serde(rename = "8:00 PM")]
    EightPm,
    /// 9:00 PM
    #[serde(rename = "9:00 PM")]
    NinePm,
    /// 10:00 PM
    #[serde(rename = "10:00 PM")]
    TenPm,
}

impl TimeSlot {
    /// Every slot in enumeration order.
    pub const ALL: [Self; 9] = [
        Self::ElevenAm,
        Self::TwelvePm,
        Self::OnePm,
        Self::TwoPm,
        Self::SixPm,
        Self::SevenPm,
        Self::EightPm,
        Self::NinePm,
        Self::TenPm,
    ];

    /// Returns the display label, e.g. `"7:00 PM"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ElevenAm => "11:00 AM",
            Self::TwelvePm => "12:00 PM",
            Self::OnePm => "1:00 PM",
            Self::TwoPm => "2:00 PM",
            Self::SixPm => "6:00 PM",
            Self::SevenPm => "7:00 PM",
            Self::EightPm => "8:00 PM",
            Self::NinePm => "9:00 PM",
            Self::TenPm => "10:00 PM",
        }
    }

    /// Position of the slot in [`TimeSlot::ALL`]. This is the stored value.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Inverse of [`TimeSlot::ordinal`].
    #[must_use]
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal)).copied()
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Collapses whitespace and case so `"7:00pm"`, `"07:00 PM"` and
/// `"7:00 PM"` compare equal.
fn canonical(s: &str) -> String {
    let compact: String = s
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();
    if let Some(rest) = compact.strip_prefix('0') {
        return rest.to_string();
    }
    compact
}

impl FromStr for TimeSlot {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = canonical(s);
        Self::ALL
            .into_iter()
            .find(|slot| canonical(slot.label()) == wanted)
            .ok_or_else(|| ValidationError {
                field: "time_slot".into(),
                message: format!(
                    "'{s}' is not a valid time slot (expected one of: {})",
                    Self::ALL.map(Self::label).join(", ")
                ),
            })
    }
}
