//! Enumerations for task recurrence configuration.
//!
//! The remote service carries the recurrence kind and weekday identifiers as
//! strings on the wire; these closed enums keep the invalid-state space
//! unrepresentable on our side.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How often a task repeats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    /// One-time task, no repetition.
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Human label for list views and the form selector.
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::None => "One-time",
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
        }
    }
}

/// Day of week for weekly recurrence.
///
/// Ordered Monday-first so selected-day sets render and serialize in a
/// stable order.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

/// All weekdays in display order.
pub const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

impl Weekday {
    /// Short label as shown in the weekday picker.
    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Mon => "Mon",
            Weekday::Tue => "Tue",
            Weekday::Wed => "Wed",
            Weekday::Thu => "Thu",
            Weekday::Fri => "Fri",
            Weekday::Sat => "Sat",
            Weekday::Sun => "Sun",
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_wire_values_are_upper_snake() {
        assert_eq!(serde_json::to_string(&Frequency::None).unwrap(), "\"NONE\"");
        assert_eq!(serde_json::to_string(&Frequency::Daily).unwrap(), "\"DAILY\"");
        assert_eq!(serde_json::to_string(&Frequency::Weekly).unwrap(), "\"WEEKLY\"");
        assert_eq!(serde_json::to_string(&Frequency::Monthly).unwrap(), "\"MONTHLY\"");
    }

    #[test]
    fn weekday_wire_values_match_service() {
        assert_eq!(serde_json::to_string(&Weekday::Mon).unwrap(), "\"MON\"");
        assert_eq!(serde_json::to_string(&Weekday::Sun).unwrap(), "\"SUN\"");
        let parsed: Weekday = serde_json::from_str("\"WED\"").unwrap();
        assert_eq!(parsed, Weekday::Wed);
    }

    #[test]
    fn weekdays_order_monday_first() {
        let mut sorted = vec![Weekday::Sun, Weekday::Mon, Weekday::Fri];
        sorted.sort();
        assert_eq!(sorted, vec![Weekday::Mon, Weekday::Fri, Weekday::Sun]);
    }
}
