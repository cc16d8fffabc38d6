//! Task draft state and the validation/submission contract.
//!
//! A `TaskDraft` is owned by the creation form for its lifetime: created
//! fresh when the flow opens, discarded after a submit is dispatched or the
//! user cancels. The recurrence kind and its kind-specific payload are fused
//! into one enum so a payload of the wrong shape cannot exist, and switching
//! kinds cannot leak stale weekly/monthly data into a submission.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Local, Utc};
use thiserror::Error;

use crate::dto::AddTaskForm;
use crate::fields::{Frequency, Weekday};

/// Why a draft cannot be submitted yet.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Title is required")]
    EmptyTitle,

    #[error("Description is required")]
    EmptyDescription,

    #[error("Select how often the task repeats")]
    FrequencyUnset,

    #[error("Weekly tasks need at least one weekday")]
    NoWeekdays,

    #[error("Day of month must be 1-31, got {0}")]
    MonthDayOutOfRange(u32),
}

/// Recurrence kind together with its kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recurrence {
    /// One-time task.
    None,
    Daily,
    /// Repeats on the selected weekdays. Set semantics, duplicates
    /// impossible by construction.
    Weekly(BTreeSet<Weekday>),
    /// Repeats on one day of the month (1-31). Months shorter than the
    /// selected day are the service's policy, not ours.
    Monthly(u32),
}

impl Recurrence {
    /// The kind this payload belongs to.
    pub fn frequency(&self) -> Frequency {
        match self {
            Recurrence::None => Frequency::None,
            Recurrence::Daily => Frequency::Daily,
            Recurrence::Weekly(_) => Frequency::Weekly,
            Recurrence::Monthly(_) => Frequency::Monthly,
        }
    }

    /// Fresh payload slot for a newly entered kind.
    ///
    /// Weekly starts with no days selected; Monthly starts on the start
    /// date's local day-of-month, which is always in range.
    pub fn initial_for(frequency: Frequency, start: DateTime<Utc>) -> Self {
        match frequency {
            Frequency::None => Recurrence::None,
            Frequency::Daily => Recurrence::Daily,
            Frequency::Weekly => Recurrence::Weekly(BTreeSet::new()),
            Frequency::Monthly => Recurrence::Monthly(start.with_timezone(&Local).day()),
        }
    }
}

/// An in-progress, not-yet-submitted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub start: DateTime<Utc>,
    /// `None` until the user picks a recurrence kind.
    pub recurrence: Option<Recurrence>,
}

impl TaskDraft {
    /// Fresh draft: empty text, start defaulting to now, no kind selected.
    pub fn new() -> Self {
        TaskDraft {
            title: String::new(),
            description: String::new(),
            start: Utc::now(),
            recurrence: None,
        }
    }

    /// Enter a recurrence kind.
    ///
    /// Entering a different kind attaches a fresh payload slot and discards
    /// the previous one; re-selecting the current kind keeps its payload.
    pub fn set_frequency(&mut self, frequency: Frequency) {
        match &self.recurrence {
            Some(r) if r.frequency() == frequency => {}
            _ => self.recurrence = Some(Recurrence::initial_for(frequency, self.start)),
        }
    }

    /// Check the submission contract, reporting the first failure.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(DraftError::EmptyDescription);
        }
        match &self.recurrence {
            None => Err(DraftError::FrequencyUnset),
            Some(Recurrence::Weekly(days)) if days.is_empty() => Err(DraftError::NoWeekdays),
            Some(Recurrence::Monthly(day)) if !(1..=31).contains(day) => {
                Err(DraftError::MonthDayOutOfRange(*day))
            }
            Some(_) => Ok(()),
        }
    }

    pub fn is_submittable(&self) -> bool {
        self.validate().is_ok()
    }

    /// Shape the kind-specific wire payload.
    ///
    /// `month_day`/`week_days` are attached only for their kind; an invalid
    /// draft never produces a payload.
    pub fn assemble(&self) -> Result<AddTaskForm, DraftError> {
        self.validate()?;
        let recurrence = self.recurrence.as_ref().ok_or(DraftError::FrequencyUnset)?;

        let (month_day, week_days) = match recurrence {
            Recurrence::None | Recurrence::Daily => (None, None),
            Recurrence::Weekly(days) => (None, Some(days.iter().copied().collect())),
            Recurrence::Monthly(day) => (Some(*day), None),
        };

        Ok(AddTaskForm {
            name: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            start_date: self.start,
            frequency_type: recurrence.frequency(),
            month_day,
            week_days,
        })
    }
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft(recurrence: Recurrence) -> TaskDraft {
        TaskDraft {
            title: "Water plants".to_string(),
            description: "Daily watering".to_string(),
            start: "2026-08-06T12:00:00Z".parse().unwrap(),
            recurrence: Some(recurrence),
        }
    }

    #[test]
    fn daily_payload_carries_no_kind_specific_keys() {
        let form = valid_draft(Recurrence::Daily).assemble().unwrap();
        let value = serde_json::to_value(&form).unwrap();
        assert_eq!(value["name"], "Water plants");
        assert_eq!(value["description"], "Daily watering");
        assert_eq!(value["startDate"], "2026-08-06T12:00:00Z");
        assert_eq!(value["frequencyType"], "DAILY");
        assert!(value.get("weekDays").is_none());
        assert!(value.get("monthDay").is_none());
    }

    #[test]
    fn one_time_payload_carries_no_kind_specific_keys() {
        let value =
            serde_json::to_value(valid_draft(Recurrence::None).assemble().unwrap()).unwrap();
        assert_eq!(value["frequencyType"], "NONE");
        assert!(value.get("weekDays").is_none());
        assert!(value.get("monthDay").is_none());
    }

    #[test]
    fn weekly_payload_has_sorted_days_and_no_month_day() {
        let days = BTreeSet::from([Weekday::Wed, Weekday::Mon]);
        let value =
            serde_json::to_value(valid_draft(Recurrence::Weekly(days)).assemble().unwrap())
                .unwrap();
        assert_eq!(value["frequencyType"], "WEEKLY");
        assert_eq!(value["weekDays"], serde_json::json!(["MON", "WED"]));
        assert!(value.get("monthDay").is_none());
    }

    #[test]
    fn monthly_payload_has_day_and_no_week_days() {
        let value =
            serde_json::to_value(valid_draft(Recurrence::Monthly(15)).assemble().unwrap())
                .unwrap();
        assert_eq!(value["frequencyType"], "MONTHLY");
        assert_eq!(value["monthDay"], 15);
        assert!(value.get("weekDays").is_none());
    }

    #[test]
    fn blank_fields_block_submission() {
        let mut draft = valid_draft(Recurrence::Daily);
        draft.title = "   ".to_string();
        assert_eq!(draft.validate(), Err(DraftError::EmptyTitle));
        assert!(!draft.is_submittable());

        let mut draft = valid_draft(Recurrence::Daily);
        draft.description = String::new();
        assert_eq!(draft.validate(), Err(DraftError::EmptyDescription));

        let mut draft = valid_draft(Recurrence::Daily);
        draft.recurrence = None;
        assert_eq!(draft.validate(), Err(DraftError::FrequencyUnset));
        assert!(draft.assemble().is_err());
    }

    #[test]
    fn fresh_draft_is_not_submittable() {
        assert!(!TaskDraft::new().is_submittable());
    }

    #[test]
    fn empty_weekly_selection_blocks_submission() {
        let draft = valid_draft(Recurrence::Weekly(BTreeSet::new()));
        assert_eq!(draft.validate(), Err(DraftError::NoWeekdays));
    }

    #[test]
    fn month_day_out_of_range_blocks_submission() {
        for day in [0, 32] {
            let draft = valid_draft(Recurrence::Monthly(day));
            assert_eq!(draft.validate(), Err(DraftError::MonthDayOutOfRange(day)));
        }
        assert!(valid_draft(Recurrence::Monthly(31)).is_submittable());
        assert!(valid_draft(Recurrence::Monthly(1)).is_submittable());
    }

    #[test]
    fn switching_kind_discards_previous_payload() {
        let mut draft = valid_draft(Recurrence::Weekly(BTreeSet::from([Weekday::Fri])));
        draft.set_frequency(Frequency::Monthly);
        assert!(matches!(draft.recurrence, Some(Recurrence::Monthly(_))));

        // Coming back to weekly starts from an empty slot, not Friday.
        draft.set_frequency(Frequency::Weekly);
        assert_eq!(draft.recurrence, Some(Recurrence::Weekly(BTreeSet::new())));
    }

    #[test]
    fn reselecting_same_kind_keeps_payload() {
        let days = BTreeSet::from([Weekday::Mon, Weekday::Wed]);
        let mut draft = valid_draft(Recurrence::Weekly(days.clone()));
        draft.set_frequency(Frequency::Weekly);
        assert_eq!(draft.recurrence, Some(Recurrence::Weekly(days)));
    }

    #[test]
    fn monthly_slot_defaults_to_start_day() {
        let mut draft = valid_draft(Recurrence::Daily);
        draft.start = "2026-08-21T12:00:00Z".parse().unwrap();
        draft.set_frequency(Frequency::Monthly);
        let Some(Recurrence::Monthly(day)) = draft.recurrence else {
            panic!("expected monthly slot");
        };
        // Local offset can shift the calendar day around midnight; noon UTC
        // stays on the 21st for offsets within half a day.
        assert!((20..=22).contains(&day));
        assert!(draft.is_submittable());
    }

    #[test]
    fn assembled_text_is_trimmed() {
        let mut draft = valid_draft(Recurrence::Daily);
        draft.title = "  Water plants  ".to_string();
        let form = draft.assemble().unwrap();
        assert_eq!(form.name, "Water plants");
    }
}
