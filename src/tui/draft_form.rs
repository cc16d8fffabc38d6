//! Add-task form state for the terminal user interface.
//!
//! The form owns the whole draft while the creation flow is open, including
//! the weekday and day-of-month picker selections. The pickers' state lives
//! here rather than in the rendered widgets, so the assembled payload always
//! reads what the user actually picked and never falls back to an implicit
//! empty set or placeholder day.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, Local, Utc};

use crate::dates::{format_start, parse_start_input};
use crate::draft::{Recurrence, TaskDraft};
use crate::dto::AddTaskForm;
use crate::fields::{Frequency, Weekday, ALL_WEEKDAYS};
use crate::tui::input::InputField;

/// Fields of the add-task form, in visual order. `WeekDays` and `MonthDay`
/// exist only while their recurrence kind is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Start,
    Frequency,
    WeekDays,
    MonthDay,
    Description,
}

/// Frequency selector options: the unset sentinel first, then the closed set.
pub const FREQUENCY_OPTIONS: [Option<Frequency>; 5] = [
    None,
    Some(Frequency::None),
    Some(Frequency::Daily),
    Some(Frequency::Weekly),
    Some(Frequency::Monthly),
];

/// Add-task form for the creation flow.
pub struct DraftForm {
    pub title: InputField,
    pub start: InputField,
    pub description: InputField,
    /// Index into [`FREQUENCY_OPTIONS`].
    pub frequency: usize,
    /// Weekly picker selection. Set semantics; duplicates impossible.
    pub week_days: BTreeSet<Weekday>,
    /// Highlighted day in the weekly picker, index into [`ALL_WEEKDAYS`].
    pub weekday_cursor: usize,
    /// Monthly picker selection, 1-31.
    pub month_day: u32,
    pub current_field: usize,
    created_at: DateTime<Utc>,
}

impl DraftForm {
    /// Fresh form: empty title and memo, start prefilled with now, no
    /// recurrence kind selected.
    pub fn new() -> Self {
        let created_at = Utc::now();
        let mut form = DraftForm {
            title: InputField::new(),
            start: InputField::with_value(&format_start(created_at)),
            description: InputField::new(),
            frequency: 0,
            week_days: BTreeSet::new(),
            weekday_cursor: 0,
            month_day: created_at.with_timezone(&Local).day(),
            current_field: 0,
            created_at,
        };
        form.update_active_field();
        form
    }

    /// The currently selected recurrence kind, `None` before first selection.
    pub fn selected_frequency(&self) -> Option<Frequency> {
        FREQUENCY_OPTIONS[self.frequency]
    }

    /// The fields currently visible, in navigation order.
    ///
    /// The weekday row appears only for weekly tasks and the day-of-month
    /// field only for monthly ones; never both.
    pub fn field_order(&self) -> Vec<FormField> {
        let mut order = vec![FormField::Title, FormField::Start, FormField::Frequency];
        match self.selected_frequency() {
            Some(Frequency::Weekly) => order.push(FormField::WeekDays),
            Some(Frequency::Monthly) => order.push(FormField::MonthDay),
            _ => {}
        }
        order.push(FormField::Description);
        order
    }

    /// The field the cursor is on.
    pub fn current(&self) -> FormField {
        let order = self.field_order();
        order[self.current_field.min(order.len() - 1)]
    }

    pub fn field_count(&self) -> usize {
        self.field_order().len()
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % self.field_count();
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            self.field_count() - 1
        } else {
            self.current_field - 1
        };
        self.update_active_field();
    }

    /// Update which text field is active for editing.
    pub fn update_active_field(&mut self) {
        self.title.active = false;
        self.start.active = false;
        self.description.active = false;
        match self.current() {
            FormField::Title => self.title.active = true,
            FormField::Start => self.start.active = true,
            FormField::Description => self.description.active = true,
            _ => {}
        }
    }

    /// Cycle the frequency selector left or right.
    pub fn cycle_frequency(&mut self, right: bool) {
        let previous = self.selected_frequency();
        self.frequency = if right {
            (self.frequency + 1) % FREQUENCY_OPTIONS.len()
        } else if self.frequency == 0 {
            FREQUENCY_OPTIONS.len() - 1
        } else {
            self.frequency - 1
        };

        // Entering a different kind attaches a fresh payload slot; any
        // previous weekly/monthly selection is discarded.
        if self.selected_frequency() != previous {
            self.week_days.clear();
            self.weekday_cursor = 0;
            self.month_day = self.effective_start().with_timezone(&Local).day();
        }

        // The conditional row may have appeared or vanished below the
        // selector; keep the cursor on a real field.
        self.current_field = self.current_field.min(self.field_count() - 1);
        self.update_active_field();
    }

    /// Toggle the weekday under the picker cursor.
    pub fn toggle_weekday(&mut self) {
        let day = ALL_WEEKDAYS[self.weekday_cursor];
        if !self.week_days.remove(&day) {
            self.week_days.insert(day);
        }
    }

    /// Move the weekday picker cursor.
    pub fn move_weekday_cursor(&mut self, right: bool) {
        self.weekday_cursor = if right {
            (self.weekday_cursor + 1) % ALL_WEEKDAYS.len()
        } else if self.weekday_cursor == 0 {
            ALL_WEEKDAYS.len() - 1
        } else {
            self.weekday_cursor - 1
        };
    }

    /// Step the day-of-month picker, clamped to 1-31.
    pub fn step_month_day(&mut self, up: bool) {
        self.month_day = if up {
            (self.month_day + 1).min(31)
        } else {
            self.month_day.saturating_sub(1).max(1)
        };
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        match self.current() {
            FormField::Title => self.title.handle_char(c),
            FormField::Start => self.start.handle_char(c),
            FormField::Description => self.description.handle_char(c),
            FormField::WeekDays if c == ' ' => self.toggle_weekday(),
            _ => {}
        }
    }

    /// Handle backspace input for the currently active field.
    pub fn handle_backspace(&mut self) {
        match self.current() {
            FormField::Title => self.title.handle_backspace(),
            FormField::Start => self.start.handle_backspace(),
            FormField::Description => self.description.handle_backspace(),
            _ => {}
        }
    }

    /// Handle delete input for the currently active field.
    pub fn handle_delete(&mut self) {
        match self.current() {
            FormField::Title => self.title.handle_delete(),
            FormField::Start => self.start.handle_delete(),
            FormField::Description => self.description.handle_delete(),
            _ => {}
        }
    }

    /// Handle left/right arrow keys: cursor movement in text fields,
    /// selection changes in the selectors and pickers.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current() {
            FormField::Title => {
                if right {
                    self.title.move_cursor_right()
                } else {
                    self.title.move_cursor_left()
                }
            }
            FormField::Start => {
                if right {
                    self.start.move_cursor_right()
                } else {
                    self.start.move_cursor_left()
                }
            }
            FormField::Description => {
                if right {
                    self.description.move_cursor_right()
                } else {
                    self.description.move_cursor_left()
                }
            }
            FormField::Frequency => self.cycle_frequency(right),
            FormField::WeekDays => self.move_weekday_cursor(right),
            FormField::MonthDay => self.step_month_day(right),
        }
    }

    /// The start timestamp the draft would use right now.
    fn effective_start(&self) -> DateTime<Utc> {
        parse_start_input(&self.start.value).unwrap_or(self.created_at)
    }

    /// The draft as currently entered, or `None` while the start input does
    /// not parse.
    pub fn to_draft(&self) -> Option<TaskDraft> {
        let start = parse_start_input(&self.start.value)?;
        let recurrence = self.selected_frequency().map(|f| match f {
            Frequency::None => Recurrence::None,
            Frequency::Daily => Recurrence::Daily,
            Frequency::Weekly => Recurrence::Weekly(self.week_days.clone()),
            Frequency::Monthly => Recurrence::Monthly(self.month_day),
        });
        Some(TaskDraft {
            title: self.title.value.clone(),
            description: self.description.value.clone(),
            start,
            recurrence,
        })
    }

    /// Why submit is disabled right now, or `None` when submittable.
    pub fn blocking_issue(&self) -> Option<String> {
        match self.to_draft() {
            None => Some("Could not understand the start date".to_string()),
            Some(draft) => draft.validate().err().map(|e| e.to_string()),
        }
    }

    /// Assemble the wire payload. `None` while the form is not submittable;
    /// no payload means no network call.
    pub fn submit_payload(&self) -> Option<AddTaskForm> {
        let draft = self.to_draft()?;
        if !draft.is_submittable() {
            return None;
        }
        draft.assemble().ok()
    }
}

impl Default for DraftForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> DraftForm {
        let mut form = DraftForm::new();
        form.title = InputField::with_value("Water plants");
        form.description = InputField::with_value("Daily watering");
        form
    }

    fn select(form: &mut DraftForm, frequency: Frequency) {
        while form.selected_frequency() != Some(frequency) {
            form.cycle_frequency(true);
        }
    }

    #[test]
    fn conditional_rows_follow_the_selected_kind() {
        let mut form = filled_form();
        assert!(!form.field_order().contains(&FormField::WeekDays));
        assert!(!form.field_order().contains(&FormField::MonthDay));

        select(&mut form, Frequency::Weekly);
        assert!(form.field_order().contains(&FormField::WeekDays));
        assert!(!form.field_order().contains(&FormField::MonthDay));

        select(&mut form, Frequency::Monthly);
        assert!(form.field_order().contains(&FormField::MonthDay));
        assert!(!form.field_order().contains(&FormField::WeekDays));
    }

    #[test]
    fn picker_state_reaches_the_payload() {
        let mut form = filled_form();
        select(&mut form, Frequency::Weekly);
        form.toggle_weekday(); // Mon
        form.move_weekday_cursor(true);
        form.move_weekday_cursor(true);
        form.toggle_weekday(); // Wed

        let payload = form.submit_payload().unwrap();
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["weekDays"], serde_json::json!(["MON", "WED"]));
        assert!(value.get("monthDay").is_none());
    }

    #[test]
    fn switching_kind_discards_picker_state() {
        let mut form = filled_form();
        select(&mut form, Frequency::Weekly);
        form.toggle_weekday();
        assert!(!form.week_days.is_empty());

        select(&mut form, Frequency::Monthly);
        assert!(form.week_days.is_empty());
        let value = serde_json::to_value(form.submit_payload().unwrap()).unwrap();
        assert!(value.get("weekDays").is_none());
        assert!(value.get("monthDay").is_some());
    }

    #[test]
    fn unsubmittable_form_produces_no_payload() {
        let mut form = DraftForm::new();
        select(&mut form, Frequency::Daily);
        // Title and description still blank.
        assert!(form.submit_payload().is_none());
        assert!(form.blocking_issue().is_some());

        let mut form = filled_form();
        // Frequency never selected.
        assert!(form.submit_payload().is_none());

        select(&mut form, Frequency::Weekly);
        // Weekly with no day picked.
        assert!(form.submit_payload().is_none());
        form.toggle_weekday();
        assert!(form.submit_payload().is_some());
    }

    #[test]
    fn bad_start_input_blocks_submission() {
        let mut form = filled_form();
        select(&mut form, Frequency::Daily);
        form.start = InputField::with_value("whenever");
        assert!(form.submit_payload().is_none());
        assert_eq!(
            form.blocking_issue().unwrap(),
            "Could not understand the start date"
        );
    }

    #[test]
    fn month_day_stays_in_range() {
        let mut form = filled_form();
        select(&mut form, Frequency::Monthly);
        for _ in 0..40 {
            form.step_month_day(true);
        }
        assert_eq!(form.month_day, 31);
        for _ in 0..40 {
            form.step_month_day(false);
        }
        assert_eq!(form.month_day, 1);
    }

    #[test]
    fn cursor_stays_on_a_real_field_when_rows_vanish() {
        let mut form = filled_form();
        select(&mut form, Frequency::Weekly);
        // Walk to the last field, below the conditional weekday row.
        while form.current() != FormField::Description {
            form.next_field();
        }
        assert_eq!(form.current_field, 4);

        // Cycling away from Weekly removes the row above us.
        select(&mut form, Frequency::Daily);
        assert!(form.current_field < form.field_count());
        assert_eq!(form.current(), FormField::Description);
    }
}
