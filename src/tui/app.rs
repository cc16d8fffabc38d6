//! Main application logic for the terminal user interface.
//!
//! The `App` struct manages TUI state, handles user input, renders the
//! board and dialogs, and coordinates with the gateway. All state mutation
//! happens on this thread; network calls run on the tokio runtime and their
//! outcomes come back as `TaskEvent`s drained at the top of the event loop.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

use crate::cache::{TaskCache, TaskKey};
use crate::config::Config;
use crate::dates::format_board_date;
use crate::dto::{AddTaskCommentForm, AddTaskForm, Task};
use crate::fields::{Frequency, ALL_WEEKDAYS};
use crate::gateway::{Destination, Dispatcher, TaskEvent, TaskGateway};
use crate::tui::colors::{DAILY_GREEN, DONE_GRAY, MONTHLY_PURPLE, WEEKLY_GOLD};
use crate::tui::draft_form::{DraftForm, FormField, FREQUENCY_OPTIONS};
use crate::tui::enums::{AppState, BoardContext, InputMode};
use crate::tui::input::InputField;
use crate::tui::utils::centered_rect;

/// Main application state for the terminal user interface.
pub struct App {
    state: AppState,
    context: BoardContext,
    dispatcher: Dispatcher,
    events: UnboundedReceiver<TaskEvent>,
    cache: TaskCache,
    tasks_loading: bool,
    task_state: TableState,
    selected_task: Option<u64>,
    draft_form: DraftForm,
    comment_input: InputField,
    input_mode: InputMode,
    status_message: String,
    /// Last failed submission, kept so `r` can retry it from the board.
    failed_submit: Option<(Destination, AddTaskForm)>,
}

impl App {
    /// Create a new App pointed at a destination, and start the first fetch.
    pub fn new(handle: Handle, config: &Config, destination: Destination) -> Self {
        let (events_tx, events_rx) = unbounded_channel();
        let gateway = Arc::new(TaskGateway::new(&config.api_url, config.token.clone()));
        let dispatcher = Dispatcher::new(gateway, handle, events_tx);

        let mut app = App {
            state: AppState::Board,
            context: BoardContext::new(destination),
            dispatcher,
            events: events_rx,
            cache: TaskCache::new(),
            tasks_loading: false,
            task_state: TableState::default(),
            selected_task: None,
            draft_form: DraftForm::new(),
            comment_input: InputField::new(),
            input_mode: InputMode::None,
            status_message: String::new(),
            failed_submit: None,
        };
        app.request_tasks();
        app
    }

    /// Fetch the current board if the cache can't serve it.
    fn request_tasks(&mut self) {
        if self.cache.needs_fetch(&self.context.key()) && !self.tasks_loading {
            self.tasks_loading = true;
            self.dispatcher
                .fetch_tasks(self.context.destination.clone(), self.context.date);
        }
    }

    /// Fetch the current board unconditionally.
    fn force_fetch(&mut self) {
        self.tasks_loading = true;
        self.dispatcher
            .fetch_tasks(self.context.destination.clone(), self.context.date);
    }

    /// Tasks to render: fresh if we have them, otherwise the stale copy
    /// while its refetch is in flight.
    fn visible_tasks(&self) -> Vec<Task> {
        self.cache
            .get_even_stale(&self.context.key())
            .map(|tasks| tasks.to_vec())
            .unwrap_or_default()
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    /// Apply one gateway outcome to UI state.
    fn handle_task_event(&mut self, event: TaskEvent) {
        match event {
            TaskEvent::Created(task) => {
                // One creation, one invalidation: every cached board is
                // stale now, and the visible one refetches.
                self.cache.invalidate_all();
                self.set_status_message(format!("Task \"{}\" created", task.name));
                self.request_tasks();
            }
            TaskEvent::CreateFailed { destination, form, error } => {
                self.set_status_message(format!(
                    "Could not create \"{}\": {} (press r to retry)",
                    form.name, error
                ));
                self.failed_submit = Some((destination, form));
            }
            TaskEvent::TasksLoaded { destination, date, tasks } => {
                let key = TaskKey {
                    group_id: destination.group_id,
                    task_list_id: destination.task_list_id,
                    date,
                };
                if key == self.context.key() {
                    self.tasks_loading = false;
                    let len = tasks.len();
                    self.cache.insert(key, tasks);
                    // Keep the selection in range after the reload.
                    match self.task_state.selected() {
                        Some(i) if i >= len && len > 0 => self.task_state.select(Some(len - 1)),
                        None if len > 0 => self.task_state.select(Some(0)),
                        _ if len == 0 => self.task_state.select(None),
                        _ => {}
                    }
                } else {
                    self.cache.insert(key, tasks);
                }
            }
            TaskEvent::LoadFailed { date, error } => {
                if date == self.context.date {
                    self.tasks_loading = false;
                }
                self.set_status_message(format!("Could not load tasks: {error}"));
            }
            TaskEvent::CommentAdded(comment) => {
                self.set_status_message(format!("Comment added to task {}", comment.task_id));
                // Comment counts changed; refresh what we're looking at.
                self.force_fetch();
            }
            TaskEvent::CommentFailed { task_id, error } => {
                self.set_status_message(format!(
                    "Could not comment on task {task_id}: {error}"
                ));
            }
        }
    }

    /// Get a copy of the currently selected task, if still on the board.
    fn get_selected_task(&self) -> Option<Task> {
        let id = self.selected_task?;
        self.visible_tasks().into_iter().find(|t| t.id == id)
    }

    /// Handle keyboard input on the board.
    ///
    /// Returns true if the application should quit.
    fn handle_board_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> io::Result<bool> {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(true),
            KeyCode::Char('a') => {
                // Fresh draft every time the creation flow opens.
                self.draft_form = DraftForm::new();
                self.state = AppState::AddTask;
                self.input_mode = InputMode::Text;
            }
            KeyCode::Left => {
                self.context.step_day(false);
                self.task_state.select(None);
                self.request_tasks();
            }
            KeyCode::Right => {
                self.context.step_day(true);
                self.task_state.select(None);
                self.request_tasks();
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let tasks = self.visible_tasks();
                if let Some(i) = self.task_state.selected() {
                    if let Some(task) = tasks.get(i) {
                        self.selected_task = Some(task.id);
                        self.state = AppState::TaskDetail;
                    }
                }
            }
            KeyCode::Char('g') => {
                self.force_fetch();
                self.set_status_message("Refreshing".to_string());
            }
            KeyCode::Char('r') => {
                if let Some((destination, form)) = self.failed_submit.take() {
                    self.set_status_message(format!("Retrying \"{}\"", form.name));
                    self.dispatcher.submit_task(destination, form);
                } else {
                    self.set_status_message("Nothing to retry".to_string());
                }
            }
            KeyCode::Char('h') | KeyCode::Char('?') => {
                self.state = AppState::Help;
            }
            _ => {}
        }
        Ok(false)
    }

    fn move_selection(&mut self, delta: i64) {
        let len = self.visible_tasks().len();
        if len == 0 {
            self.task_state.select(None);
            return;
        }
        let current = self.task_state.selected().unwrap_or(0) as i64;
        let next = (current + delta).clamp(0, len as i64 - 1);
        self.task_state.select(Some(next as usize));
    }

    /// Handle keyboard input in the add-task form.
    fn handle_form_input(&mut self, key: KeyCode, _modifiers: KeyModifiers) -> io::Result<bool> {
        match key {
            KeyCode::Esc => {
                // Cancel discards the draft.
                self.state = AppState::Board;
                self.input_mode = InputMode::None;
            }
            KeyCode::Tab | KeyCode::Down => self.draft_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.draft_form.prev_field(),
            KeyCode::Left => self.draft_form.handle_left_right(false),
            KeyCode::Right => self.draft_form.handle_left_right(true),
            KeyCode::Backspace => self.draft_form.handle_backspace(),
            KeyCode::Delete => self.draft_form.handle_delete(),
            KeyCode::Enter => self.submit_draft(),
            KeyCode::Char(c) => self.draft_form.handle_char(c),
            _ => {}
        }
        Ok(false)
    }

    /// The submit protocol: validate, shape the payload, dismiss the form,
    /// dispatch. The form closes before the network answers; the outcome
    /// arrives later as a `TaskEvent`.
    fn submit_draft(&mut self) {
        if let Some(issue) = self.draft_form.blocking_issue() {
            self.set_status_message(issue);
            return;
        }
        let Some(payload) = self.draft_form.submit_payload() else {
            return;
        };

        self.state = AppState::Board;
        self.input_mode = InputMode::None;
        self.set_status_message(format!("Creating \"{}\"", payload.name));
        self.dispatcher
            .submit_task(self.context.destination.clone(), payload);
        self.draft_form = DraftForm::new();
    }

    /// Handle keyboard input when viewing task details.
    fn handle_detail_input(&mut self, key: KeyCode, _modifiers: KeyModifiers) -> io::Result<bool> {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.state = AppState::Board;
            }
            KeyCode::Char('c') => {
                self.comment_input.clear();
                self.comment_input.active = true;
                self.state = AppState::CommentDialog;
                self.input_mode = InputMode::Text;
            }
            _ => {}
        }
        Ok(false)
    }

    /// Handle keyboard input in the comment dialog.
    fn handle_comment_input(&mut self, key: KeyCode, _modifiers: KeyModifiers) -> io::Result<bool> {
        match key {
            KeyCode::Esc => {
                self.state = AppState::TaskDetail;
                self.input_mode = InputMode::None;
            }
            KeyCode::Enter => {
                if self.comment_input.is_blank() {
                    self.set_status_message("Comment is empty".to_string());
                } else if let Some(task_id) = self.selected_task {
                    let form = AddTaskCommentForm {
                        content: self.comment_input.value.trim().to_string(),
                    };
                    self.dispatcher.submit_comment(task_id, form);
                    self.set_status_message("Sending comment".to_string());
                    self.state = AppState::TaskDetail;
                    self.input_mode = InputMode::None;
                }
            }
            KeyCode::Backspace => self.comment_input.handle_backspace(),
            KeyCode::Delete => self.comment_input.handle_delete(),
            KeyCode::Left => self.comment_input.move_cursor_left(),
            KeyCode::Right => self.comment_input.move_cursor_right(),
            KeyCode::Char(c) => self.comment_input.handle_char(c),
            _ => {}
        }
        Ok(false)
    }

    /// Handle keyboard input on the help screen.
    fn handle_help_input(&mut self, key: KeyCode, _modifiers: KeyModifiers) -> io::Result<bool> {
        match key {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h') => {
                self.state = AppState::Board;
            }
            _ => {}
        }
        Ok(false)
    }

    /// Poll for and handle keyboard events based on current state.
    ///
    /// Returns true if the application should quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                let should_quit = match self.state {
                    AppState::Board => self.handle_board_input(key.code, key.modifiers)?,
                    AppState::AddTask => self.handle_form_input(key.code, key.modifiers)?,
                    AppState::TaskDetail => self.handle_detail_input(key.code, key.modifiers)?,
                    AppState::CommentDialog => self.handle_comment_input(key.code, key.modifiers)?,
                    AppState::Help => self.handle_help_input(key.code, key.modifiers)?,
                };
                if should_quit {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    fn frequency_color(frequency: Frequency) -> Color {
        match frequency {
            Frequency::None => Color::Reset,
            Frequency::Daily => DAILY_GREEN,
            Frequency::Weekly => WEEKLY_GOLD,
            Frequency::Monthly => MONTHLY_PURPLE,
        }
    }

    /// Render the task board for the current date.
    fn render_board(&mut self, f: &mut Frame, area: Rect) {
        let today = Local::now().date_naive();
        let title = format!(
            " List {} | {} | [a]dd  [<] [>] day  [g] refresh  [h]elp ",
            self.context.destination.task_list_id,
            format_board_date(self.context.date, today),
        );

        let tasks = self.visible_tasks();
        if tasks.is_empty() {
            let text = if self.tasks_loading {
                "Loading tasks..."
            } else {
                "No tasks for this day. Press 'a' to add one."
            };
            let p = Paragraph::new(text)
                .block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(p, area);
            return;
        }

        let rows: Vec<Row> = tasks
            .iter()
            .map(|t| {
                let check = if t.checked { "[x]" } else { "[ ]" };
                let style = if t.checked {
                    Style::default().fg(DONE_GRAY).add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default()
                };
                Row::new(vec![
                    Span::raw(check),
                    Span::raw(t.id.to_string()),
                    Span::styled(
                        t.frequency.label(),
                        Style::default().fg(Self::frequency_color(t.frequency)),
                    ),
                    Span::raw(t.comment_count.to_string()),
                    Span::raw(t.name.clone()),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Length(6),
                Constraint::Length(9),
                Constraint::Length(5),
                Constraint::Min(10),
            ],
        )
        .header(
            Row::new(vec!["", "ID", "Repeat", "Cmts", "Name"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        f.render_stateful_widget(table, area, &mut self.task_state);
    }

    fn input_line(field: &InputField, placeholder: &str) -> Line<'static> {
        if field.value.is_empty() && !field.active {
            Line::from(Span::styled(
                placeholder.to_string(),
                Style::default().fg(DONE_GRAY),
            ))
        } else {
            Line::from(field.value.clone())
        }
    }

    fn field_block(title: &str, active: bool) -> Block<'static> {
        let style = if active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(title.to_string())
    }

    /// Render the add-task form with its conditional picker row.
    fn render_form(&mut self, f: &mut Frame, area: Rect) {
        let has_picker_row = matches!(
            self.draft_form.selected_frequency(),
            Some(Frequency::Weekly) | Some(Frequency::Monthly)
        );

        let mut constraints = vec![
            Constraint::Length(3), // title
            Constraint::Length(3), // start
            Constraint::Length(3), // frequency
        ];
        if has_picker_row {
            constraints.push(Constraint::Length(3));
        }
        constraints.push(Constraint::Min(3)); // description
        constraints.push(Constraint::Length(1)); // hints

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);
        let current = self.draft_form.current();

        let title = Paragraph::new(Self::input_line(&self.draft_form.title, "Enter a task title"))
            .block(Self::field_block("Title", current == FormField::Title));
        f.render_widget(title, chunks[0]);

        let start = Paragraph::new(Self::input_line(
            &self.draft_form.start,
            "now / tomorrow 09:00 / 2026-08-20",
        ))
        .block(Self::field_block(
            "Start date & time",
            current == FormField::Start,
        ));
        f.render_widget(start, chunks[1]);

        // Frequency selector: all options on one line, selected highlighted.
        let mut spans: Vec<Span> = Vec::new();
        for (i, option) in FREQUENCY_OPTIONS.iter().enumerate() {
            let label = match option {
                None => "(not set)",
                Some(freq) => freq.label(),
            };
            let mut style = Style::default();
            if i == self.draft_form.frequency {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(format!(" {label} "), style));
            spans.push(Span::raw(" "));
        }
        let frequency = Paragraph::new(Line::from(spans)).block(Self::field_block(
            "Repeat",
            current == FormField::Frequency,
        ));
        f.render_widget(frequency, chunks[2]);

        let mut next = 3;
        match self.draft_form.selected_frequency() {
            Some(Frequency::Weekly) => {
                let mut spans: Vec<Span> = Vec::new();
                for (i, day) in ALL_WEEKDAYS.iter().enumerate() {
                    let selected = self.draft_form.week_days.contains(day);
                    let mut style = if selected {
                        Style::default().fg(Color::Black).bg(WEEKLY_GOLD)
                    } else {
                        Style::default()
                    };
                    if i == self.draft_form.weekday_cursor && current == FormField::WeekDays {
                        style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
                    }
                    spans.push(Span::styled(format!(" {} ", day.label()), style));
                    spans.push(Span::raw(" "));
                }
                let picker = Paragraph::new(Line::from(spans)).block(Self::field_block(
                    "Repeat on (space to toggle)",
                    current == FormField::WeekDays,
                ));
                f.render_widget(picker, chunks[next]);
                next += 1;
            }
            Some(Frequency::Monthly) => {
                let picker = Paragraph::new(format!(
                    "Every month on day {}  (left/right to change)",
                    self.draft_form.month_day
                ))
                .block(Self::field_block(
                    "Day of month",
                    current == FormField::MonthDay,
                ));
                f.render_widget(picker, chunks[next]);
                next += 1;
            }
            _ => {}
        }

        let description = Paragraph::new(Self::input_line(
            &self.draft_form.description,
            "Enter a memo",
        ))
        .wrap(Wrap { trim: false })
        .block(Self::field_block(
            "Memo",
            current == FormField::Description,
        ));
        f.render_widget(description, chunks[next]);

        let hints = Paragraph::new(
            "Tab/Up/Down: navigate   Left/Right: change selection   Enter: create   Esc: cancel",
        )
        .style(Style::default().fg(DONE_GRAY));
        f.render_widget(hints, chunks[next + 1]);
    }

    /// Render the task detail view.
    fn render_detail(&mut self, f: &mut Frame, area: Rect) {
        let Some(task) = self.get_selected_task() else {
            self.state = AppState::Board;
            return;
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Task: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(task.name.clone()),
            ]),
            Line::from(vec![
                Span::styled("Repeat: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(
                    task.frequency.label(),
                    Style::default().fg(Self::frequency_color(task.frequency)),
                ),
            ]),
            Line::from(vec![
                Span::styled("Done: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(if task.checked { "yes" } else { "no" }),
            ]),
            Line::from(vec![
                Span::styled("Comments: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(task.comment_count.to_string()),
            ]),
        ];
        if let Some(writer) = &task.writer {
            lines.push(Line::from(vec![
                Span::styled("By: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(writer.nickname.clone()),
            ]));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(task.description.clone()));

        let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Task Details - [c]omment, [Esc] back "),
        );
        f.render_widget(p, area);
    }

    /// Render the comment dialog over the detail view.
    fn render_comment_dialog(&mut self, f: &mut Frame, area: Rect) {
        self.render_detail(f, area);
        let dialog = centered_rect(60, 20, area);
        f.render_widget(Clear, dialog);
        let p = Paragraph::new(self.comment_input.value.clone())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(" Comment - Enter to send, Esc to cancel "),
            );
        f.render_widget(p, dialog);
    }

    /// Render the help screen.
    fn render_help(&mut self, f: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from("Board"),
            Line::from("  a            Add a task"),
            Line::from("  Left/Right   Previous/next day"),
            Line::from("  Up/Down/jk   Move selection"),
            Line::from("  Enter/Space  View task details"),
            Line::from("  g            Refresh from the service"),
            Line::from("  r            Retry the last failed creation"),
            Line::from("  q/Ctrl+C     Quit"),
            Line::from(""),
            Line::from("Add task"),
            Line::from("  Tab/Up/Down  Navigate fields"),
            Line::from("  Left/Right   Change repeat / pickers"),
            Line::from("  Space        Toggle weekday (weekly tasks)"),
            Line::from("  Enter        Create"),
            Line::from("  Esc          Cancel"),
            Line::from(""),
            Line::from("Task details"),
            Line::from("  c            Comment on the task"),
            Line::from("  Esc/q        Back to board"),
        ];
        let p = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help - [Esc] back "),
        );
        f.render_widget(p, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&mut self, f: &mut Frame, area: Rect) {
        let state_label = match self.state {
            AppState::Board => "Board",
            AppState::AddTask => "Add Task",
            AppState::TaskDetail => "Task",
            AppState::CommentDialog => "Comment",
            AppState::Help => "Help",
        };
        let mode_hint = match self.input_mode {
            InputMode::Text => " [typing]",
            InputMode::None => "",
        };
        let text = if self.status_message.is_empty() {
            format!(" {state_label}{mode_hint} ")
        } else {
            format!(" {state_label}{mode_hint} | {} ", self.status_message)
        };
        let p = Paragraph::new(text).style(Style::default().add_modifier(Modifier::REVERSED));
        f.render_widget(p, area);
    }

    /// Render the current state.
    fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        match self.state {
            AppState::Board => self.render_board(f, chunks[0]),
            AppState::AddTask => self.render_form(f, chunks[0]),
            AppState::TaskDetail => self.render_detail(f, chunks[0]),
            AppState::CommentDialog => self.render_comment_dialog(f, chunks[0]),
            AppState::Help => self.render_help(f, chunks[0]),
        }
        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop: drain gateway outcomes, draw, handle one key.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            while let Ok(event) = self.events.try_recv() {
                self.handle_task_event(event);
            }
            terminal.draw(|f| self.render(f))?;
            if self.handle_input()? {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::runtime::Runtime;

    fn test_app(runtime: &Runtime) -> App {
        let config = Config {
            api_url: "http://localhost:9".to_string(),
            group_id: Some("3".to_string()),
            task_list_id: Some(7),
            token: None,
        };
        let destination = Destination {
            group_id: "3".to_string(),
            task_list_id: 7,
        };
        App::new(runtime.handle().clone(), &config, destination)
    }

    fn created_task() -> Task {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Water plants",
            "description": "Daily watering",
            "commentCount": 0,
            "frequency": "DAILY",
            "checked": false,
            "date": null
        }))
        .unwrap()
    }

    #[test]
    fn created_event_invalidates_cache_exactly_once() {
        let runtime = Runtime::new().unwrap();
        let mut app = test_app(&runtime);
        assert_eq!(app.cache.invalidation_count(), 0);

        app.handle_task_event(TaskEvent::Created(created_task()));
        assert_eq!(app.cache.invalidation_count(), 1);
        assert!(app.status_message.contains("Water plants"));
    }

    #[test]
    fn submit_dismisses_the_form_before_any_outcome_arrives() {
        let runtime = Runtime::new().unwrap();
        let mut app = test_app(&runtime);
        app.state = AppState::AddTask;
        app.draft_form.title = InputField::with_value("Water plants");
        app.draft_form.description = InputField::with_value("Daily watering");
        while app.draft_form.selected_frequency() != Some(Frequency::Daily) {
            app.draft_form.cycle_frequency(true);
        }

        app.submit_draft();
        assert!(matches!(app.state, AppState::Board));
        assert!(app.status_message.contains("Creating"));
        // No outcome has been processed yet.
        assert_eq!(app.cache.invalidation_count(), 0);
    }

    #[test]
    fn invalid_submit_is_a_no_op() {
        let runtime = Runtime::new().unwrap();
        let mut app = test_app(&runtime);
        app.state = AppState::AddTask;
        // Title left blank.
        app.draft_form.description = InputField::with_value("Daily watering");

        app.submit_draft();
        assert!(matches!(app.state, AppState::AddTask));
        assert!(!app.status_message.is_empty());
    }

    #[test]
    fn failed_submission_is_kept_for_retry() {
        let runtime = Runtime::new().unwrap();
        let mut app = test_app(&runtime);

        let form = crate::draft::TaskDraft {
            title: "Water plants".to_string(),
            description: "Daily watering".to_string(),
            start: chrono::Utc::now(),
            recurrence: Some(crate::draft::Recurrence::Daily),
        }
        .assemble()
        .unwrap();

        app.handle_task_event(TaskEvent::CreateFailed {
            destination: app.context.destination.clone(),
            form,
            error: "network error".to_string(),
        });
        assert!(app.failed_submit.is_some());
        assert!(app.status_message.contains("retry"));
        // The cache was not invalidated for a failure.
        assert_eq!(app.cache.invalidation_count(), 0);
    }
}
