//! Terminal rendering of the sync panel.

use crate::constants::{
    KEY_HINTS, LOCALES_SECTION_TITLE, LOCALE_NONE, PANEL_HIDDEN_HINT, PANEL_TITLE, PROGRESS_SECTION_TITLE,
};
use crate::panel::{FieldBinding, LocaleField, Outcome, ProgressView, SyncPanel, TriggerButton};
use crate::ui::core::{Action, Component};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Owns the [`SyncPanel`] plus the terminal-only state around it: whether it
/// is shown and which locale row is selected.
pub struct PanelComponent {
    panel: SyncPanel,
    visible: bool,
    locale_state: ListState,
}

impl PanelComponent {
    pub fn new(panel: SyncPanel) -> Self {
        Self {
            panel,
            visible: true,
            locale_state: ListState::default(),
        }
    }

    pub fn panel(&self) -> &SyncPanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut SyncPanel {
        &mut self.panel
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Selected locale row, clamped to the current list.
    pub fn selected_locale(&self) -> Option<usize> {
        let len = self.locale_count();
        self.locale_state.selected().filter(|_| len > 0).map(|i| i.min(len - 1))
    }

    pub fn selected_field(&self) -> Option<&LocaleField> {
        let row = self.selected_locale()?;
        self.panel.layout().locales.as_ref()?.fields().get(row)
    }

    pub fn select_next_locale(&mut self) {
        let len = self.locale_count();
        if len == 0 {
            self.locale_state.select(None);
            return;
        }
        let next = match self.selected_locale() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.locale_state.select(Some(next));
    }

    pub fn select_previous_locale(&mut self) {
        let len = self.locale_count();
        if len == 0 {
            self.locale_state.select(None);
            return;
        }
        let previous = match self.selected_locale() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.locale_state.select(Some(previous));
    }

    fn locale_count(&self) -> usize {
        self.panel.layout().locales.as_ref().map_or(0, |list| list.len())
    }

    fn render_labels(&self, f: &mut Frame, rect: Rect) {
        let layout = self.panel.layout();
        let name = layout.name_label.as_ref().map(|l| l.text()).unwrap_or_default();
        let timestamp = layout.timestamp_label.as_ref().map(|l| l.text()).unwrap_or_default();

        let text = vec![
            Line::from(Span::styled(
                name.to_string(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(timestamp.to_string(), Style::default().fg(Color::Gray))),
        ];
        f.render_widget(Paragraph::new(text), rect);
    }

    fn render_buttons(&self, f: &mut Frame, rect: Rect) {
        let triggers = &self.panel.layout().triggers;
        let mut spans = Vec::new();
        for (key, button) in [("p", triggers.project_button()), ("c", triggers.containers_button())] {
            if let Some(button) = button {
                spans.extend(button_spans(key, button));
                spans.push(Span::raw("  "));
            }
        }
        f.render_widget(Paragraph::new(Line::from(spans)), rect);
    }

    fn render_progress(&self, f: &mut Frame, rect: Rect) {
        let block = Block::default()
            .title(PROGRESS_SECTION_TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(rect);
        f.render_widget(block, rect);

        let Some(registry) = self.panel.layout().progress.as_ref() else {
            return;
        };
        if registry.is_empty() {
            let idle = Paragraph::new("Nothing running").style(Style::default().fg(Color::DarkGray));
            f.render_widget(idle, inner);
            return;
        }

        let rows = Layout::vertical(vec![Constraint::Length(1); registry.len()]).split(inner);
        for ((_, indicator), row) in registry.iter().zip(rows.iter()) {
            let view = indicator.view();
            f.render_widget(gauge(&view), *row);
        }
    }

    fn render_locales(&mut self, f: &mut Frame, rect: Rect) {
        let block = Block::default()
            .title(LOCALES_SECTION_TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let items: Vec<ListItem> = self
            .panel
            .layout()
            .locales
            .as_ref()
            .map(|list| list.fields().iter().map(locale_item).collect())
            .unwrap_or_default();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
            .highlight_symbol("> ");

        let selected = self.selected_locale();
        self.locale_state.select(selected);
        f.render_stateful_widget(list, rect, &mut self.locale_state);
    }
}

fn button_spans(key: &str, button: &TriggerButton) -> Vec<Span<'static>> {
    let style = if button.is_enabled() {
        Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray).bg(Color::Black)
    };
    vec![
        Span::styled(format!("[{}]", key), Style::default().fg(Color::Yellow)),
        Span::raw(" "),
        Span::styled(format!(" {} ", button.label()), style),
    ]
}

fn gauge(view: &ProgressView) -> LineGauge<'static> {
    let color = match view.outcome() {
        Some(Outcome::Done) => Color::Green,
        Some(Outcome::Failed) => Color::Red,
        None => Color::Yellow,
    };
    LineGauge::default()
        .label(format!("{} ", view.title()))
        .ratio(f64::from(view.value()).clamp(0.0, 1.0))
        .filled_style(Style::default().fg(color))
        .unfilled_style(Style::default().fg(Color::DarkGray))
}

fn locale_item(field: &LocaleField) -> ListItem<'static> {
    let value = field
        .value
        .as_ref()
        .map(|locale| locale.to_string())
        .unwrap_or_else(|| LOCALE_NONE.to_string());
    let value_style = if field.value.is_some() {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![
        Span::styled(format!("{:<6}", field.label), Style::default().fg(Color::Cyan)),
        Span::styled(value, value_style),
    ];
    // Session-only values are lost on restart
    if let FieldBinding::WriteBack(_) = field.binding {
        spans.push(Span::styled(" (unsaved)", Style::default().fg(Color::DarkGray)));
    }
    ListItem::new(Line::from(spans))
}

impl Component for PanelComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('v') => Action::TogglePanel,
            KeyCode::Char('G') => Action::ShowLogs(true),
            // Hidden panel only answers to the keys above
            _ if !self.visible => Action::None,
            KeyCode::Char('p') => Action::SyncProject,
            KeyCode::Char('c') => Action::SyncContainers,
            KeyCode::Down | KeyCode::Char('j') => Action::SelectNextLocale,
            KeyCode::Up | KeyCode::Char('k') => Action::SelectPreviousLocale,
            KeyCode::Enter => Action::CycleLocale,
            KeyCode::Backspace | KeyCode::Delete => Action::ClearLocale,
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::SelectNextLocale => {
                self.select_next_locale();
                Action::None
            }
            Action::SelectPreviousLocale => {
                self.select_previous_locale();
                Action::None
            }
            other => other,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let outer = Block::default()
            .title(PANEL_TITLE)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = outer.inner(rect);
        f.render_widget(outer, rect);

        let [body, hints] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);
        let hint = Paragraph::new(KEY_HINTS)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        f.render_widget(hint, hints);

        if !self.visible {
            let hidden = Paragraph::new(PANEL_HIDDEN_HINT)
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(hidden, body);
            return;
        }

        let progress_rows = self
            .panel
            .layout()
            .progress
            .as_ref()
            .map_or(1, |registry| registry.len().max(1)) as u16;

        let [labels, buttons, progress, locales] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Length(progress_rows + 2),
            Constraint::Min(3),
        ])
        .areas(body);

        self.render_labels(f, labels);
        self.render_buttons(f, buttons);
        self.render_progress(f, progress);
        self.render_locales(f, locales);
    }
}
