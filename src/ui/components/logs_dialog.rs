//! Modal listing the in-memory log buffer.

use crate::constants::DIALOG_TITLE_LOGS;
use crate::logger::Logger;
use crate::ui::core::{Action, Component};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

pub struct LogsDialog {
    logger: Logger,
    visible: bool,
    scroll_offset: usize,
}

impl LogsDialog {
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            visible: false,
            scroll_offset: 0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    fn show(&mut self, visible: bool) {
        self.visible = visible;
        self.scroll_offset = 0;
    }

    fn scroll_down(&mut self) {
        let max = self.logger.len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + 1).min(max);
    }

    fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

fn message_style(message: &str, fallback: Style) -> Style {
    if message.starts_with("ERROR") || message.contains("Failed") {
        Style::default().fg(Color::Red)
    } else if message.starts_with("WARN") {
        Style::default().fg(Color::Yellow)
    } else if message.contains("Done") || message.contains("enabled") {
        Style::default().fg(Color::Green)
    } else if message.contains("pressed") || message.contains("started") {
        Style::default().fg(Color::Cyan)
    } else {
        fallback
    }
}

fn log_item(index: usize, log: &str) -> ListItem<'static> {
    let style = if index % 2 == 0 {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    // Entries look like "[timestamp] message"
    match log.find("] ") {
        Some(bracket_end) if log.starts_with('[') => {
            let timestamp = &log[1..bracket_end];
            let message = &log[bracket_end + 2..];
            ListItem::new(Line::from(vec![
                Span::styled(format!("[{}] ", timestamp), Style::default().fg(Color::DarkGray)),
                Span::styled(message.to_string(), message_style(message, style)),
            ]))
        }
        _ => ListItem::new(Line::from(Span::styled(log.to_string(), style))),
    }
}

impl Component for LogsDialog {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('G') => Action::ShowLogs(false),
            KeyCode::Down | KeyCode::Char('j') => Action::LogsScrollDown,
            KeyCode::Up | KeyCode::Char('k') => Action::LogsScrollUp,
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::ShowLogs(visible) => {
                self.show(visible);
                Action::None
            }
            Action::LogsScrollDown => {
                self.scroll_down();
                Action::None
            }
            Action::LogsScrollUp => {
                self.scroll_up();
                Action::None
            }
            other => other,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        if !self.visible {
            return;
        }

        // Take 80% of the screen
        let modal_width = rect.width.saturating_mul(8) / 10;
        let modal_height = rect.height.saturating_mul(8) / 10;
        let modal_area = Rect {
            x: rect.x + (rect.width.saturating_sub(modal_width)) / 2,
            y: rect.y + (rect.height.saturating_sub(modal_height)) / 2,
            width: modal_width,
            height: modal_height,
        };

        f.render_widget(Clear, modal_area);
        let block = Block::default()
            .title(DIALOG_TITLE_LOGS)
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black))
            .border_style(Style::default().fg(Color::Cyan));
        f.render_widget(block, modal_area);

        let inner_area = modal_area.inner(Margin {
            vertical: 1,
            horizontal: 1,
        });
        let [header, content] = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner_area);

        let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let text = Style::default().fg(Color::Gray);
        let hint = Paragraph::new(Line::from(vec![
            Span::styled("Press ", text),
            Span::styled("Esc", key),
            Span::styled(" to close, ", text),
            Span::styled("↑/↓", key),
            Span::styled(" or ", text),
            Span::styled("j/k", key),
            Span::styled(" to scroll", text),
        ]))
        .alignment(Alignment::Center);
        f.render_widget(hint, header);

        let logs = self.logger.get_logs();
        if logs.is_empty() {
            let empty = Paragraph::new("No logs yet")
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            f.render_widget(empty, content);
            return;
        }

        let visible_height = content.height as usize;
        let start = self.scroll_offset.min(logs.len().saturating_sub(1));
        let end = (start + visible_height).min(logs.len());

        let items: Vec<ListItem> = logs[start..end]
            .iter()
            .enumerate()
            .map(|(i, log)| log_item(start + i, log))
            .collect();
        f.render_widget(List::new(items), content);

        if logs.len() > visible_height {
            let info = format!("Showing {}-{} of {} logs", start + 1, end, logs.len());
            let width = info.len() as u16 + 2;
            let info_area = Rect {
                x: content.x + content.width.saturating_sub(width),
                y: content.y + content.height.saturating_sub(1),
                width: width.min(content.width),
                height: 1,
            };
            let indicator = Paragraph::new(info)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Right);
            f.render_widget(indicator, info_area);
        }
    }
}
