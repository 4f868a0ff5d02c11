use tui_realm_stdlib::Phantom;
use tuirealm::command::{Cmd, CmdResult};
use tuirealm::props::{Alignment, Color, Style, TextModifiers};
use tuirealm::ratatui::layout::Rect;
use tuirealm::ratatui::text::{Line, Span};
use tuirealm::ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tuirealm::{Component, Event, Frame, MockComponent, NoUserEvent, State};

use super::common::Msg;
use crate::theme::ThemeManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteKind {
    Muted,
    Warning,
    Error,
}

/// Read-only titled panel of `label: value` rows followed by free-text
/// notes. Used for the booking summary and the client profile.
pub struct DetailsPanel {
    component: Phantom,
    title: String,
    rows: Vec<(String, String)>,
    notes: Vec<(NoteKind, String)>,
}

impl DetailsPanel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            component: Phantom::default(),
            title: title.into(),
            rows: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn row(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.rows.push((label.into(), value.into()));
        self
    }

    pub fn note(mut self, kind: NoteKind, text: impl Into<String>) -> Self {
        self.notes.push((kind, text.into()));
        self
    }

    fn note_color(kind: NoteKind) -> Color {
        match kind {
            NoteKind::Muted => ThemeManager::text_muted(),
            NoteKind::Warning => ThemeManager::status_warning(),
            NoteKind::Error => ThemeManager::status_error(),
        }
    }
}

impl MockComponent for DetailsPanel {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let label_style = Style::default()
            .fg(ThemeManager::title_accent())
            .add_modifier(TextModifiers::BOLD);

        let mut lines: Vec<Line> = self
            .rows
            .iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{label}: "), label_style),
                    Span::styled(value.as_str(), Style::default().fg(ThemeManager::text_primary())),
                ])
            })
            .collect();

        if !self.notes.is_empty() {
            lines.push(Line::from(""));
        }
        for (kind, text) in &self.notes {
            lines.push(Line::from(Span::styled(
                text.as_str(),
                Style::default().fg(Self::note_color(*kind)),
            )));
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ThemeManager::primary_accent()))
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center);

        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }

    fn query(&self, attr: tuirealm::Attribute) -> Option<tuirealm::AttrValue> {
        self.component.query(attr)
    }

    fn attr(&mut self, attr: tuirealm::Attribute, value: tuirealm::AttrValue) {
        self.component.attr(attr, value);
    }

    fn state(&self) -> State {
        State::None
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, NoUserEvent> for DetailsPanel {
    fn on(&mut self, _: Event<NoUserEvent>) -> Option<Msg> {
        None
    }
}
