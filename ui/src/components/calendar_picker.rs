use tuirealm::command::{Cmd, CmdResult};
use tuirealm::event::{Key, KeyEvent};
use tuirealm::props::{Alignment, Style, TextModifiers};
use tuirealm::ratatui::layout::Rect;
use tuirealm::ratatui::text::{Line, Span};
use tuirealm::ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tuirealm::{Component, Event, Frame, MockComponent, NoUserEvent, State};

use super::common::{CalendarActivityMsg, Msg};
use crate::app::router::Route;
use crate::theme::ThemeManager;

/// Landing page date chooser. Shows the active booking date and the
/// current service/barber selection; Enter starts booking.
pub struct CalendarPicker {
    date_label: String,
    at_earliest: bool,
    selection: Vec<(String, String)>,
}

impl CalendarPicker {
    pub fn new(date_label: String, at_earliest: bool, selection: Vec<(String, String)>) -> Self {
        Self {
            date_label,
            at_earliest,
            selection,
        }
    }
}

impl MockComponent for CalendarPicker {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let accent = ThemeManager::title_accent();
        let prev = if self.at_earliest { "   " } else { "◀  " };

        let mut lines = vec![
            Line::from(""),
            Line::from("Escolha a data do seu atendimento"),
            Line::from(""),
            Line::from(vec![
                Span::styled(prev, Style::default().fg(ThemeManager::text_muted())),
                Span::styled(
                    self.date_label.clone(),
                    Style::default().fg(accent).add_modifier(TextModifiers::BOLD),
                ),
                Span::styled("  ▶", Style::default().fg(ThemeManager::text_muted())),
            ]),
            Line::from(""),
        ];

        for (label, value) in &self.selection {
            lines.push(Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(accent)),
                Span::raw(value.clone()),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Enter para agendar",
            Style::default().fg(ThemeManager::text_muted()),
        )));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ThemeManager::primary_accent()))
            .title(" Agende seu horário ")
            .title_alignment(Alignment::Center);

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn query(&self, _attr: tuirealm::Attribute) -> Option<tuirealm::AttrValue> {
        None
    }

    fn attr(&mut self, _attr: tuirealm::Attribute, _value: tuirealm::AttrValue) {}

    fn state(&self) -> State {
        State::None
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, NoUserEvent> for CalendarPicker {
    fn on(&mut self, ev: Event<NoUserEvent>) -> Option<Msg> {
        match ev {
            Event::Keyboard(KeyEvent { code: Key::Left, .. }) => {
                Some(Msg::CalendarActivity(CalendarActivityMsg::PrevDay))
            }
            Event::Keyboard(KeyEvent {
                code: Key::Right, ..
            }) => Some(Msg::CalendarActivity(CalendarActivityMsg::NextDay)),
            Event::Keyboard(KeyEvent {
                code: Key::Enter, ..
            }) => Some(Msg::Navigate(Route::Booking)),
            _ => None,
        }
    }
}
