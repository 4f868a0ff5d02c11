use tuirealm::command::{Cmd, CmdResult};
use tuirealm::event::{Key, KeyEvent};
use tuirealm::props::{Alignment, Style, TextModifiers};
use tuirealm::ratatui::layout::Rect;
use tuirealm::ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use tuirealm::{Component, Event, Frame, MockComponent, NoUserEvent, State, StateValue};

use super::common::{ComponentId, ListActivityMsg, Msg};
use crate::config;
use crate::theme::ThemeManager;

const CMD_RESULT_PICKED: &str = "Picked";

/// Bordered single-selection list. Rows are preformatted display strings;
/// picking reports the row index tagged with the picker's id.
pub struct ListPicker {
    id: ComponentId,
    title: String,
    rows: Vec<String>,
    placeholder: Option<String>,
    selected: usize,
}

impl ListPicker {
    pub fn new(id: ComponentId, title: impl Into<String>, rows: Vec<String>) -> Self {
        Self {
            id,
            title: title.into(),
            rows,
            placeholder: None,
            selected: 0,
        }
    }

    /// Text shown instead of the list while it has no rows.
    pub fn with_placeholder(mut self, text: impl Into<String>) -> Self {
        self.placeholder = Some(text.into());
        self
    }

    pub fn with_selected(mut self, index: usize) -> Self {
        self.selected = index.min(self.rows.len().saturating_sub(1));
        self
    }

    fn block(&self) -> Block<'_> {
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ThemeManager::primary_accent()))
            .title(format!(" {} ", self.title))
            .title_style(Style::default().fg(ThemeManager::title_accent()))
            .title_alignment(Alignment::Center)
    }
}

impl MockComponent for ListPicker {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        if self.rows.is_empty() {
            let text = self.placeholder.clone().unwrap_or_default();
            let paragraph = Paragraph::new(text)
                .block(self.block())
                .alignment(Alignment::Center)
                .style(Style::default().fg(ThemeManager::text_muted()))
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = self.rows.iter().map(|row| ListItem::new(row.as_str())).collect();
        let list = List::new(items)
            .block(self.block())
            .style(Style::default().fg(ThemeManager::text_primary()))
            .highlight_style(
                Style::default()
                    .fg(ThemeManager::selection_fg())
                    .add_modifier(TextModifiers::REVERSED),
            )
            .highlight_symbol("> ");
        let mut state = ListState::default().with_selected(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn query(&self, _attr: tuirealm::Attribute) -> Option<tuirealm::AttrValue> {
        None
    }

    fn attr(&mut self, _attr: tuirealm::Attribute, _value: tuirealm::AttrValue) {}

    fn state(&self) -> State {
        if self.rows.is_empty() {
            State::None
        } else {
            State::One(StateValue::Usize(self.selected))
        }
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, NoUserEvent> for ListPicker {
    fn on(&mut self, ev: Event<NoUserEvent>) -> Option<Msg> {
        let keys = config::get_config_or_panic().keys();
        let cmd_result = match ev {
            Event::Keyboard(KeyEvent { code: Key::Down, .. }) => self.move_down(),
            Event::Keyboard(KeyEvent {
                code: Key::Char(c), ..
            }) if c == keys.down() => self.move_down(),
            Event::Keyboard(KeyEvent { code: Key::Up, .. }) => self.move_up(),
            Event::Keyboard(KeyEvent {
                code: Key::Char(c), ..
            }) if c == keys.up() => self.move_up(),
            Event::Keyboard(KeyEvent {
                code: Key::Enter, ..
            }) => {
                if self.rows.is_empty() {
                    CmdResult::None
                } else {
                    CmdResult::Custom(CMD_RESULT_PICKED, self.state())
                }
            }
            Event::Keyboard(KeyEvent { code: Key::Esc, .. }) => {
                return Some(Msg::ListActivity(ListActivityMsg::Back(self.id.clone())));
            }
            _ => CmdResult::None,
        };

        match cmd_result {
            CmdResult::Custom(CMD_RESULT_PICKED, State::One(StateValue::Usize(index))) => {
                Some(Msg::ListActivity(ListActivityMsg::Picked {
                    list: self.id.clone(),
                    index,
                }))
            }
            CmdResult::Changed(_) => Some(Msg::ForceRedraw),
            _ => None,
        }
    }
}

impl ListPicker {
    fn move_down(&mut self) -> CmdResult {
        if self.selected + 1 < self.rows.len() {
            self.selected += 1;
        }
        CmdResult::Changed(self.state())
    }

    fn move_up(&mut self) -> CmdResult {
        self.selected = self.selected.saturating_sub(1);
        CmdResult::Changed(self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tuirealm::event::KeyModifiers;

    fn key(code: Key) -> Event<NoUserEvent> {
        Event::Keyboard(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn picker() -> ListPicker {
        ListPicker::new(
            ComponentId::ServiceList,
            "Serviços",
            vec!["Barba".to_string(), "Corte".to_string()],
        )
    }

    #[test]
    fn test_enter_reports_the_selected_index() {
        let mut list = picker();
        assert_eq!(list.on(key(Key::Down)), Some(Msg::ForceRedraw));
        assert_eq!(list.on(key(Key::Down)), Some(Msg::ForceRedraw));
        assert_eq!(
            list.on(key(Key::Enter)),
            Some(Msg::ListActivity(ListActivityMsg::Picked {
                list: ComponentId::ServiceList,
                index: 1
            }))
        );
    }

    #[test]
    fn test_empty_list_ignores_enter() {
        let mut list =
            ListPicker::new(ComponentId::BarberList, "Barbeiros", Vec::new()).with_placeholder("…");
        assert_eq!(list.state(), State::None);
        assert_eq!(list.on(key(Key::Enter)), None);
    }

    #[test]
    fn test_esc_goes_back_and_selection_is_clamped() {
        let mut list = picker().with_selected(10);
        assert_eq!(list.state(), State::One(StateValue::Usize(1)));
        assert_eq!(
            list.on(key(Key::Esc)),
            Some(Msg::ListActivity(ListActivityMsg::Back(
                ComponentId::ServiceList
            )))
        );
    }
}
