use crate::components::common::{Msg, PopupActivityMsg};
use crate::components::state::ComponentState;
use crate::theme::ThemeManager;
use tui_realm_stdlib::Phantom;
use tuirealm::{
    Component, Event, MockComponent, NoUserEvent,
    event::{Key, KeyEvent},
    ratatui::{
        Frame,
        layout::{Alignment, Rect},
        style::{Modifier, Style},
        text::{Line, Text},
        widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    },
};

pub struct SuccessPopup {
    component: Phantom,
    message: String,
    is_mounted: bool,
}

impl SuccessPopup {
    pub fn new(message: &str) -> Self {
        Self {
            component: Phantom::default(),
            message: message.to_string(),
            is_mounted: false,
        }
    }
}

impl MockComponent for SuccessPopup {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let style = Style::default()
            .fg(ThemeManager::status_success())
            .add_modifier(Modifier::BOLD);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ThemeManager::status_success()))
            .title(" ✅ Sucesso ")
            .title_alignment(Alignment::Center)
            .title_style(style);

        let mut lines = vec![Line::from("")];
        lines.extend(
            self.message
                .lines()
                .map(|line| Line::from(line).alignment(Alignment::Center)),
        );

        let paragraph = Paragraph::new(Text::from(lines))
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(style);

        frame.render_widget(paragraph, area);
    }

    fn query(&self, attr: tuirealm::Attribute) -> Option<tuirealm::AttrValue> {
        self.component.query(attr)
    }

    fn attr(&mut self, attr: tuirealm::Attribute, value: tuirealm::AttrValue) {
        self.component.attr(attr, value);
    }

    fn state(&self) -> tuirealm::State {
        self.component.state()
    }

    fn perform(&mut self, cmd: tuirealm::command::Cmd) -> tuirealm::command::CmdResult {
        self.component.perform(cmd)
    }
}

impl Component<Msg, NoUserEvent> for SuccessPopup {
    fn on(&mut self, ev: Event<NoUserEvent>) -> Option<Msg> {
        match ev {
            Event::Keyboard(KeyEvent {
                code: Key::Enter | Key::Esc,
                ..
            }) => Some(Msg::PopupActivity(PopupActivityMsg::CloseSuccess)),
            _ => None,
        }
    }
}

impl ComponentState for SuccessPopup {
    fn mount(&mut self) -> crate::error::AppResult<()> {
        log::debug!("Mounting SuccessPopup component");

        if self.is_mounted {
            log::warn!("SuccessPopup is already mounted");
            return Ok(());
        }

        self.is_mounted = true;
        Ok(())
    }
}

impl Drop for SuccessPopup {
    fn drop(&mut self) {
        log::debug!("Dropping SuccessPopup component");
        self.is_mounted = false;
    }
}
