use crate::components::common::{Msg, PopupActivityMsg};
use crate::components::state::ComponentState;
use crate::error::AppError;
use crate::theme::ThemeManager;
use tui_realm_stdlib::Phantom;
use tuirealm::{
    Component, Event, MockComponent, NoUserEvent,
    event::{Key, KeyEvent},
    props::Color,
    ratatui::{
        Frame,
        layout::{Alignment, Rect},
        style::{Modifier, Style},
        text::{Line, Text},
        widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    },
};

/// Modal for errors and warnings; Enter or Esc closes it.
pub struct ErrorPopup {
    component: Phantom,
    title: &'static str,
    color: Color,
    message: String,
    is_mounted: bool,
}

impl ErrorPopup {
    pub fn new(error: &AppError) -> Self {
        Self {
            component: Phantom::default(),
            title: " ❌ Erro ",
            color: ThemeManager::status_error(),
            message: error.message().to_string(),
            is_mounted: false,
        }
    }

    pub fn warning(message: &str) -> Self {
        Self {
            component: Phantom::default(),
            title: " ⚠️ Aviso ",
            color: ThemeManager::status_warning(),
            message: message.to_string(),
            is_mounted: false,
        }
    }
}

impl MockComponent for ErrorPopup {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.color))
            .title(self.title)
            .title_alignment(Alignment::Center);

        let mut lines = vec![Line::from("")];
        lines.extend(self.message.lines().map(Line::from));

        let paragraph = Paragraph::new(Text::from(lines))
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(
                Style::default()
                    .fg(self.color)
                    .add_modifier(Modifier::BOLD),
            );

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

impl Component<Msg, NoUserEvent> for ErrorPopup {
    fn on(&mut self, ev: Event<NoUserEvent>) -> Option<Msg> {
        match ev {
            Event::Keyboard(KeyEvent {
                code: Key::Enter | Key::Esc,
                ..
            }) => Some(Msg::PopupActivity(PopupActivityMsg::CloseError)),
            _ => None,
        }
    }
}

impl ComponentState for ErrorPopup {
    fn mount(&mut self) -> crate::error::AppResult<()> {
        log::debug!("Mounting ErrorPopup component");

        if self.is_mounted {
            log::warn!("ErrorPopup is already mounted");
            return Ok(());
        }

        self.is_mounted = true;
        Ok(())
    }
}

impl Drop for ErrorPopup {
    fn drop(&mut self) {
        log::debug!("Dropping ErrorPopup component");
        self.is_mounted = false;
    }
}
