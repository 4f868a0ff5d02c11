use crate::components::common::Msg;
use crate::components::state::ComponentState;
use crate::theme::ThemeManager;
use std::time::{Duration, Instant};
use tui_realm_stdlib::Label;
use tuirealm::{
    Component, Event, MockComponent,
    event::NoUserEvent,
    props::{Alignment, AttrValue, Attribute},
};

const SPINNER_FRAMES: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];
const FRAME_DURATION: Duration = Duration::from_millis(100);

#[derive(MockComponent)]
pub struct LoadingIndicator {
    component: Label,
    message: String,
    frame_index: usize,
    last_frame_time: Instant,
    is_mounted: bool,
}

impl LoadingIndicator {
    pub fn new(message: &str) -> Self {
        let mut component = Label::default();
        component.attr(
            Attribute::Text,
            AttrValue::String(format!("{} {}", SPINNER_FRAMES[0], message)),
        );
        component.attr(
            Attribute::Foreground,
            AttrValue::Color(ThemeManager::status_loading()),
        );
        component.attr(
            Attribute::Alignment,
            AttrValue::Alignment(Alignment::Center),
        );

        log::debug!("Created new LoadingIndicator with message: {message}");

        Self {
            component,
            message: message.to_string(),
            frame_index: 0,
            last_frame_time: Instant::now(),
            is_mounted: false,
        }
    }

    fn update_animation(&mut self) {
        let now = Instant::now();
        if now.duration_since(self.last_frame_time) >= FRAME_DURATION {
            self.frame_index = (self.frame_index + 1) % SPINNER_FRAMES.len();
            self.last_frame_time = now;

            let display_text = format!("{} {}", SPINNER_FRAMES[self.frame_index], self.message);
            self.component
                .attr(Attribute::Text, AttrValue::String(display_text));
        }
    }
}

impl Component<Msg, NoUserEvent> for LoadingIndicator {
    fn on(&mut self, ev: Event<NoUserEvent>) -> Option<Msg> {
        match ev {
            Event::Tick => {
                self.update_animation();
                Some(Msg::ForceRedraw)
            }
            _ => None,
        }
    }
}

impl ComponentState for LoadingIndicator {
    fn mount(&mut self) -> crate::error::AppResult<()> {
        log::debug!("Mounting LoadingIndicator component");

        if self.is_mounted {
            log::warn!("LoadingIndicator is already mounted");
            return Ok(());
        }

        self.frame_index = 0;
        self.last_frame_time = Instant::now();
        let display_text = format!("{} {}", SPINNER_FRAMES[0], self.message);
        self.component
            .attr(Attribute::Text, AttrValue::String(display_text));

        self.is_mounted = true;
        Ok(())
    }
}

impl Drop for LoadingIndicator {
    fn drop(&mut self) {
        log::debug!("Dropping LoadingIndicator component");
        self.is_mounted = false;
    }
}
