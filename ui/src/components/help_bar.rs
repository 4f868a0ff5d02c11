use tuirealm::props::Alignment;
use tuirealm::ratatui::layout::Rect;
use tuirealm::ratatui::style::Style;
use tuirealm::ratatui::text::{Line, Span, Text};
use tuirealm::ratatui::widgets::Paragraph;
use tuirealm::Frame;

use crate::components::common::ComponentId;
use crate::config::{self, KeyBindingsConfig};
use crate::theme::ThemeManager;

/// Bottom line of key hints for the focused component plus the global
/// shortcuts. Drawn directly by the view, never mounted.
pub struct HelpBar {
    style: Style,
}

impl Default for HelpBar {
    fn default() -> Self {
        Self::new()
    }
}

fn key(c: char) -> String {
    format!("[{c}]")
}

impl HelpBar {
    pub fn new() -> Self {
        Self {
            style: Style::default()
                .fg(ThemeManager::shortcut_description())
                .bg(ThemeManager::help_bar_bg()),
        }
    }

    fn get_global_shortcuts(
        &self,
        keys: &KeyBindingsConfig,
        is_authenticated: bool,
    ) -> Vec<(String, bool)> {
        let mut shortcuts = vec![
            (key(keys.home()), true),
            (" Início ".to_string(), false),
            (key(keys.services()), true),
            (" Serviços ".to_string(), false),
            (key(keys.barbers()), true),
            (" Barbeiros ".to_string(), false),
            (key(keys.booking()), true),
            (" Agendar ".to_string(), false),
            (key(keys.client_area()), true),
            (" Minha área ".to_string(), false),
        ];
        if is_authenticated {
            shortcuts.push((key(keys.logout()), true));
            shortcuts.push((" Sair da conta ".to_string(), false));
        } else {
            shortcuts.push((key(keys.login()), true));
            shortcuts.push((" Entrar ".to_string(), false));
        }
        shortcuts.push((key(keys.quit()), true));
        shortcuts.push((" Fechar".to_string(), false));
        shortcuts
    }

    fn get_context_shortcuts(
        &self,
        keys: &KeyBindingsConfig,
        active_component: &ComponentId,
    ) -> Vec<(String, bool)> {
        let updown = format!("[↑↓/{}{}]", keys.up(), keys.down());
        match active_component {
            ComponentId::CalendarPicker => vec![
                (format!("[←→/{}{}]", keys.prev_day(), keys.next_day()), true),
                (" Data ".to_string(), false),
                ("[Enter]".to_string(), true),
                (" Agendar ".to_string(), false),
            ],
            ComponentId::ServiceList | ComponentId::BarberList => vec![
                (updown, true),
                (" Navegar ".to_string(), false),
                ("[Enter]".to_string(), true),
                (" Agendar ".to_string(), false),
            ],
            ComponentId::WizardList => vec![
                (updown, true),
                (" Navegar ".to_string(), false),
                ("[Enter]".to_string(), true),
                (" Escolher ".to_string(), false),
                ("[Esc]".to_string(), true),
                (" Voltar ".to_string(), false),
                (format!("[{}{}]", keys.prev_day(), keys.next_day()), true),
                (" Data ".to_string(), false),
                (key(keys.payment()), true),
                (" Pagamento ".to_string(), false),
                (key(keys.confirm()), true),
                (" Confirmar ".to_string(), false),
            ],
            ComponentId::RecentBookings => vec![
                (updown, true),
                (" Navegar ".to_string(), false),
                ("[Enter]".to_string(), true),
                (" Agendar de novo ".to_string(), false),
                (key(keys.edit_profile()), true),
                (" Editar perfil ".to_string(), false),
            ],
            ComponentId::InputForm => vec![
                ("[Tab]".to_string(), true),
                (" Próximo campo ".to_string(), false),
                ("[Enter]".to_string(), true),
                (" Enviar ".to_string(), false),
                ("[Esc]".to_string(), true),
                (" Voltar ".to_string(), false),
            ],
            ComponentId::ErrorPopup | ComponentId::SuccessPopup => vec![
                ("[Enter/Esc]".to_string(), true),
                (" Fechar ".to_string(), false),
            ],
            _ => vec![],
        }
    }

    fn get_help_text(
        &self,
        active_component: &ComponentId,
        is_authenticated: bool,
    ) -> Vec<(String, bool)> {
        let keys = config::get_config_or_panic().keys();
        let mut shortcuts = self.get_context_shortcuts(keys, active_component);
        // Forms own every character key
        if *active_component != ComponentId::InputForm {
            shortcuts.extend(self.get_global_shortcuts(keys, is_authenticated));
        }
        shortcuts
    }

    pub fn view_with_active(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        active_component: &ComponentId,
        is_authenticated: bool,
    ) {
        let help_text = self.get_help_text(active_component, is_authenticated);
        let mut spans: Vec<Span> = Vec::new();

        for (i, (text, highlight)) in help_text.iter().enumerate() {
            if i > 0 && i % 2 == 0 {
                spans.push(Span::styled(
                    " | ",
                    Style::default().fg(ThemeManager::text_muted()),
                ));
            }

            if *highlight {
                spans.push(Span::styled(
                    text.clone(),
                    Style::default().fg(ThemeManager::shortcut_key()),
                ));
            } else {
                spans.push(Span::raw(text.clone()));
            }
        }

        let paragraph = Paragraph::new(Text::from(Line::from(spans)))
            .style(self.style)
            .alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }
}
