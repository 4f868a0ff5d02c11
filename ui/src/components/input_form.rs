use tuirealm::command::{Cmd, CmdResult};
use tuirealm::event::{Key, KeyEvent, KeyModifiers};
use tuirealm::props::{Alignment, Style, TextModifiers};
use tuirealm::ratatui::layout::Rect;
use tuirealm::ratatui::text::{Line, Span};
use tuirealm::ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};
use tuirealm::{Component, Event, Frame, MockComponent, NoUserEvent, State, StateValue};
use zeroize::Zeroize;

use super::common::{FormActivityMsg, Msg};
use super::state::ComponentState;
use crate::error::AppResult;
use crate::theme::ThemeManager;
use crate::utils::format::{digits_only, mask_cpf, mask_phone};

const CPF_DIGITS: usize = 11;
const PHONE_DIGITS: usize = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Login,
    Register,
    Profile,
}

impl FormKind {
    fn title(&self) -> &'static str {
        match self {
            FormKind::Login => "Entrar",
            FormKind::Register => "Criar conta",
            FormKind::Profile => "Editar perfil",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Text,
    Email,
    Secret,
    Cpf,
    Phone,
}

struct Field {
    label: &'static str,
    kind: FieldKind,
    value: String,
}

impl Field {
    fn new(label: &'static str, kind: FieldKind) -> Self {
        Self {
            label,
            kind,
            value: String::new(),
        }
    }

    fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    fn push(&mut self, c: char) {
        match self.kind {
            FieldKind::Cpf | FieldKind::Phone => {
                if !c.is_ascii_digit() {
                    return;
                }
                let mut digits = digits_only(&self.value);
                let limit = if self.kind == FieldKind::Cpf {
                    CPF_DIGITS
                } else {
                    PHONE_DIGITS
                };
                if digits.len() >= limit {
                    return;
                }
                digits.push(c);
                self.value = self.masked(&digits);
            }
            _ => self.value.push(c),
        }
    }

    fn pop(&mut self) {
        match self.kind {
            FieldKind::Cpf | FieldKind::Phone => {
                let mut digits = digits_only(&self.value);
                digits.pop();
                self.value = self.masked(&digits);
            }
            _ => {
                self.value.pop();
            }
        }
    }

    fn masked(&self, digits: &str) -> String {
        if self.kind == FieldKind::Cpf {
            mask_cpf(digits)
        } else {
            mask_phone(digits)
        }
    }

    fn display(&self) -> String {
        if self.kind == FieldKind::Secret {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    fn validate(&self) -> Result<(), String> {
        let value = self.value.trim();
        if value.is_empty() {
            return Err(format!("Preencha o campo {}.", self.label));
        }
        match self.kind {
            FieldKind::Email => {
                let valid = value
                    .split_once('@')
                    .is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'));
                if !valid {
                    return Err("Email inválido.".to_string());
                }
            }
            FieldKind::Cpf if digits_only(value).len() != CPF_DIGITS => {
                return Err("CPF deve ter 11 dígitos.".to_string());
            }
            FieldKind::Phone if !(10..=PHONE_DIGITS).contains(&digits_only(value).len()) => {
                return Err("Telefone inválido.".to_string());
            }
            _ => {}
        }
        Ok(())
    }
}

/// Keyboard form for sign-in, sign-up and profile editing.
///
/// Field values stay inside the component: the host reads them through
/// [`MockComponent::state`] as a `State::Vec` of strings in field order,
/// trimmed. Secrets are wiped when the form is dropped.
pub struct InputForm {
    kind: FormKind,
    fields: Vec<Field>,
    focus: usize,
    error: Option<String>,
    is_mounted: bool,
}

impl InputForm {
    /// Fields: email, senha.
    pub fn login() -> Self {
        Self::with_fields(
            FormKind::Login,
            vec![
                Field::new("Email", FieldKind::Email),
                Field::new("Senha", FieldKind::Secret),
            ],
        )
    }

    /// Fields: nome, cpf, email, telefone, senha.
    pub fn register() -> Self {
        Self::with_fields(
            FormKind::Register,
            vec![
                Field::new("Nome", FieldKind::Text),
                Field::new("CPF", FieldKind::Cpf),
                Field::new("Email", FieldKind::Email),
                Field::new("Telefone", FieldKind::Phone),
                Field::new("Senha", FieldKind::Secret),
            ],
        )
    }

    /// Fields: nome, email, telefone, prefilled.
    pub fn profile(nome: &str, email: &str, telefone: &str) -> Self {
        Self::with_fields(
            FormKind::Profile,
            vec![
                Field::new("Nome", FieldKind::Text).with_value(nome),
                Field::new("Email", FieldKind::Email).with_value(email),
                Field::new("Telefone", FieldKind::Phone).with_value(telefone),
            ],
        )
    }

    fn with_fields(kind: FormKind, fields: Vec<Field>) -> Self {
        Self {
            kind,
            fields,
            focus: 0,
            error: None,
            is_mounted: false,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    fn validate(&self) -> Result<(), String> {
        self.fields.iter().try_for_each(Field::validate)
    }

    fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    fn focus_prev(&mut self) {
        self.focus = self.focus.checked_sub(1).unwrap_or(self.fields.len() - 1);
    }

    fn hint(&self) -> &'static str {
        match self.kind {
            FormKind::Login => "Tab: próximo campo • Enter: entrar • Ctrl+R: criar conta • Esc: voltar",
            FormKind::Register => "Tab: próximo campo • Enter: cadastrar • Ctrl+R: já tenho conta • Esc: voltar",
            FormKind::Profile => "Tab: próximo campo • Enter: salvar • Esc: cancelar",
        }
    }
}

impl MockComponent for InputForm {
    fn view(&mut self, frame: &mut Frame, area: Rect) {
        let accent = ThemeManager::title_accent();
        let mut lines = vec![Line::from("")];

        for (i, field) in self.fields.iter().enumerate() {
            let focused = i == self.focus;
            let marker = if focused { "> " } else { "  " };
            let mut value_style = Style::default().fg(ThemeManager::text_primary());
            if focused {
                value_style = value_style.add_modifier(TextModifiers::UNDERLINED);
            }
            let cursor = if focused { "▏" } else { "" };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(ThemeManager::selection_fg())),
                Span::styled(
                    format!("{:<9}", field.label),
                    Style::default().fg(accent).add_modifier(TextModifiers::BOLD),
                ),
                Span::styled(format!("{}{cursor}", field.display()), value_style),
            ]));
            lines.push(Line::from(""));
        }

        if let Some(error) = &self.error {
            lines.push(Line::from(Span::styled(
                error.as_str(),
                Style::default().fg(ThemeManager::status_error()),
            )));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            self.hint(),
            Style::default().fg(ThemeManager::text_muted()),
        )));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ThemeManager::primary_accent()))
            .title(format!(" {} ", self.kind.title()))
            .title_alignment(Alignment::Center);

        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }

    fn query(&self, _attr: tuirealm::Attribute) -> Option<tuirealm::AttrValue> {
        None
    }

    fn attr(&mut self, _attr: tuirealm::Attribute, _value: tuirealm::AttrValue) {}

    fn state(&self) -> State {
        State::Vec(
            self.fields
                .iter()
                .map(|field| StateValue::String(field.value.trim().to_string()))
                .collect(),
        )
    }

    fn perform(&mut self, _cmd: Cmd) -> CmdResult {
        CmdResult::None
    }
}

impl Component<Msg, NoUserEvent> for InputForm {
    fn on(&mut self, ev: Event<NoUserEvent>) -> Option<Msg> {
        let Event::Keyboard(KeyEvent { code, modifiers }) = ev else {
            return None;
        };

        match code {
            Key::Esc => return Some(Msg::FormActivity(FormActivityMsg::Cancel)),
            Key::Enter => {
                return match self.validate() {
                    Ok(()) => {
                        self.error = None;
                        Some(Msg::FormActivity(FormActivityMsg::Submit))
                    }
                    Err(message) => {
                        self.error = Some(message);
                        Some(Msg::ForceRedraw)
                    }
                };
            }
            Key::Char('r') | Key::Char('R')
                if modifiers.contains(KeyModifiers::CONTROL) && self.kind != FormKind::Profile =>
            {
                return Some(Msg::FormActivity(FormActivityMsg::ToggleMode));
            }
            Key::Tab | Key::Down => self.focus_next(),
            Key::BackTab | Key::Up => self.focus_prev(),
            Key::Backspace => self.fields[self.focus].pop(),
            Key::Char(c) if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.fields[self.focus].push(c);
            }
            _ => return None,
        }
        self.error = None;
        Some(Msg::ForceRedraw)
    }
}

impl ComponentState for InputForm {
    fn mount(&mut self) -> AppResult<()> {
        log::debug!("Mounting InputForm ({:?})", self.kind);
        if self.is_mounted {
            log::warn!("InputForm is already mounted");
            return Ok(());
        }
        self.is_mounted = true;
        Ok(())
    }
}

impl Drop for InputForm {
    fn drop(&mut self) {
        for field in &mut self.fields {
            field.value.zeroize();
        }
        self.is_mounted = false;
        log::debug!("InputForm dropped");
    }
}
