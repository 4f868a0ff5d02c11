use crate::app::model::Model;
use crate::app::router::Route;
use crate::components::common::{AuthActivityMsg, ComponentId, FormActivityMsg, Msg};
use crate::components::input_form::{FormKind, InputForm};
use crate::components::state::ComponentStateMount;
use crate::error::{AppError, AppResult};
use crate::utils::format::digits_only;
use client::auth::AuthError;
use client::model::{LoginRequest, RegisterRequest, UserView};
use tuirealm::terminal::TerminalAdapter;
use tuirealm::{State, StateValue};

const AUTH_OPERATION: &str = "auth";

impl<T> Model<T>
where
    T: TerminalAdapter,
{
    pub fn open_form(&mut self, kind: FormKind) -> AppResult<()> {
        let form = match kind {
            FormKind::Login => InputForm::login(),
            FormKind::Register => InputForm::register(),
            FormKind::Profile => {
                let Some(profile) = self.profile.as_ref() else {
                    return Err(AppError::State(
                        "Dados do cliente ainda não carregados.".to_string(),
                    ));
                };
                InputForm::profile(&profile.nome, &profile.email, &profile.telefone)
            }
        };

        self.app
            .remount_with_state(ComponentId::InputForm, form, Vec::default())?;
        self.state_manager.form = Some(kind);
        self.state_manager.set_editing(true);
        self.update_global_key_watcher_editing_state()?;
        self.activate_component_for_current_state()
    }

    pub fn close_form(&mut self) -> AppResult<()> {
        if self.app.mounted(&ComponentId::InputForm) {
            self.app
                .umount(&ComponentId::InputForm)
                .map_err(|e| AppError::Component(e.to_string()))?;
        }
        if self.state_manager.form.take().is_some() {
            self.state_manager.set_editing(false);
            self.update_global_key_watcher_editing_state()?;
            self.activate_component_for_current_state()?;
        }
        Ok(())
    }

    pub fn update_form(&mut self, msg: FormActivityMsg) -> Option<Msg> {
        let Some(kind) = self.state_manager.form else {
            log::warn!("Form message without an open form: {msg:?}");
            return None;
        };

        let result = match msg {
            FormActivityMsg::Submit => self.submit_form(kind),
            FormActivityMsg::Cancel => match kind {
                FormKind::Login | FormKind::Register => {
                    self.state_manager.after_login = None;
                    return Some(Msg::Navigate(Route::Home));
                }
                FormKind::Profile => self.close_form(),
            },
            FormActivityMsg::ToggleMode => match kind {
                FormKind::Login => self.open_form(FormKind::Register),
                FormKind::Register => self.open_form(FormKind::Login),
                FormKind::Profile => Ok(()),
            },
        };
        result.err().map(Msg::Error)
    }

    fn submit_form(&mut self, kind: FormKind) -> AppResult<()> {
        let values = self.form_values()?;
        match kind {
            FormKind::Login => {
                let [email, senha]: [String; 2] = values
                    .try_into()
                    .map_err(|_| AppError::State("Formulário de login incompleto.".to_string()))?;
                self.sign_in(LoginRequest::new(email, senha));
                Ok(())
            }
            FormKind::Register => {
                let [nome, cpf, email, telefone, senha]: [String; 5] =
                    values.try_into().map_err(|_| {
                        AppError::State("Formulário de cadastro incompleto.".to_string())
                    })?;
                self.sign_up(RegisterRequest {
                    nome,
                    cpf: digits_only(&cpf),
                    email,
                    telefone: digits_only(&telefone),
                    senha,
                });
                Ok(())
            }
            FormKind::Profile => self.submit_profile(values),
        }
    }

    fn form_values(&self) -> AppResult<Vec<String>> {
        let state = self
            .app
            .state(&ComponentId::InputForm)
            .map_err(|e| AppError::Component(e.to_string()))?;

        match state {
            State::Vec(values) => Ok(values
                .into_iter()
                .filter_map(|value| match value {
                    StateValue::String(s) => Some(s),
                    _ => None,
                })
                .collect()),
            _ => Err(AppError::Component(
                "Formulário sem valores para enviar.".to_string(),
            )),
        }
    }

    fn sign_in(&self, request: LoginRequest) {
        let auth = self.auth.clone();
        let tx = self.task_manager.sender();
        self.task_manager
            .execute_cancellable(AUTH_OPERATION, "Entrando...", move |token| async move {
                let result = auth.sign_in(request, &token).await;
                signed_in(&tx, result)
            });
    }

    fn sign_up(&self, request: RegisterRequest) {
        let auth = self.auth.clone();
        let tx = self.task_manager.sender();
        self.task_manager
            .execute_cancellable(AUTH_OPERATION, "Criando conta...", move |token| async move {
                let result = auth.sign_up(request, &token).await;
                signed_in(&tx, result)
            });
    }

    pub fn update_auth(&mut self, msg: AuthActivityMsg) -> Option<Msg> {
        match msg {
            AuthActivityMsg::SignedIn(user) => {
                log::info!("Signed in as {}", user.id);
                let target = self
                    .state_manager
                    .after_login
                    .take()
                    .unwrap_or(Route::ClientArea);

                if let Err(e) = self.navigate(target) {
                    return Some(Msg::Error(e));
                }
                let greeting = format!("Bem-vindo, {}!", first_name(&user.nome));
                self.mount_success_popup(&greeting).err().map(Msg::Error)
            }
        }
    }

    pub fn update_logout(&mut self) -> Option<Msg> {
        if !self.is_authenticated() {
            return None;
        }
        if let Err(e) = self.auth.sign_out() {
            return Some(Msg::Error(e.into()));
        }
        // The session watch brings the pages back in line
        self.mount_success_popup("Você saiu da sua conta.")
            .err()
            .map(Msg::Error)
    }
}

fn signed_in(
    tx: &std::sync::mpsc::Sender<Msg>,
    result: Result<UserView, AuthError>,
) -> AppResult<()> {
    match result {
        Ok(user) => tx
            .send(Msg::AuthActivity(AuthActivityMsg::SignedIn(user)))
            .map_err(|e| AppError::Channel(e.to_string())),
        Err(AuthError::Cancelled) => Ok(()),
        Err(AuthError::Rejected(message)) => Err(AppError::Auth(message)),
        Err(e) => Err(e.into()),
    }
}

pub(crate) fn first_name(nome: &str) -> &str {
    nome.split_whitespace().next().unwrap_or(nome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;
    use std::sync::mpsc;

    fn user() -> UserView {
        UserView {
            id: "7".to_string(),
            nome: "Maria Souza".to_string(),
            email: "maria@example.com".to_string(),
            telefone: "11988887777".to_string(),
            role: "cliente".to_string(),
        }
    }

    #[test]
    fn test_first_name() {
        assert_eq!(first_name("Maria Souza"), "Maria");
        assert_eq!(first_name("  João "), "João");
        assert_eq!(first_name(""), "");
    }

    #[test]
    fn test_signed_in_sends_the_user() {
        let (tx, rx) = mpsc::channel();
        assert_ok!(signed_in(&tx, Ok(user())));
        assert_eq!(
            assert_ok!(rx.try_recv()),
            Msg::AuthActivity(AuthActivityMsg::SignedIn(user()))
        );
    }

    #[test]
    fn test_rejection_keeps_the_backend_message() {
        let (tx, rx) = mpsc::channel();
        let error = assert_err!(signed_in(
            &tx,
            Err(AuthError::Rejected("Credenciais inválidas".to_string()))
        ));
        assert_eq!(error.message(), "Credenciais inválidas");
        assert_err!(rx.try_recv());
    }

    #[test]
    fn test_cancelled_sign_in_is_silent() {
        let (tx, rx) = mpsc::channel();
        assert_ok!(signed_in(&tx, Err(AuthError::Cancelled)));
        assert_err!(rx.try_recv());
    }
}
