use crate::components::common::{Msg, PopupActivityMsg};
use client::auth::AuthError;
use client::booking::WizardError;
use client::common::ApiError;
use client::session::SessionError;
use std::fmt::Display;
use std::sync::mpsc::Sender;

/// Application-wide error types for the BarberBook terminal interface.
///
/// Every variant carries the text that ends up in front of the user; the
/// [`Display`] form adds the category for logs.
///
/// - [`Api`](AppError::Api) - booking backend calls that failed or were refused
/// - [`Auth`](AppError::Auth) - sign-in, sign-up and session persistence
/// - [`Component`](AppError::Component) - mounting and activating UI components
/// - [`State`](AppError::State) - an action that the current page cannot take
/// - [`Config`](AppError::Config) - configuration loading and validation
/// - [`Channel`](AppError::Channel) - sending messages back to the UI loop
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
    Api(String),

    Component(String),

    State(String),

    Config(String),

    Auth(String),

    Channel(String),
}

impl AppError {
    /// The message without its category prefix, as shown in popups.
    pub fn message(&self) -> &str {
        match self {
            AppError::Api(msg)
            | AppError::Component(msg)
            | AppError::State(msg)
            | AppError::Config(msg)
            | AppError::Auth(msg)
            | AppError::Channel(msg) => msg,
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Api(msg) => write!(f, "Backend Error: {msg}"),
            AppError::Component(msg) => write!(f, "Component Error: {msg}"),
            AppError::State(msg) => write!(f, "State Error: {msg}"),
            AppError::Config(msg) => write!(f, "Configuration Error: {msg}"),
            AppError::Auth(msg) => write!(f, "Authentication Error: {msg}"),
            AppError::Channel(msg) => write!(f, "Channel Error: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError::Api(err.to_string())
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err.to_string())
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Auth(err.to_string())
    }
}

impl From<WizardError> for AppError {
    fn from(err: WizardError) -> Self {
        AppError::State(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Warning,
    Error,
    Critical,
}

#[derive(Debug, Clone)]
pub struct ErrorContext {
    pub component: String,
    pub operation: String,
    pub user_message: String,
    pub technical_details: Option<String>,
    pub suggestion: Option<String>,
    pub severity: ErrorSeverity,
}

impl ErrorContext {
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            component: component.to_string(),
            operation: operation.to_string(),
            user_message: Self::generate_fallback_message(component),
            technical_details: None,
            suggestion: None,
            severity: ErrorSeverity::Error,
        }
    }

    fn generate_fallback_message(component: &str) -> String {
        format!("An error occurred in {component}. Please try again.")
    }

    pub fn with_message(mut self, message: &str) -> Self {
        self.user_message = message.to_string();
        self
    }

    pub fn with_technical_details(mut self, details: &str) -> Self {
        self.technical_details = Some(details.to_string());
        self
    }

    pub fn with_suggestion(mut self, suggestion: &str) -> Self {
        self.suggestion = Some(suggestion.to_string());
        self
    }

    pub fn with_severity(mut self, severity: ErrorSeverity) -> Self {
        self.severity = severity;
        self
    }
}

#[derive(Debug, Clone)]
pub struct ContextualError {
    pub error: AppError,
    pub context: ErrorContext,
}

impl ContextualError {
    pub fn new(error: AppError, context: ErrorContext) -> Self {
        Self { error, context }
    }
}

impl Display for ContextualError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.context.user_message, self.error)
    }
}

/// Logs errors with their component/operation context and forwards a popup
/// message to the UI loop.
#[derive(Clone)]
pub struct ErrorReporter {
    tx: Sender<Msg>,
}

impl ErrorReporter {
    pub fn new(tx: Sender<Msg>) -> Self {
        Self { tx }
    }

    pub fn report_simple(&self, error: AppError, component: &str, operation: &str) {
        let context =
            ErrorContext::new(component, operation).with_technical_details(&error.to_string());
        self.report(error, context);
    }

    pub fn report_warning(&self, error: AppError, component: &str, operation: &str) {
        let context = ErrorContext::new(component, operation)
            .with_message(error.message())
            .with_severity(ErrorSeverity::Warning);
        self.report(error, context);
    }

    pub fn report_critical_and_exit(
        &self,
        error: AppError,
        component: &str,
        operation: &str,
        user_message: &str,
    ) {
        let context = ErrorContext::new(component, operation)
            .with_message(user_message)
            .with_severity(ErrorSeverity::Critical)
            .with_suggestion("The application will terminate. Please fix the issue and restart.");
        self.report(error, context);
    }

    pub fn report_error(&self, error: AppError) {
        self.report_simple(error, "Application", "operation");
    }

    pub fn report(&self, error: AppError, context: ErrorContext) {
        let contextual_error = ContextualError::new(error.clone(), context.clone());

        match context.severity {
            ErrorSeverity::Warning => {
                log::warn!(
                    "[{}:{}] {} {}",
                    context.component,
                    context.operation,
                    contextual_error,
                    self.format_additional_context(&context)
                );
            }
            ErrorSeverity::Error => {
                log::error!(
                    "[{}:{}] {} {}",
                    context.component,
                    context.operation,
                    contextual_error,
                    self.format_additional_context(&context)
                );
            }
            ErrorSeverity::Critical => {
                log::error!(
                    "[CRITICAL] [{}:{}] {} {}",
                    context.component,
                    context.operation,
                    contextual_error,
                    self.format_additional_context(&context)
                );
            }
        }

        let popup_msg = match context.severity {
            ErrorSeverity::Warning => {
                Msg::PopupActivity(PopupActivityMsg::ShowWarning(self.format_user_message(&context)))
            }
            ErrorSeverity::Error | ErrorSeverity::Critical => Msg::PopupActivity(
                PopupActivityMsg::ShowError(self.create_formatted_error(&error, &context)),
            ),
        };
        if let Err(e) = self.tx.send(popup_msg) {
            log::error!("Failed to send popup message: {e}");
        }
    }

    fn format_additional_context(&self, context: &ErrorContext) -> String {
        let mut parts = Vec::new();

        if let Some(ref technical_details) = context.technical_details {
            parts.push(format!("🔍 Technical: {technical_details}"));
        }

        if let Some(ref suggestion) = context.suggestion {
            parts.push(format!("💡 Suggestion: {suggestion}"));
        }

        if parts.is_empty() {
            String::new()
        } else {
            format!("\n{}", parts.join("\n"))
        }
    }

    fn format_user_message(&self, context: &ErrorContext) -> String {
        let mut message = context.user_message.clone();

        if let Some(ref suggestion) = context.suggestion {
            message.push_str(&format!("\n\n💡 Suggestion: {suggestion}"));
        }

        message
    }

    fn create_formatted_error(&self, error: &AppError, context: &ErrorContext) -> AppError {
        let emoji = match error {
            AppError::Config(_) => "⚙️",
            AppError::Api(_) => "🔗",
            AppError::Component(_) => "🎛️",
            AppError::State(_) => "📊",
            AppError::Auth(_) => "🔐",
            AppError::Channel(_) => "📡",
        };

        let mut formatted_message = format!("{} {}", emoji, self.get_error_title(error));
        formatted_message.push_str(&format!("\n\n{}", context.user_message));

        if let Some(ref technical) = context.technical_details {
            formatted_message.push_str(&format!("\n\n🔍 Details: {technical}"));
        }

        if let Some(ref suggestion) = context.suggestion {
            formatted_message.push_str(&format!("\n\n💡 Suggestion: {suggestion}"));
        }

        match error {
            AppError::Config(_) => AppError::Config(formatted_message),
            AppError::Api(_) => AppError::Api(formatted_message),
            AppError::Component(_) => AppError::Component(formatted_message),
            AppError::State(_) => AppError::State(formatted_message),
            AppError::Auth(_) => AppError::Auth(formatted_message),
            AppError::Channel(_) => AppError::Channel(formatted_message),
        }
    }

    fn get_error_title(&self, error: &AppError) -> &'static str {
        match error {
            AppError::Config(_) => "Configuration Error",
            AppError::Api(_) => "Backend Error",
            AppError::Component(_) => "Component Error",
            AppError::State(_) => "Application State Error",
            AppError::Auth(_) => "Authentication Error",
            AppError::Channel(_) => "Communication Error",
        }
    }

    // Helpers for common error patterns

    pub fn report_mount_error(&self, component: &str, operation: &str, error: impl Display) {
        let app_error = AppError::Component(format!("Failed to {operation} {component}: {error}"));
        self.report_simple(app_error, component, operation);
    }

    pub fn report_send_error(&self, context: &str, error: impl Display) {
        let app_error = AppError::Channel(format!("Failed to send {context}: {error}"));
        self.report_simple(app_error, "MessageChannel", "send_message");
    }

    /// A backend load that failed. `user_message` is what the page promises
    /// to show for that load.
    pub fn report_loading_error(
        &self,
        component: &str,
        operation: &str,
        user_message: &str,
        error: impl Display,
    ) {
        let context = ErrorContext::new(component, operation)
            .with_message(user_message)
            .with_technical_details(&error.to_string());

        let app_error = AppError::Api(error.to_string());
        self.report(app_error, context);
    }
}
