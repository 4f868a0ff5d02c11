// Core components
pub mod common;
pub mod state;

// Input components
pub mod calendar_picker;
pub mod input_form;
pub mod list_picker;

// Popup components
pub mod error_popup;
pub mod success_popup;

// Display components
pub mod details_panel;
pub mod help_bar;
pub mod loading_indicator;
pub mod text_label;

// System components
pub mod global_key_watcher;
