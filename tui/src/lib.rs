// Forbid accidental stdout/stderr writes in the library portion of the TUI.
#![deny(clippy::print_stdout, clippy::print_stderr)]

mod app;
mod attachment_path;
mod chatbot;
mod exit;
mod header;
mod key_hint;
mod olla_tui;
mod render;
mod screens;
mod text_formatting;
mod text_input;
mod tui;
mod ui_colors;

#[cfg(test)]
mod test_support;

pub use app::AppOptions;
pub use exit::AppExitInfo;
pub use exit::ExitReason;
pub use header::MenuKey;
pub use olla_tui::OllaTui;
