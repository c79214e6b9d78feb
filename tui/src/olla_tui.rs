use crate::AppExitInfo;
use crate::app::AppOptions;
use crate::tui;
use crate::tui::Tui;

/// Full-screen OLLA session:
/// - enters the alternate screen on creation
/// - runs the menu/screens loop until the user quits
/// - restores the terminal on Drop, even if the caller exits early
pub struct OllaTui {
    tui: Tui,
}

impl OllaTui {
    /// Initialize the terminal (raw mode, alternate screen) and clear it.
    pub fn new() -> anyhow::Result<Self> {
        let mut terminal = tui::init()?;
        terminal.clear()?;
        Ok(Self {
            tui: Tui::new(terminal),
        })
    }

    pub async fn run(&mut self, options: AppOptions) -> anyhow::Result<AppExitInfo> {
        crate::app::run_app(&mut self.tui, options).await
    }
}

impl Drop for OllaTui {
    fn drop(&mut self) {
        let _ = self.tui.terminal.show_cursor();
        let _ = tui::restore();
    }
}
