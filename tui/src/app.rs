use std::time::Duration;
use std::time::Instant;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use olla_protocol::assets::AssetCatalog;
use olla_protocol::chat::DEFAULT_REPLY_DELAY;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::widgets::WidgetRef;
use tokio_stream::StreamExt;

use crate::exit::AppExitInfo;
use crate::exit::ExitReason;
use crate::header::HeaderView;
use crate::header::MenuKey;
use crate::key_hint;
use crate::key_hint::KeyBinding;
use crate::screens::Screen;
use crate::screens::ScreenStats;
use crate::screens::cards::CardRecommendationScreen;
use crate::screens::diary::ConsumptionDiaryScreen;
use crate::screens::my_page::MyPageScreen;
use crate::tui::FrameRequester;
use crate::tui::Tui;
use crate::tui::TuiEvent;

const QUIT_KEY: KeyBinding = key_hint::ctrl(KeyCode::Char('c'));

/// Startup settings for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppOptions {
    pub reply_delay: Duration,
    /// Name shown on the my-page profile card.
    pub user_name: String,
    pub initial_menu: MenuKey,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            reply_delay: DEFAULT_REPLY_DELAY,
            user_name: "지유빈".to_string(),
            initial_menu: MenuKey::default(),
        }
    }
}

pub(crate) struct App {
    options: AppOptions,
    assets: AssetCatalog,
    frame_requester: FrameRequester,
    active_menu: MenuKey,
    screen: Option<Box<dyn Screen>>,
    /// Counters collected from screens that have been unmounted.
    unmounted_stats: ScreenStats,
    exit_reason: Option<ExitReason>,
}

impl App {
    pub(crate) fn new(options: AppOptions, frame_requester: FrameRequester, now: Instant) -> Self {
        let active_menu = options.initial_menu;
        let mut app = Self {
            options,
            assets: AssetCatalog::default(),
            frame_requester,
            active_menu,
            screen: None,
            unmounted_stats: ScreenStats::default(),
            exit_reason: None,
        };
        app.screen = app.mount(active_menu, now);
        app
    }

    fn mount(&self, menu: MenuKey, now: Instant) -> Option<Box<dyn Screen>> {
        match menu {
            MenuKey::MyPage => Some(Box::new(MyPageScreen::new(
                self.frame_requester.clone(),
                self.options.reply_delay,
                self.options.user_name.clone(),
                now,
            ))),
            MenuKey::CardRecommendation => Some(Box::new(CardRecommendationScreen::new())),
            MenuKey::ConsumptionDiary => Some(Box::new(ConsumptionDiaryScreen::new())),
            MenuKey::SpendingAnalysis | MenuKey::FinanceManagement => None,
        }
    }

    /// Switch screens. The previous screen is dropped first, which tears down its state
    /// (for my-page, the chat session with its pending replies and images).
    pub(crate) fn select_menu(&mut self, menu: MenuKey, now: Instant) {
        if menu == self.active_menu {
            return;
        }
        tracing::info!(from = ?self.active_menu, to = ?menu, "switching screen");
        if let Some(previous) = self.screen.take() {
            let stats = previous.stats();
            self.unmounted_stats.messages_sent += stats.messages_sent;
            self.unmounted_stats.diary_entries_written += stats.diary_entries_written;
            drop(previous);
        }
        self.active_menu = menu;
        self.screen = self.mount(menu, now);
        self.frame_requester.schedule_frame();
    }

    pub(crate) fn handle_key(&mut self, key_event: KeyEvent, now: Instant) {
        if key_event.kind == KeyEventKind::Release {
            return;
        }
        if QUIT_KEY.is_press(key_event) {
            self.exit_reason = Some(ExitReason::UserRequested);
            return;
        }
        if let Some(menu) = self.active_menu.navigate(key_event) {
            self.select_menu(menu, now);
            return;
        }
        if let Some(screen) = self.screen.as_mut() {
            screen.handle_key(key_event, now);
        }
        self.frame_requester.schedule_frame();
    }

    pub(crate) fn handle_paste(&mut self, pasted: String) {
        if let Some(screen) = self.screen.as_mut() {
            screen.handle_paste(pasted);
        }
        self.frame_requester.schedule_frame();
    }

    pub(crate) fn on_frame(&mut self, now: Instant) {
        if let Some(screen) = self.screen.as_mut() {
            screen.on_tick(now);
        }
    }

    pub(crate) fn exit_info(&self) -> Option<AppExitInfo> {
        let exit_reason = self.exit_reason.clone()?;
        let current = self
            .screen
            .as_ref()
            .map(|screen| screen.stats())
            .unwrap_or_default();
        Some(AppExitInfo {
            messages_sent: self.unmounted_stats.messages_sent + current.messages_sent,
            diary_entries_written: self.unmounted_stats.diary_entries_written
                + current.diary_entries_written,
            exit_reason,
        })
    }

    fn layout(area: Rect) -> [Rect; 4] {
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area)
    }

    fn footer(&self) -> Line<'static> {
        let mut footer = self
            .screen
            .as_ref()
            .map(|screen| screen.key_hints())
            .unwrap_or_default();
        if !footer.spans.is_empty() {
            footer.spans.push(" · ".dim());
        }
        footer.spans.extend(
            key_hint::hint_line(&[
                (key_hint::plain(KeyCode::F(1)), "~ F5 메뉴"),
                (QUIT_KEY, "종료"),
            ])
            .spans,
        );
        footer
    }

    pub(crate) fn cursor_pos(&self, area: Rect) -> Option<(u16, u16)> {
        let [_, _, body, _] = Self::layout(area);
        self.screen
            .as_ref()
            .and_then(|screen| screen.cursor_pos(body, &self.assets))
    }

    pub(crate) fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget_ref(self, area);
        if let Some((x, y)) = self.cursor_pos(area) {
            frame.set_cursor_position((x, y));
        }
    }
}

impl WidgetRef for &App {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let [header, rule, body, footer] = App::layout(area);
        HeaderView {
            active: self.active_menu,
            assets: &self.assets,
        }
        .render_ref(header, buf);
        Line::from("─".repeat(usize::from(rule.width)).dim()).render_ref(rule, buf);
        if let Some(screen) = self.screen.as_ref() {
            screen.render(body, buf, &self.assets);
        }
        self.footer().render_ref(footer, buf);
    }
}

/// Drive the app until the user quits or the terminal goes away.
pub(crate) async fn run_app(tui: &mut Tui, options: AppOptions) -> anyhow::Result<AppExitInfo> {
    let mut app = App::new(options, tui.frame_requester(), Instant::now());
    let mut events = tui.event_stream();
    tui.frame_requester().schedule_frame();

    while let Some(event) = events.next().await {
        match event {
            TuiEvent::Key(key_event) => app.handle_key(key_event, Instant::now()),
            TuiEvent::Paste(pasted) => app.handle_paste(pasted),
            TuiEvent::Draw => {
                app.on_frame(Instant::now());
                tui.draw(|frame| app.render(frame))?;
            }
        }
        if let Some(exit_info) = app.exit_info() {
            return Ok(exit_info);
        }
    }

    tracing::warn!("terminal event stream ended");
    Ok(AppExitInfo {
        messages_sent: 0,
        diary_entries_written: 0,
        exit_reason: ExitReason::Fatal("terminal input closed".to_string()),
    })
}
