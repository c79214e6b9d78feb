//! Terminal lifecycle and the event stream consumed by the app loop.
//!
//! The app runs full-screen: [`init`] enters raw mode and the alternate screen, [`restore`]
//! undoes both. Redraws are never issued directly by widgets; they go through a
//! [`FrameRequester`], which coalesces requests into [`TuiEvent::Draw`] events.

use std::io::Stdout;
use std::io::stdout;
use std::pin::Pin;
use std::time::Duration;
use std::time::Instant;

use crossterm::cursor::Show;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::Event;
use crossterm::event::KeyEvent;
use crossterm::execute;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use ratatui::Frame;
use ratatui::backend::CrosstermBackend;
use tokio::sync::broadcast;
use tokio::sync::mpsc;
use tokio_stream::Stream;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::BroadcastStream;

pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Upper bound for an idle frame-scheduler sleep.
const IDLE_SLEEP: Duration = Duration::from_secs(60 * 60);

/// Enter raw mode + alternate screen and return a terminal drawing to stdout.
pub fn init() -> anyhow::Result<Terminal> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableBracketedPaste)?;
    set_panic_hook();
    let terminal = ratatui::Terminal::new(CrosstermBackend::new(stdout()))?;
    Ok(terminal)
}

/// Restore the terminal modes changed by [`init`].
pub fn restore() -> anyhow::Result<()> {
    execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen, Show)?;
    disable_raw_mode()?;
    Ok(())
}

fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore();
        hook(info);
    }));
}

#[derive(Debug)]
pub enum TuiEvent {
    Key(KeyEvent),
    Paste(String),
    Draw,
}

/// Handle used by widgets to ask for a redraw, now or later.
#[derive(Clone, Debug)]
pub struct FrameRequester {
    frame_schedule_tx: mpsc::UnboundedSender<Instant>,
}

impl FrameRequester {
    /// Spawn the frame scheduler. Must be called from within a tokio runtime.
    fn new(draw_tx: broadcast::Sender<()>) -> Self {
        let (frame_schedule_tx, frame_schedule_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_frame_scheduler(frame_schedule_rx, draw_tx));
        Self { frame_schedule_tx }
    }

    pub fn schedule_frame(&self) {
        let _ = self.frame_schedule_tx.send(Instant::now());
    }

    pub fn schedule_frame_at(&self, deadline: Instant) {
        let _ = self.frame_schedule_tx.send(deadline);
    }

    /// A requester whose requests go nowhere, for widget tests.
    #[cfg(test)]
    pub fn test_dummy() -> Self {
        let (frame_schedule_tx, _rx) = mpsc::unbounded_channel();
        Self { frame_schedule_tx }
    }
}

/// Coalesce frame requests: only the earliest pending deadline is tracked. Callers that need
/// several future frames re-arm after each draw.
async fn run_frame_scheduler(
    mut frame_schedule_rx: mpsc::UnboundedReceiver<Instant>,
    draw_tx: broadcast::Sender<()>,
) {
    let mut next_deadline: Option<Instant> = None;
    loop {
        let target = next_deadline.unwrap_or_else(|| Instant::now() + IDLE_SLEEP);
        let sleep = tokio::time::sleep_until(tokio::time::Instant::from_std(target));
        tokio::pin!(sleep);

        tokio::select! {
            requested = frame_schedule_rx.recv() => {
                let Some(at) = requested else {
                    break;
                };
                next_deadline = Some(next_deadline.map_or(at, |current| current.min(at)));
            }
            () = &mut sleep, if next_deadline.is_some() => {
                next_deadline = None;
                // No subscribers is fine: the app may be between event streams.
                let _ = draw_tx.send(());
            }
        }
    }
}

pub struct Tui {
    pub terminal: Terminal,
    frame_requester: FrameRequester,
    draw_tx: broadcast::Sender<()>,
}

impl Tui {
    pub fn new(terminal: Terminal) -> Self {
        let (draw_tx, _) = broadcast::channel(16);
        let frame_requester = FrameRequester::new(draw_tx.clone());
        Self {
            terminal,
            frame_requester,
            draw_tx,
        }
    }

    pub fn frame_requester(&self) -> FrameRequester {
        self.frame_requester.clone()
    }

    /// Terminal input merged with scheduled draws. Resizes are surfaced as draws.
    pub fn event_stream(&self) -> Pin<Box<dyn Stream<Item = TuiEvent> + Send + 'static>> {
        let draws = BroadcastStream::new(self.draw_tx.subscribe()).map(|_| TuiEvent::Draw);
        let input = crossterm::event::EventStream::new().filter_map(|event| match event {
            Ok(Event::Key(key_event)) => Some(TuiEvent::Key(key_event)),
            Ok(Event::Paste(pasted)) => Some(TuiEvent::Paste(pasted)),
            Ok(Event::Resize(_, _)) => Some(TuiEvent::Draw),
            Ok(_) => None,
            Err(err) => {
                tracing::warn!("terminal event error: {err}");
                None
            }
        });
        Box::pin(input.merge(draws))
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> anyhow::Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn earliest_request_wins() {
        let (draw_tx, mut draw_rx) = broadcast::channel(16);
        let requester = FrameRequester::new(draw_tx);
        let now = Instant::now();
        requester.schedule_frame_at(now + IDLE_SLEEP);
        requester.schedule_frame_at(now + Duration::from_millis(10));

        tokio::time::timeout(Duration::from_secs(5), draw_rx.recv())
            .await
            .expect("draw before timeout")
            .expect("scheduler alive");
    }

    #[tokio::test]
    async fn past_deadline_draws_immediately() {
        let (draw_tx, mut draw_rx) = broadcast::channel(16);
        let requester = FrameRequester::new(draw_tx);
        requester.schedule_frame_at(Instant::now());

        tokio::time::timeout(Duration::from_secs(5), draw_rx.recv())
            .await
            .expect("draw before timeout")
            .expect("scheduler alive");
    }
}
