/// Summary produced when an OLLA terminal session exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppExitInfo {
    /// Chat messages the user sent during the session, across every chat session mounted.
    pub messages_sent: usize,
    /// Diary entries written during the session.
    pub diary_entries_written: usize,
    pub exit_reason: ExitReason,
}

/// Reason why the session terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    /// The user pressed the quit key.
    UserRequested,
    /// The terminal went away or drawing failed.
    Fatal(String),
}
