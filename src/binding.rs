//! Terminal binding layer.
//!
//! Maps text commands to panel actions and re-renders the panel whenever its
//! state changes. Fetches run as spawned tasks so input keeps flowing while a
//! lookup is in flight.

#[cfg(test)]
#[path = "binding_test.rs"]
mod binding_test;

use std::str::FromStr;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, warn};

use crate::panel::{FetchOutcome, PanelState, UserInfoPanel};
use crate::render::render_panel;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BindingError {
    #[error("unknown action: {0} (expected fetch, clear, provider <name>, show or quit)")]
    UnknownAction(String),

    #[error("empty action")]
    Empty,
}

/// A user gesture, as typed on the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Fetch,
    Clear,
    /// Edit the provider field. The rest of the line is taken verbatim.
    Provider(String),
    Show,
    Quit,
}

impl Action {
    /// Parse one command line.
    ///
    /// # Errors
    ///
    /// Returns [`BindingError::Empty`] for blank input and
    /// [`BindingError::UnknownAction`] for anything unrecognized.
    pub fn parse(line: &str) -> Result<Self, BindingError> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).map_or((line, ""), |(w, r)| (w, r.trim()));
        match word {
            "fetch" => Ok(Self::Fetch),
            "clear" => Ok(Self::Clear),
            "provider" => Ok(Self::Provider(rest.to_owned())),
            "show" => Ok(Self::Show),
            "quit" | "exit" => Ok(Self::Quit),
            "" => Err(BindingError::Empty),
            other => Err(BindingError::UnknownAction(other.to_owned())),
        }
    }
}

impl FromStr for Action {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// What happened after handing an action to the panel.
#[derive(Debug)]
pub enum Dispatched {
    /// Applied synchronously.
    Done,
    /// A fetch is running in the background.
    Fetching(JoinHandle<FetchOutcome>),
    /// The caller should print the current state.
    Show,
    Quit,
}

/// Apply `action` to `panel`. Must be called from within a Tokio runtime.
pub fn dispatch(panel: &Arc<UserInfoPanel>, action: Action) -> Dispatched {
    match action {
        Action::Fetch => {
            let panel = Arc::clone(panel);
            Dispatched::Fetching(tokio::spawn(async move { panel.fetch_user_infos().await }))
        }
        Action::Clear => {
            panel.clear_rows();
            Dispatched::Done
        }
        Action::Provider(name) => {
            panel.set_provider(name);
            Dispatched::Done
        }
        Action::Show => Dispatched::Show,
        Action::Quit => Dispatched::Quit,
    }
}

/// Run `actions` in order, waiting for each fetch before the next action.
///
/// `show` renders into `sink`. Stops at the first `quit`.
pub async fn run_script(panel: &Arc<UserInfoPanel>, actions: Vec<Action>, mut sink: impl FnMut(&str)) {
    for action in actions {
        match dispatch(panel, action) {
            Dispatched::Done => {}
            Dispatched::Fetching(task) => {
                if let Err(e) = task.await {
                    error!(error = %e, "fetch task failed");
                }
            }
            Dispatched::Show => sink(&render_panel(&panel.snapshot())),
            Dispatched::Quit => break,
        }
    }
}

/// Read actions line by line from `input` until `quit` or end of input.
///
/// Fetches run in the background while reading continues. At end of input
/// the session waits for fetches still in flight so their result lands in the
/// panel; `quit` aborts them. Unparseable lines are logged and skipped.
///
/// # Errors
///
/// Returns the I/O error if reading `input` fails.
pub async fn run_session<R>(panel: &Arc<UserInfoPanel>, input: R, mut sink: impl FnMut(&str)) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut fetches: Vec<JoinHandle<FetchOutcome>> = Vec::new();

    while let Some(line) = lines.next_line().await? {
        let action = match Action::parse(&line) {
            Ok(action) => action,
            Err(BindingError::Empty) => continue,
            Err(e) => {
                warn!(error = %e, "ignored input");
                continue;
            }
        };
        match dispatch(panel, action) {
            Dispatched::Done => {}
            Dispatched::Fetching(task) => fetches.push(task),
            Dispatched::Show => sink(&render_panel(&panel.snapshot())),
            Dispatched::Quit => {
                for task in &fetches {
                    task.abort();
                }
                return Ok(());
            }
        }
    }

    for task in fetches {
        if let Err(e) = task.await {
            error!(error = %e, "fetch task failed");
        }
    }
    Ok(())
}

/// Render every state change into `sink` until the panel is dropped.
pub async fn render_changes(mut rx: watch::Receiver<PanelState>, mut sink: impl FnMut(&str)) {
    while rx.changed().await.is_ok() {
        let text = render_panel(&rx.borrow_and_update());
        sink(&text);
    }
}
