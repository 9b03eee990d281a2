//! Catalog browser TUI main loop.

/// Browser state types.
pub mod state;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use cinephilix_api::catalog::CatalogApi;
use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use self::state::{BrowserOptions, BrowserState, Completion, Request, SearchTicket};
use crate::detail::{load_person, load_title_details};
use crate::domain::{PeopleDomain, SearchDomain, TitleDomain};

/// Runs the catalog browser until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup, drawing or event handling fails.
/// Backend failures are shown in the UI and never end the session.
#[allow(clippy::module_name_repetitions)]
pub async fn run_browser<A>(api: Arc<A>, options: BrowserOptions) -> Result<()>
where
    A: CatalogApi + Send + Sync + 'static,
{
    let mut state = BrowserState::new(options);
    state.start();

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut state, &api).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop<A>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut BrowserState,
    api: &Arc<A>,
) -> Result<()>
where
    A: CatalogApi + Send + Sync + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let mut events = EventStream::new();

    loop {
        dispatch(state.take_requests(), api, &tx);

        terminal
            .draw(|frame| ui::draw(frame, state))
            .context("failed to draw TUI")?;

        let deadline = state.debounce_deadline();
        tokio::select! {
            event = events.next() => {
                let Some(event) = event else {
                    return Ok(());
                };
                if let Event::Key(key) = event.context("failed to read event")?
                    && key.kind == KeyEventKind::Press
                    && state.handle_key(key.code, key.modifiers, Instant::now())
                {
                    return Ok(());
                }
            }
            Some(completion) = rx.recv() => {
                state.apply_completion(completion);
            }
            () = wait_for(deadline) => {
                state.poll_debounce(Instant::now());
            }
        }
    }
}

/// Sleeps until `deadline`, or forever when nothing is pending.
async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(tokio::time::Instant::from_std(at)).await,
        None => std::future::pending().await,
    }
}

/// Spawns one task per request; outcomes come back through `tx`.
fn dispatch<A>(requests: Vec<Request>, api: &Arc<A>, tx: &mpsc::UnboundedSender<Completion>)
where
    A: CatalogApi + Send + Sync + 'static,
{
    for request in requests {
        match request {
            Request::Search {
                page,
                ticket: SearchTicket::Titles(ticket),
            } => {
                let api = Arc::clone(api);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let outcome = TitleDomain::fetch(&*api, &ticket.filters)
                        .await
                        .map_err(|e| format!("{e:#}"));
                    let _ = tx.send(Completion::Titles {
                        page,
                        seq: ticket.seq,
                        outcome,
                    });
                });
            }
            Request::Search {
                ticket: SearchTicket::People(ticket),
                ..
            } => {
                let api = Arc::clone(api);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let outcome = PeopleDomain::fetch(&*api, &ticket.filters)
                        .await
                        .map_err(|e| format!("{e:#}"));
                    let _ = tx.send(Completion::People {
                        seq: ticket.seq,
                        outcome,
                    });
                });
            }
            Request::TitleDetail(ticket) => {
                let api = Arc::clone(api);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let details = load_title_details(&*api, &ticket.id).await;
                    let _ = tx.send(Completion::TitleDetail {
                        seq: ticket.seq,
                        details,
                    });
                });
            }
            Request::PersonDetail(ticket) => {
                let api = Arc::clone(api);
                let tx = tx.clone();
                tokio::spawn(async move {
                    let outcome = load_person(&*api, &ticket.id).await;
                    let _ = tx.send(Completion::PersonDetail {
                        seq: ticket.seq,
                        outcome,
                    });
                });
            }
            Request::OpenUrl(url) => {
                debug!(%url, "opening link");
                if let Err(e) = open::that(&url) {
                    warn!(%url, error = %e, "failed to open link");
                }
            }
        }
    }
}
