//! One-shot search command

use super::{render, SearchArgs};
use crate::app::App;
use anyhow::{bail, Result};
use tokio::sync::broadcast::error::TryRecvError;
use tracing::debug;
use vidscope_core::{RawFilters, SessionState};

pub async fn run(app: &mut App, args: SearchArgs) -> Result<()> {
    let filters = RawFilters {
        start: args.from,
        end: args.to,
        camera_id: args.camera,
    };

    let mut events = app.session.events().subscribe();
    let ticket = app.session.submit(&args.query, &filters);
    debug!(request_id = ticket.request_id(), dispatched = ticket.dispatched(), "search submitted");
    ticket.wait().await;

    loop {
        match events.try_recv() {
            Ok(event) => render::print_notice(&event),
            Err(TryRecvError::Lagged(skipped)) => debug!(skipped, "notice receiver lagged"),
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }

    let state = app.session.state();
    ensure_accepted(&state)?;
    render::print_state(&state, app.assets.as_ref());

    if let Some(n) = args.open {
        let hits = state.hits();
        let Some(hit) = n.checked_sub(1).and_then(|i| hits.get(i)) else {
            bail!("No hit #{} to open ({} available)", n, hits.len());
        };
        app.playback.open(hit.clone());
        render::print_playback(&app.playback);
    }

    Ok(())
}

/// A rejected query has already printed its notice; it still fails the command.
fn ensure_accepted(state: &SessionState) -> Result<()> {
    if let SessionState::Failed { error, .. } = state {
        bail!("search rejected: {}", error);
    }
    Ok(())
}
