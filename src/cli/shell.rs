//! Interactive shell
//!
//! Plain lines are searches. Lines starting with `:` edit the filters or
//! drive playback. Searches are not awaited, so typing a new query while one
//! is in flight supersedes it.

use super::render;
use crate::app::App;
use anyhow::Result;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::debug;
use vidscope_core::{AssetLocator, RawFilters, SearchSession, SessionEvent};

const HELP: &str = "\
Type text to search. Commands:
  :from YYYY-MM-DD   set range start
  :to YYYY-MM-DD     set range end
  :camera ID         restrict to a camera
  :clear             drop all filters
  :filters           show current filters
  :open N            play hit N
  :esc               cancel playback
  :close             close playback
  :help              this text
  :q                 quit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Search(String),
    From(String),
    To(String),
    Camera(String),
    Clear,
    Filters,
    Open(usize),
    Escape,
    Close,
    Help,
    Quit,
    Unknown(String),
}

fn parse_line(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let Some(rest) = line.strip_prefix(':') else {
        return Some(Command::Search(line.to_string()));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };
    let command = match name {
        "from" => Command::From(arg.to_string()),
        "to" => Command::To(arg.to_string()),
        "camera" => Command::Camera(arg.to_string()),
        "clear" => Command::Clear,
        "filters" => Command::Filters,
        "open" => match arg.parse::<usize>() {
            Ok(n) if n > 0 => Command::Open(n),
            _ => Command::Unknown(line.to_string()),
        },
        "esc" => Command::Escape,
        "close" => Command::Close,
        "help" | "h" => Command::Help,
        "q" | "quit" => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    };
    Some(command)
}

/// Blank input clears a filter field.
fn set_field(field: &mut Option<String>, value: String) {
    *field = if value.is_empty() { None } else { Some(value) };
}

fn describe_filters(filters: &RawFilters) -> String {
    let field = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    format!(
        "from {}  to {}  camera {}",
        field(&filters.start),
        field(&filters.end),
        field(&filters.camera_id)
    )
}

/// Prints notices and results as the session publishes them.
async fn print_events(session: SearchSession, assets: Arc<dyn AssetLocator>) {
    let mut events = session.events().subscribe();
    loop {
        match events.recv().await {
            Ok(SessionEvent::ResultsReady { request_id, .. }) => {
                let state = session.state();
                if state.request_id() == Some(request_id) {
                    render::print_state(&state, assets.as_ref());
                }
            }
            Ok(SessionEvent::ResponseDiscarded { request_id, latest }) => {
                debug!(request_id, latest, "stale response dropped");
            }
            Ok(event) => render::print_notice(&event),
            Err(RecvError::Lagged(skipped)) => debug!(skipped, "shell printer lagged"),
            Err(RecvError::Closed) => break,
        }
    }
}

fn prompt() {
    print!("vidscope> ");
    let _ = std::io::stdout().flush();
}

pub async fn run(mut app: App) -> Result<()> {
    println!("{}", HELP);

    let printer = tokio::spawn(print_events(app.session.clone(), app.assets.clone()));
    let mut filters = RawFilters::none();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    prompt();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = parse_line(&line) else {
            prompt();
            continue;
        };
        match command {
            Command::Search(query) => {
                let ticket = app.session.submit(&query, &filters);
                debug!(request_id = ticket.request_id(), "search submitted");
            }
            Command::From(value) => set_field(&mut filters.start, value),
            Command::To(value) => set_field(&mut filters.end, value),
            Command::Camera(value) => set_field(&mut filters.camera_id, value),
            Command::Clear => filters = RawFilters::none(),
            Command::Filters => println!("{}", describe_filters(&filters)),
            Command::Open(n) => {
                let state = app.session.state();
                match state.hits().get(n - 1) {
                    Some(hit) => {
                        app.playback.open(hit.clone());
                        render::print_playback(&app.playback);
                    }
                    None => println!("No hit #{} ({} available)", n, state.hits().len()),
                }
            }
            Command::Escape => {
                if app.playback.is_open() {
                    app.playback.cancel();
                    render::print_playback(&app.playback);
                }
            }
            Command::Close => {
                app.playback.close();
                render::print_playback(&app.playback);
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
            Command::Unknown(line) => println!("Unknown command: {} (try :help)", line),
        }
        prompt();
    }

    printer.abort();
    Ok(())
}
