// This product includes software developed at Datadog (https://www.datadoghq.com/) Copyright 2024 Datadog, Inc.

use ansi_term::Colour::{Cyan, Red, Yellow};
use anyhow::{Context, Result, bail};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::sync::mpsc::{Receiver, RecvTimeoutError, channel};
use std::time::Duration;
use tracing::debug;

use crate::generate::{Session, print_run};
use crate::project::Project;

/// Whether a file system event touches a Rust source
pub fn is_source_change(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event
        .paths
        .iter()
        .any(|path| path.extension().is_some_and(|ext| ext == "rs"))
}

///
/// Regenerate whenever the sources change, until interrupted.
///
/// A failing pass (usually a half-typed file that doesn't parse) is reported
/// and the next change is waited for; the session's cache and counter live on.
/// Watcher errors are reported the same way.
///
pub fn watch(project: Project) -> Result<()> {
    let mut session = Session::open(project)?;
    let settle_time = Duration::from_millis(session.project().config.watch_interval_ms);
    let source_dir = session.project().source_dir();

    let (tx, rx) = channel();
    let mut watcher: RecommendedWatcher =
        Watcher::new(tx, Config::default()).context("Failed to create file watcher")?;
    watcher
        .watch(&source_dir, RecursiveMode::Recursive)
        .context(format!("Failed to watch {}", source_dir.display()))?;

    println!("{} {}", Cyan.paint("Watching"), source_dir.display());
    run_pass(&mut session);

    loop {
        match rx.recv() {
            Ok(Ok(event)) if is_source_change(&event) => {
                debug!(paths = ?event.paths, "sources changed");
                settle(&rx, settle_time);
                run_pass(&mut session);
            }
            Ok(Ok(_)) => {}
            Ok(Err(e)) => report_watch_error(&e),
            Err(_) => bail!("File watcher stopped"),
        }
    }
}

fn run_pass(session: &mut Session) {
    match session.pass() {
        Ok(run) => print_run(&run),
        Err(e) => eprintln!("{} {:#}", Red.bold().paint("Error:"), e),
    }
}

fn report_watch_error(error: &notify::Error) {
    eprintln!("{} {}", Yellow.paint("Watch error:"), error);
}

/// Drain events until none has arrived for `settle_time`, so one save
/// (often several events) triggers one pass
fn settle(rx: &Receiver<notify::Result<Event>>, settle_time: Duration) {
    loop {
        match rx.recv_timeout(settle_time) {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => report_watch_error(&e),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return,
        }
    }
}
