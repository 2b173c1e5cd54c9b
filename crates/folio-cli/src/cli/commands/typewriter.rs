//! `folio type`: the role typewriter on stdout.

use std::io::{self, IsTerminal, Stdout, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use folio_core::config::{Config, TypewriterConfig};
use folio_core::interrupt::{self, InterruptedError};
use folio_core::typewriter::{RoleList, RoleTypewriter, Scheduler, TextSink, TokioScheduler};
use tokio::sync::mpsc;

pub struct TypeOptions {
    pub roles: Vec<String>,
    pub steps: Option<u64>,
    pub instant: bool,
}

/// Writes typewriter text to stdout.
///
/// On a terminal the line is rewritten in place; otherwise every update is
/// its own line. After `limit` writes, further writes are dropped and `done`
/// fires once.
struct StdoutSink {
    out: Stdout,
    in_place: bool,
    limit: Option<u64>,
    written: u64,
    done: Option<mpsc::UnboundedSender<()>>,
}

impl StdoutSink {
    fn new(in_place: bool, limit: Option<u64>, done: mpsc::UnboundedSender<()>) -> Self {
        Self {
            out: io::stdout(),
            in_place,
            limit,
            written: 0,
            done: Some(done),
        }
    }

    fn write(&mut self, value: &str) -> io::Result<()> {
        let mut out = self.out.lock();
        if self.in_place {
            queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
            write!(out, "{value}")?;
        } else {
            writeln!(out, "{value}")?;
        }
        out.flush()
    }

    fn finish(&mut self) {
        if let Some(done) = self.done.take() {
            let _ = done.send(());
        }
    }
}

impl TextSink for StdoutSink {
    fn set_text(&mut self, value: &str) {
        if self.done.is_none() {
            return;
        }
        if let Err(e) = self.write(value) {
            // Usually a closed pipe.
            tracing::debug!("Stopping typewriter output: {e}");
            self.finish();
            return;
        }
        self.written += 1;
        if self.limit.is_some_and(|limit| self.written >= limit) {
            self.finish();
        }
    }
}

pub async fn run(config: &Config, opts: TypeOptions) -> Result<()> {
    let roles = if opts.roles.is_empty() {
        RoleList::new(config.roles.iter().cloned())
    } else {
        RoleList::new(opts.roles)
    }
    .context("start typewriter")?;
    let timing = if opts.instant {
        TypewriterConfig::instant()
    } else {
        config.typewriter.clone()
    };

    if opts.steps == Some(0) {
        return Ok(());
    }

    let in_place = io::stdout().is_terminal();
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    let sink = StdoutSink::new(in_place, opts.steps, done_tx);
    let scheduler: Arc<dyn Scheduler> = Arc::new(TokioScheduler::current());

    let typewriter = RoleTypewriter::start_with(sink, roles, timing, scheduler);

    let interrupted = tokio::select! {
        _ = done_rx.recv() => false,
        () = interrupt::wait_for_interrupt() => true,
    };
    typewriter.stop();

    if in_place {
        println!();
    }
    if interrupted {
        return Err(InterruptedError.into());
    }
    Ok(())
}
