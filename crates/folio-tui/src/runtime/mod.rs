//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! Async producers (the typewriter sink, contact submissions, reset timers)
//! send `UiEvent`s to the inbox; the loop drains it every iteration and feeds
//! everything through the reducer.

mod sink;

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use folio_core::config::Config;
use folio_core::contact::{ContactClient, ContactError};
use folio_core::interrupt;
use folio_core::typewriter::{RoleTypewriter, Scheduler, TokioScheduler};
pub use sink::InboxSink;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::layout::RevealKey;
use crate::state::AppState;
use crate::terminal::PageTerminal;
use crate::{render, terminal, update};

/// Frame interval while something is animating.
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll interval when nothing on screen is moving.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

pub struct TuiRuntime {
    terminal: PageTerminal,
    pub state: AppState,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    contact: Result<ContactClient, ContactError>,
    typewriter: Option<RoleTypewriter>,
    last_tick: Instant,
}

impl TuiRuntime {
    /// Enters TUI mode. `endpoint` overrides the configured contact endpoint.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(config: Config, endpoint: Option<&str>) -> Result<Self> {
        terminal::install_panic_hook();
        interrupt::set_restore_hook(|| {
            let _ = terminal::restore_terminal();
        });
        interrupt::reset();

        let contact = ContactClient::from_config(&config.contact, endpoint);
        if let Err(e) = &contact {
            tracing::warn!("Contact form disabled: {e}");
        }

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let now = Instant::now();

        Ok(Self {
            terminal,
            state: AppState::new(config, now),
            inbox_tx,
            inbox_rx,
            contact,
            typewriter: None,
            last_tick: now,
        })
    }

    /// Runs until the user quits. Must be called inside a tokio runtime.
    ///
    /// # Errors
    /// Returns an error if the role list is empty or drawing fails.
    pub fn run(&mut self) -> Result<()> {
        let scheduler: Arc<dyn Scheduler> = Arc::new(TokioScheduler::current());
        let typewriter = RoleTypewriter::start(
            InboxSink::new(self.inbox_tx.clone()),
            self.state.config.roles.clone(),
            self.state.config.typewriter.clone(),
            scheduler,
        )
        .context("Failed to start the role typewriter")?;
        self.typewriter = Some(typewriter);

        terminal::enable_input_features()?;
        let result = self.event_loop();
        let _ = terminal::disable_input_features();

        if let Some(typewriter) = self.typewriter.take() {
            typewriter.stop();
        }
        result
    }

    fn event_loop(&mut self) -> Result<()> {
        while !self.state.should_quit {
            if interrupt::is_interrupted() {
                self.state.should_quit = true;
                break;
            }

            let mut events = self.collect_events()?;
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            let mut dirty = false;
            for event in events {
                dirty |= !matches!(event, UiEvent::Frame { .. });
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
            }
        }
        Ok(())
    }

    /// Whether anything on screen changes without input.
    fn is_animating(&self) -> bool {
        let state = &self.state;
        let typing = self
            .typewriter
            .as_ref()
            .is_some_and(RoleTypewriter::is_running);
        let staggering = state.revealed.values().any(|at| *at > state.now);
        let counting = state.revealed.contains_key(&RevealKey::Stats)
            && state
                .stats
                .iter()
                .enumerate()
                .any(|(i, stat)| state.stat_value(i) < stat.counter.target());
        typing || staggering || counting || state.skills_filling()
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.is_animating() {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            self.last_tick = Instant::now();
            events.push(UiEvent::Tick {
                now: self.last_tick,
            });
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Spawns `f` and sends its event to the inbox when it completes.
    fn spawn_effect<F, Fut>(&self, f: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(f().await);
        });
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::SubmitContact { attempt, contact } => {
                let client = self.contact.clone();
                self.spawn_effect(move || async move {
                    let result = match client {
                        Ok(client) => client.submit(&contact).await,
                        Err(e) => Err(e),
                    };
                    if let Err(e) = &result {
                        tracing::warn!(attempt, "Contact submission failed: {e}");
                    }
                    UiEvent::ContactFinished {
                        attempt,
                        result: result.map_err(|e| e.to_string()),
                    }
                });
            }
            UiEffect::ScheduleContactReset { attempt, after } => {
                self.spawn_effect(move || async move {
                    tokio::time::sleep(after).await;
                    UiEvent::ContactReset { attempt }
                });
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        if let Some(typewriter) = self.typewriter.take() {
            typewriter.stop();
        }
        let _ = terminal::restore_terminal();
    }
}
