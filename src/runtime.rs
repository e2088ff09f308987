use std::io;
use std::sync::mpsc::{self, Receiver, Sender};

use crossterm::event::{self, Event as CtEvent, KeyEvent};
use log::{debug, error};

use crate::app::{update, Action, App, Transition};
use crate::clock::Clock;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

impl AppEvent {
    pub fn into_action(self) -> Option<Action> {
        match self {
            AppEvent::Key(key) => Action::from_key(key),
            AppEvent::Resize(width, height) => Some(Action::Resize { width, height }),
        }
    }
}

/// Source of terminal events (keyboard, resize)
pub trait EventSource {
    /// Block until the next event. `None` once the source is closed; a read
    /// failure is handed over as `Some(Err(_))`.
    fn next_event(&self) -> Option<io::Result<AppEvent>>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<io::Result<AppEvent>>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || forward_events(event::read, tx));

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn next_event(&self) -> Option<io::Result<AppEvent>> {
        self.rx.recv().ok()
    }
}

/// Pump terminal events into `tx` until the receiver goes away or a read
/// fails. The failure is forwarded before the loop stops.
fn forward_events<R>(mut read: R, tx: Sender<io::Result<AppEvent>>)
where
    R: FnMut() -> io::Result<CtEvent>,
{
    loop {
        let evt = match read() {
            Ok(CtEvent::Key(key)) => Ok(AppEvent::Key(key)),
            Ok(CtEvent::Resize(w, h)) => Ok(AppEvent::Resize(w, h)),
            Ok(_) => continue,
            Err(err) => {
                error!("terminal event reader failed: {}", err);
                Err(err)
            }
        };
        let failed = evt.is_err();
        if tx.send(evt).is_err() {
            debug!("event receiver dropped, reader stopping");
            break;
        }
        if failed {
            break;
        }
    }
}

enum Feed {
    Plain(Receiver<AppEvent>),
    Fallible(Receiver<io::Result<AppEvent>>),
}

/// Test event source for unit and headless tests
pub struct TestEventSource {
    feed: Feed,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self {
            feed: Feed::Plain(rx),
        }
    }

    /// Source that can also replay read failures
    pub fn fallible(rx: Receiver<io::Result<AppEvent>>) -> Self {
        Self {
            feed: Feed::Fallible(rx),
        }
    }
}

impl EventSource for TestEventSource {
    fn next_event(&self) -> Option<io::Result<AppEvent>> {
        match &self.feed {
            Feed::Plain(rx) => rx.recv().ok().map(Ok),
            Feed::Fallible(rx) => rx.recv().ok(),
        }
    }
}

/// Why the runner stopped
#[derive(Debug)]
pub enum Exit<C: Clock> {
    /// The user asked to quit
    Quit,
    /// The event source closed; carries the last state
    Closed(App<C>),
}

/// Runner that advances the application one event at a time
pub struct Runner<E: EventSource> {
    event_source: E,
}

impl<E: EventSource> Runner<E> {
    pub fn new(event_source: E) -> Self {
        Self { event_source }
    }

    pub fn step(&self) -> Option<io::Result<AppEvent>> {
        self.event_source.next_event()
    }

    /// Drive `update` until quit or the source closes. `on_frame` sees the
    /// initial state and then every settled state, one per handled action.
    /// A failed event read ends the run with that error.
    pub fn run<C, F, RunErr>(&self, mut app: App<C>, mut on_frame: F) -> Result<Exit<C>, RunErr>
    where
        C: Clock + Clone,
        F: FnMut(&App<C>) -> Result<(), RunErr>,
        RunErr: From<io::Error>,
    {
        on_frame(&app)?;

        while let Some(ev) = self.step() {
            let Some(action) = ev?.into_action() else {
                continue;
            };

            app = match update(app, action) {
                Transition::Continue(next) => next,
                Transition::Quit => return Ok(Exit::Quit),
            };

            on_frame(&app)?;
        }

        Ok(Exit::Closed(app))
    }
}
