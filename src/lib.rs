// Library surface for the binary and for headless/integration tests.
// Nothing in here touches the real terminal except CrosstermEventSource.
pub mod app;
pub mod clock;
pub mod config;
pub mod metrics;
pub mod runtime;
pub mod session;
pub mod ui;
