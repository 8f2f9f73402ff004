use std::io;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::query::{HttpSource, RemoteOptions};
use crate::service::{ServiceOptions, ViewLayer};
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;
use crate::view::ViewSchema;

const TICK_RATE: Duration = Duration::from_millis(100);

/// Runs the interactive table until the user quits.
///
/// The view service lives on a tokio runtime; the draw loop stays on this
/// thread and talks to it through a [`ViewHandle`](crate::service::ViewHandle).
pub fn run(config: &Config) -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .thread_name("dataview-service")
        .build()?;

    let source = HttpSource::new(RemoteOptions::from(&config.remote))
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;
    let schema = Arc::new(ViewSchema::from_config(config));
    let (handle, server) = ViewLayer::new(schema, source, ServiceOptions::from(&config.view));
    let server_task = runtime.spawn(server.run());

    let (mut terminal, guard) = setup_terminal()?;
    let mut app = App::new(handle, runtime.handle().clone());
    let events = EventHandler::new(TICK_RATE);

    loop {
        terminal.draw(|frame| draw(frame, &app))?;
        if app.should_quit() {
            break;
        }

        match events.next(TICK_RATE) {
            Ok(AppEvent::Key(key)) => handle_key(&mut app, key),
            Ok(AppEvent::Tick) | Ok(AppEvent::Resize(..)) => app.on_tick(),
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => app.on_tick(),
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(guard);
    drop(app);
    let stopped =
        runtime.block_on(async { tokio::time::timeout(Duration::from_secs(1), server_task).await });
    if stopped.is_err() {
        tracing::warn!("View service did not stop in time");
    }
    runtime.shutdown_timeout(Duration::from_millis(100));
    Ok(())
}
