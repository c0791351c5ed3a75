use std::io;
use std::thread;

use anyhow::Context;
use clap::Parser;

use termbridge::bridge::{Bridge, BridgeOptions, DetachOp};
use termbridge::cli::Cli;
use termbridge::echo::EchoProgram;
use termbridge::host::serve_lines;
use termbridge::logging::init_tracing;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config().context("loading configuration")?;
    init_tracing(&config.logging.filter);

    let (bridge, ops) = Bridge::new(EchoProgram, BridgeOptions::from(&config));
    watch_signals(ops.detach.clone())?;
    // Start before serving stdin: end of host input detaches the bridge.
    let running = bridge.start()?;

    thread::Builder::new()
        .name("host-stdin".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            let stdout = io::stdout();
            if let Err(err) = serve_lines(stdin.lock(), stdout.lock(), &ops) {
                tracing::error!("Host transport failed: {}", err);
                ops.detach.detach();
            }
        })
        .context("starting host transport thread")?;

    let model = running.join()?;
    tracing::info!(
        "Echoed {} bytes, {} pointer events",
        model.echoed.len(),
        model.pointer.len()
    );
    Ok(())
}

/// Detach the bridge on SIGINT/SIGTERM so a blocked program unwinds.
#[cfg(unix)]
fn watch_signals(detach: DetachOp) -> anyhow::Result<()> {
    use signal_hook::consts::signal::{SIGINT, SIGTERM};
    use signal_hook::iterator::Signals;

    let mut signals = Signals::new([SIGINT, SIGTERM]).context("registering signal handlers")?;
    thread::Builder::new()
        .name("signals".to_string())
        .spawn(move || {
            if let Some(signal) = signals.forever().next() {
                tracing::info!("Received signal {}, detaching", signal);
                detach.detach();
            }
        })
        .context("starting signal thread")?;
    Ok(())
}

#[cfg(not(unix))]
fn watch_signals(_detach: DetachOp) -> anyhow::Result<()> {
    Ok(())
}
