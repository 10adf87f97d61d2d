use tokio_util::sync::CancellationToken;

/// Cancel `shutdown` when SIGINT or SIGTERM arrives.
#[cfg(unix)]
pub fn spawn_signal_listener(shutdown: CancellationToken) -> color_eyre::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::spawn(async move {
        tokio::select! {
            _ = sigint.recv() => log::info!("Received SIGINT, shutting down"),
            _ = sigterm.recv() => log::info!("Received SIGTERM, shutting down"),
        }
        shutdown.cancel();
    });
    Ok(())
}

#[cfg(not(unix))]
pub fn spawn_signal_listener(shutdown: CancellationToken) -> color_eyre::Result<()> {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                log::info!("Received Ctrl-C, shutting down");
                shutdown.cancel();
            }
            Err(e) => log::warn!("Failed to listen for Ctrl-C: {}", e),
        }
    });
    Ok(())
}
