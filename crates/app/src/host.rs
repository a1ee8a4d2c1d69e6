//! Host application run loop
//!
//! The host owns the main thread while CEF is up. Each tick it lets CEF do
//! pending work, then checks whether anyone asked it to stop. Stop requests
//! arrive over a channel: from Ctrl-C (a listener thread with its own small
//! tokio runtime) or from any [`StopHandle`]. The host gives up its own sender
//! when the loop starts, so once every handle and the listener are gone the
//! loop ends instead of waiting for a stop nobody can send.

use std::thread;
use std::time::Duration;

use lumen_bootstrap::HostApplication;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

/// Why the run loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// SIGINT / Ctrl-C
    Interrupted,
    /// Requested through a [`StopHandle`]
    Requested,
}

/// Cloneable handle for asking the host to stop
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: Option<mpsc::UnboundedSender<StopReason>>,
}

impl StopHandle {
    /// Returns `false` if the host is already gone
    pub fn request_stop(&self) -> bool {
        self.tx
            .as_ref()
            .is_some_and(|tx| tx.send(StopReason::Requested).is_ok())
    }
}

/// Off-screen host that pumps the engine's message loop on the main thread
pub struct OffscreenHost<P: FnMut()> {
    pump: P,
    frame_interval: Duration,
    listen_for_signals: bool,
    /// Released when `run` starts
    stop_tx: Option<mpsc::UnboundedSender<StopReason>>,
    stop_rx: mpsc::UnboundedReceiver<StopReason>,
    ticks: u64,
}

impl<P: FnMut()> OffscreenHost<P> {
    /// `pump` performs one slice of engine work per tick
    pub fn new(pump: P, frame_interval: Duration) -> Self {
        let (stop_tx, stop_rx) = mpsc::unbounded_channel();
        Self {
            pump,
            frame_interval,
            listen_for_signals: true,
            stop_tx: Some(stop_tx),
            stop_rx,
            ticks: 0,
        }
    }

    /// Disable the Ctrl-C listener (embedders that handle signals themselves)
    pub fn without_signal_listener(mut self) -> Self {
        self.listen_for_signals = false;
        self
    }

    /// Handles taken after `run` has started cannot stop the host
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            tx: self.stop_tx.clone(),
        }
    }

    /// Number of completed pump ticks
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    fn spawn_signal_listener(&self) {
        let Some(tx) = self.stop_tx.clone() else {
            return;
        };
        let spawned = thread::Builder::new()
            .name("lumen-signals".into())
            .spawn(move || {
                let runtime = match tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                {
                    Ok(runtime) => runtime,
                    Err(e) => {
                        tracing::warn!("Ctrl-C listener unavailable: {}", e);
                        return;
                    }
                };
                runtime.block_on(async {
                    match tokio::signal::ctrl_c().await {
                        Ok(()) => {
                            tracing::info!("Interrupt received, stopping host");
                            let _ = tx.send(StopReason::Interrupted);
                        }
                        Err(e) => tracing::warn!("Failed to listen for Ctrl-C: {}", e),
                    }
                });
            });

        if let Err(e) = spawned {
            tracing::warn!("Failed to spawn Ctrl-C listener: {}", e);
        }
    }
}

impl<P: FnMut()> HostApplication for OffscreenHost<P> {
    fn initialize(&mut self) {
        if self.listen_for_signals {
            self.spawn_signal_listener();
        }
        tracing::info!(
            "Host initialized (frame interval {:?})",
            self.frame_interval
        );
    }

    fn run(&mut self) {
        self.stop_tx = None;
        loop {
            (self.pump)();
            self.ticks += 1;

            match self.stop_rx.try_recv() {
                Ok(reason) => {
                    tracing::info!("Host stopping: {:?} after {} ticks", reason, self.ticks);
                    return;
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => {
                    tracing::info!("Host stopping: no stop sources left after {} ticks", self.ticks);
                    return;
                }
            }

            thread::sleep(self.frame_interval);
        }
    }
}
