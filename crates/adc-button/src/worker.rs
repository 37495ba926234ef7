//! Polling worker thread
//!
//! [`AdcButtons`] owns a [`Classifier`], the [`VoltageSource`] feeding it and
//! the [`EventSink`] receiving its events. While started, a dedicated thread
//! polls every channel once per sample interval. Between ticks it blocks on a
//! shutdown channel with the interval as timeout, so `stop` is observed within
//! one tick without busy waiting.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::mpsc;
//! use adc_button::{AdcButtons, Builder, ChannelConfig};
//!
//! let config = Builder::new().channel(ChannelConfig::new(4)).build()?;
//! let (tx, rx) = mpsc::channel();
//! let mut buttons = AdcButtons::new(&config, ladder, move |event| {
//!     let _ = tx.send(event);
//! })?;
//! buttons.start()?;
//! while let Ok(event) = rx.recv() {
//!     log::info!("{:?}", event);
//! }
//! ```

use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::classifier::Classifier;
use crate::config::{Config, TaskConfig};
use crate::error::ConfigError;
use crate::interface::{EventSink, VoltageSource};

/// Errors reported by the worker lifecycle
#[derive(Debug)]
pub enum WorkerError {
    /// `start` was called while the worker is running
    AlreadyRunning,
    /// The operating system refused to create the thread
    Spawn(io::Error),
    /// The worker thread panicked; its classifier, source and sink are lost
    Panicked,
    /// An earlier failure lost the worker state, it cannot run again
    Unavailable,
}

impl core::fmt::Display for WorkerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WorkerError::AlreadyRunning => write!(f, "ADC button worker is already running"),
            WorkerError::Spawn(err) => write!(f, "Failed to spawn ADC button worker: {err}"),
            WorkerError::Panicked => write!(f, "ADC button worker panicked"),
            WorkerError::Unavailable => write!(f, "ADC button worker state was lost"),
        }
    }
}

impl core::error::Error for WorkerError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            WorkerError::Spawn(err) => Some(err),
            _ => None,
        }
    }
}

struct Parts<S, K> {
    classifier: Classifier,
    source: S,
    sink: K,
}

struct Running<S, K> {
    shutdown: Sender<()>,
    handle: JoinHandle<Parts<S, K>>,
}

/// Classifier plus the thread that drives it
pub struct AdcButtons<S, K>
where
    S: VoltageSource + Send + 'static,
    K: EventSink + Send + 'static,
{
    task: TaskConfig,
    interval: Duration,
    idle: Option<Parts<S, K>>,
    running: Option<Running<S, K>>,
}

impl<S, K> AdcButtons<S, K>
where
    S: VoltageSource + Send + 'static,
    K: EventSink + Send + 'static,
{
    /// Create the channel list; the worker is not started
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the channel configuration is invalid.
    pub fn new(config: &Config, source: S, sink: K) -> Result<Self, ConfigError> {
        let classifier = Classifier::new(config)?;
        Ok(Self {
            task: config.task.clone(),
            interval: classifier.sample_interval(),
            idle: Some(Parts {
                classifier,
                source,
                sink,
            }),
            running: None,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Spawn the polling thread
    ///
    /// Runtime state carries over from before the last [`AdcButtons::stop`].
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::AlreadyRunning`] when started twice,
    /// [`WorkerError::Spawn`] if the thread cannot be created and
    /// [`WorkerError::Unavailable`] after an earlier failure.
    pub fn start(&mut self) -> Result<(), WorkerError> {
        if self.running.is_some() {
            return Err(WorkerError::AlreadyRunning);
        }
        let parts = self.idle.take().ok_or(WorkerError::Unavailable)?;
        let (shutdown, shutdown_rx) = mpsc::channel();
        let interval = self.interval;
        let handle = thread::Builder::new()
            .name(self.task.name.clone())
            .stack_size(self.task.stack_size)
            .spawn(move || run(parts, interval, shutdown_rx))
            .map_err(WorkerError::Spawn)?;
        log::info!(
            "adc button task '{}' started, interval={}ms",
            self.task.name,
            interval.as_millis()
        );
        self.running = Some(Running { shutdown, handle });
        Ok(())
    }

    /// Signal the polling thread and block until it has exited
    ///
    /// Stopping a worker that is not running is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Panicked`] if the thread panicked.
    pub fn stop(&mut self) -> Result<(), WorkerError> {
        let Some(Running { shutdown, handle }) = self.running.take() else {
            return Ok(());
        };
        // The worker also exits when the sender is dropped.
        let _ = shutdown.send(());
        drop(shutdown);
        let parts = handle.join().map_err(|_| WorkerError::Panicked)?;
        self.idle = Some(parts);
        log::info!("adc button task '{}' stopped", self.task.name);
        Ok(())
    }

    /// Stop the worker and hand back the source and sink
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::Panicked`] or [`WorkerError::Unavailable`] if
    /// the parts were lost.
    pub fn destroy(mut self) -> Result<(S, K), WorkerError> {
        self.stop()?;
        let parts = self.idle.take().ok_or(WorkerError::Unavailable)?;
        Ok((parts.source, parts.sink))
    }

    /// Clear every press in progress; only while stopped
    ///
    /// # Errors
    ///
    /// Returns [`WorkerError::AlreadyRunning`] while the worker runs.
    pub fn reset(&mut self) -> Result<(), WorkerError> {
        if self.running.is_some() {
            return Err(WorkerError::AlreadyRunning);
        }
        let parts = self.idle.as_mut().ok_or(WorkerError::Unavailable)?;
        parts.classifier.reset();
        Ok(())
    }
}

impl<S, K> Drop for AdcButtons<S, K>
where
    S: VoltageSource + Send + 'static,
    K: EventSink + Send + 'static,
{
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            log::warn!("adc button task shutdown failed: {}", err);
        }
    }
}

fn run<S, K>(mut parts: Parts<S, K>, interval: Duration, shutdown: Receiver<()>) -> Parts<S, K>
where
    S: VoltageSource,
    K: EventSink,
{
    loop {
        parts.classifier.poll(&mut parts.source, &mut parts.sink);
        match shutdown.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    parts
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::config::{Builder, ChannelConfig};
    use crate::interface::ButtonEvent;

    #[derive(Debug)]
    struct Never;

    struct Counting(Arc<AtomicUsize>);

    impl VoltageSource for Counting {
        type Error = Never;

        fn read_millivolts(&mut self, _channel: u8) -> Result<u16, Self::Error> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(3500)
        }
    }

    fn config() -> Config {
        Builder::new()
            .sample_interval_ms(1)
            .channel(ChannelConfig::new(0).press_judge_time_ms(10))
            .build()
            .unwrap()
    }

    #[test]
    fn stop_without_start_is_noop() {
        let reads = Arc::new(AtomicUsize::new(0));
        let mut buttons =
            AdcButtons::new(&config(), Counting(reads.clone()), |_: ButtonEvent| {}).unwrap();
        assert!(buttons.stop().is_ok());
        assert_eq!(reads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn double_start_is_rejected() {
        let reads = Arc::new(AtomicUsize::new(0));
        let mut buttons =
            AdcButtons::new(&config(), Counting(reads), |_: ButtonEvent| {}).unwrap();
        buttons.start().unwrap();
        assert!(matches!(buttons.start(), Err(WorkerError::AlreadyRunning)));
        assert!(matches!(buttons.reset(), Err(WorkerError::AlreadyRunning)));
        buttons.stop().unwrap();
        assert!(!buttons.is_running());
    }

    #[test]
    fn stop_blocks_until_polling_ends() {
        let reads = Arc::new(AtomicUsize::new(0));
        let mut buttons =
            AdcButtons::new(&config(), Counting(reads.clone()), |_: ButtonEvent| {}).unwrap();
        buttons.start().unwrap();
        while reads.load(Ordering::SeqCst) < 3 {
            thread::sleep(Duration::from_millis(1));
        }
        buttons.stop().unwrap();
        let after_stop = reads.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(reads.load(Ordering::SeqCst), after_stop);
    }

    #[test]
    fn invalid_config_is_rejected_before_spawning() {
        let config = Builder::new()
            .channel(ChannelConfig::new(0).steps(&[500]))
            .build()
            .unwrap();
        let result = AdcButtons::new(
            &config,
            Counting(Arc::new(AtomicUsize::new(0))),
            |_: ButtonEvent| {},
        );
        assert!(matches!(result, Err(ConfigError::TooFewSteps { .. })));
    }
}
