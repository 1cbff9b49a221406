//! Lazily initialized playback context
//!
//! The output device is opened on first use, not at construction, so a
//! headless host (or a browser-style policy that refuses early device
//! access) only costs a warning. Every later call re-attempts the open,
//! which doubles as the idempotent resume: once a device becomes
//! available, playback starts working without any caller-side change.

use parking_lot::Mutex;
use rodio::{OutputStream, OutputStreamHandle, Sample, Sink, Source};
use tracing::warn;

struct OutputHandle {
    // The stream must outlive the handle; dropping it kills playback.
    _stream: OutputStream,
    handle: OutputStreamHandle,
}

/// Process-wide audio output handle
pub(crate) struct PlaybackContext {
    inner: Mutex<Option<OutputHandle>>,
}

// SAFETY: rodio::OutputStream is !Send on some platforms, but it is only
// stored here to keep the stream alive; all cross-thread access goes
// through OutputStreamHandle, which is Send + Sync.
unsafe impl Send for PlaybackContext {}
unsafe impl Sync for PlaybackContext {}

impl PlaybackContext {
    /// Create a context without touching any device
    pub fn new() -> Self {
        PlaybackContext {
            inner: Mutex::new(None),
        }
    }

    /// Open the output device if not already open; safe to call repeatedly
    pub fn ensure(&self) -> Option<OutputStreamHandle> {
        let mut guard = self.inner.lock();
        if guard.is_none() {
            match OutputStream::try_default() {
                Ok((stream, handle)) => {
                    *guard = Some(OutputHandle {
                        _stream: stream,
                        handle,
                    });
                }
                Err(e) => {
                    warn!("audio output unavailable, degrading to silence: {}", e);
                    return None;
                }
            }
        }
        guard.as_ref().map(|h| h.handle.clone())
    }

    /// True once a device has been opened
    pub fn is_open(&self) -> bool {
        self.inner.lock().is_some()
    }

    /// Play a source on a detached sink; degrades to silence on any failure
    pub fn play<S>(&self, source: S)
    where
        S: Source + Send + 'static,
        S::Item: Sample + Send,
        f32: rodio::cpal::FromSample<S::Item>,
    {
        let Some(handle) = self.ensure() else {
            return;
        };
        match Sink::try_new(&handle) {
            Ok(sink) => {
                sink.append(source);
                sink.detach();
            }
            Err(e) => warn!("could not open audio sink: {}", e),
        }
    }
}
