//! Sound cue player
//!
//! Plays a short chime when a notification arrives. Audio is strictly
//! best-effort: a machine without an output device, a broken backend or a
//! decode failure must never surface to the caller.

use rodio::{Decoder, OutputStream, Sink};
use std::io::Cursor;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, OnceLock};
use std::thread;

static CHIME: &[u8] = include_bytes!("../assets/chime.wav");

/// A playable notification cue
pub trait Cue: Send + Sync {
    /// Attempt to play the cue; must never fail loudly
    fn play(&self);
}

/// Chime player backed by one lazily started audio thread
///
/// The thread owns the output handle and a single sink; each cue stops the
/// sink and replays the chime from the start. If cues arrive faster than
/// playback finishes, the restart cuts the previous one off; a known
/// limitation, harmless at notification frequency.
#[derive(Clone, Default)]
pub struct SoundCue {
    trigger: Arc<OnceLock<Sender<()>>>,
}

impl SoundCue {
    /// Create a cue player; no audio resources are touched until the
    /// first [`Cue::play`]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cue for SoundCue {
    fn play(&self) {
        let trigger = self.trigger.get_or_init(spawn_player);
        if trigger.send(()).is_err() {
            // Player thread exited (no device); cues stay silent.
            tracing::debug!("sound cue player unavailable");
        }
    }
}

fn spawn_player() -> Sender<()> {
    let (tx, rx) = mpsc::channel::<()>();
    let spawned = thread::Builder::new()
        .name("sound-cue".to_string())
        .spawn(move || {
            let (_stream, handle) = match OutputStream::try_default() {
                Ok(out) => out,
                Err(e) => {
                    tracing::debug!(error = %e, "no audio output; sound cues disabled");
                    return;
                }
            };
            let sink = match Sink::try_new(&handle) {
                Ok(sink) => sink,
                Err(e) => {
                    tracing::warn!(error = %e, "cannot create audio sink");
                    return;
                }
            };
            while rx.recv().is_ok() {
                sink.stop();
                match Decoder::new(Cursor::new(CHIME)) {
                    Ok(source) => {
                        sink.append(source);
                        sink.play();
                    }
                    Err(e) => tracing::warn!(error = %e, "chime decode failed"),
                }
            }
        });
    if let Err(e) = spawned {
        tracing::warn!(error = %e, "cannot spawn sound cue thread");
    }
    tx
}
