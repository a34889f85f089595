//! Audio playback
//!
//! A single-voice player for prop sound samples, backed by Rodio behind the
//! optional `audio` feature. Without the feature the player is a logging
//! stub, so demo code can call it unconditionally.

use std::path::Path;

use thiserror::Error;

/// Audio subsystem errors
#[derive(Error, Debug)]
pub enum AudioError {
    /// No audio output device/stream could be opened
    #[error("Audio output unavailable: {0}")]
    OutputUnavailable(String),

    /// Decoding or playback failed
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// IO error while reading a sample file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(feature = "audio")]
mod player {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::Path;

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

    use super::AudioError;

    /// Single-voice sample player
    ///
    /// The output stream must stay alive for as long as anything plays, so
    /// the player owns it. Not `Send`; it lives on the frame-loop thread.
    pub struct AudioPlayer {
        _stream: OutputStream,
        stream_handle: OutputStreamHandle,
        sink: Option<Sink>,
    }

    impl AudioPlayer {
        /// Open the default audio output
        pub fn new() -> Result<Self, AudioError> {
            let (stream, stream_handle) = OutputStream::try_default()
                .map_err(|e| AudioError::OutputUnavailable(e.to_string()))?;
            Ok(Self {
                _stream: stream,
                stream_handle,
                sink: None,
            })
        }

        /// Play a sample file, replacing whatever was playing before
        pub fn play_file(&mut self, path: &Path) -> Result<(), AudioError> {
            let file = File::open(path)?;
            let source = Decoder::new(BufReader::new(file))
                .map_err(|e| AudioError::PlaybackFailed(e.to_string()))?;

            let sink = Sink::try_new(&self.stream_handle)
                .map_err(|e| AudioError::PlaybackFailed(e.to_string()))?;
            sink.append(source);

            // Dropping the previous sink stops it
            self.sink = Some(sink);
            Ok(())
        }

        /// Stop playback
        pub fn stop(&mut self) {
            self.sink = None;
        }

        /// Set the playback volume (1.0 = unity gain)
        pub fn set_volume(&mut self, volume: f32) {
            if let Some(sink) = &self.sink {
                sink.set_volume(volume);
            }
        }

        /// Whether a sample is still playing
        pub fn is_playing(&self) -> bool {
            self.sink.as_ref().is_some_and(|s| !s.empty())
        }
    }
}

#[cfg(not(feature = "audio"))]
mod player {
    use std::path::Path;

    use super::AudioError;

    /// Single-voice sample player (stub: the `audio` feature is disabled)
    pub struct AudioPlayer;

    impl AudioPlayer {
        /// Create the stub player
        pub fn new() -> Result<Self, AudioError> {
            Ok(Self)
        }

        /// Log the request; playback requires the `audio` feature
        pub fn play_file(&mut self, path: &Path) -> Result<(), AudioError> {
            log::debug!("Audio disabled, skipping playback of {}", path.display());
            Ok(())
        }

        /// No-op
        pub fn stop(&mut self) {}

        /// No-op
        pub fn set_volume(&mut self, _volume: f32) {}

        /// Always false without the `audio` feature
        pub fn is_playing(&self) -> bool {
            false
        }
    }
}

pub use player::AudioPlayer;

/// Convenience: play a file through a fresh player, ignoring failures
///
/// Demo-grade helper for fire-and-forget samples where an unavailable audio
/// device should not take the session down.
pub fn try_play(player: &mut AudioPlayer, path: &Path) {
    if let Err(e) = player.play_file(path) {
        log::warn!("Could not play {}: {e}", path.display());
    }
}
