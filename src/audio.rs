//! Background soundtrack.
//!
//! The show never drives playback beyond two calls: start the track on the
//! first user interaction, and stop it on teardown. Platforms may refuse to
//! start audio; that is logged and otherwise ignored.

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("failed to open soundtrack: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to decode soundtrack: {0}")]
    Decode(String),
    #[error("no audio output available: {0}")]
    Output(String),
}

pub trait Soundtrack {
    fn play(&mut self) -> Result<(), AudioError>;
    /// Stops playback and rewinds to the start of the track.
    fn stop(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockState {
    /// Waiting for the first interaction.
    Locked,
    /// The interaction listener fired and has been detached.
    Started,
    Stopped,
}

/// Starts an optional soundtrack on the first interaction, once.
pub struct AudioUnlock {
    track: Option<Box<dyn Soundtrack>>,
    state: UnlockState,
}

impl AudioUnlock {
    pub fn new(track: Option<Box<dyn Soundtrack>>) -> Self {
        Self {
            track,
            state: UnlockState::Locked,
        }
    }

    pub fn silent() -> Self {
        Self::new(None)
    }

    pub fn state(&self) -> UnlockState {
        self.state
    }

    pub fn has_track(&self) -> bool {
        self.track.is_some()
    }

    /// Returns true when this interaction was the one that unlocked audio.
    pub fn on_interaction(&mut self) -> bool {
        if self.state != UnlockState::Locked {
            return false;
        }
        self.state = UnlockState::Started;
        if let Some(track) = self.track.as_mut() {
            match track.play() {
                Ok(()) => log::info!("Soundtrack started"),
                Err(e) => log::warn!("Audio playback failed: {}", e),
            }
        }
        true
    }

    pub fn stop(&mut self) {
        if self.state == UnlockState::Stopped {
            return;
        }
        if let Some(track) = self.track.as_mut() {
            track.stop();
        }
        self.state = UnlockState::Stopped;
    }
}

#[cfg(feature = "music")]
pub use self::rodio_track::RodioTrack;

#[cfg(feature = "music")]
mod rodio_track {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::{Path, PathBuf};

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

    use super::{AudioError, Soundtrack};

    /// Looping track played through the default output device.
    pub struct RodioTrack {
        _stream: OutputStream,
        _stream_handle: OutputStreamHandle,
        sink: Sink,
        path: PathBuf,
    }

    impl RodioTrack {
        pub fn open(path: impl AsRef<Path>) -> Result<Self, AudioError> {
            let (stream, stream_handle) =
                OutputStream::try_default().map_err(|e| AudioError::Output(e.to_string()))?;
            let sink = Sink::try_new(&stream_handle).map_err(|e| AudioError::Output(e.to_string()))?;
            let track = Self {
                _stream: stream,
                _stream_handle: stream_handle,
                sink,
                path: path.as_ref().to_path_buf(),
            };
            track.load()?;
            Ok(track)
        }

        // Queues the track from the start, paused.
        fn load(&self) -> Result<(), AudioError> {
            let file = File::open(&self.path)?;
            let source =
                Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode(e.to_string()))?;
            self.sink.append(source.repeat_infinite());
            self.sink.pause();
            Ok(())
        }
    }

    impl Soundtrack for RodioTrack {
        fn play(&mut self) -> Result<(), AudioError> {
            if self.sink.empty() {
                self.load()?;
            }
            self.sink.play();
            Ok(())
        }

        fn stop(&mut self) {
            self.sink.stop();
        }
    }
}
