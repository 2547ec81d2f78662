// Sound effect playback
//
// The game talks to audio output through `SoundBoard`. `RodioSoundBoard` plays
// clips on the default output device; `LogSoundBoard` only tracks clip state
// and logs cues, for machines without an output device and for tests.

use crate::engine::assets::{AssetId, SoundClip, SoundHandle};
use log::{debug, warn};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::collections::{HashMap, HashSet};
use std::io::Cursor;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("No audio output device: {0}")]
    Output(#[from] rodio::StreamError),

    #[error("Failed to open audio sink: {0}")]
    Sink(#[from] rodio::PlayError),

    #[error("Failed to decode sound: {0}")]
    Decode(#[from] rodio::decoder::DecoderError),
}

/// Something that can start and stop sound clips
pub trait SoundBoard {
    /// Make a clip playable under its handle
    fn register(&mut self, clip: &SoundClip) -> Result<(), AudioError>;

    /// Start a clip from its current position
    fn play(&mut self, clip: SoundHandle);

    /// Pause a clip and rewind it to the start
    fn stop(&mut self, clip: SoundHandle);
}

/// Sound board that records clip state and logs cues
#[derive(Debug, Default)]
pub struct LogSoundBoard {
    names: HashMap<AssetId, String>,
    playing: HashSet<AssetId>,
}

impl LogSoundBoard {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn is_playing(&self, clip: SoundHandle) -> bool {
        self.playing.contains(&clip.id())
    }

    #[cfg(test)]
    pub fn playing_count(&self) -> usize {
        self.playing.len()
    }

    fn label(&self, clip: SoundHandle) -> String {
        self.names
            .get(&clip.id())
            .cloned()
            .unwrap_or_else(|| format!("{:?}", clip.id()))
    }
}

impl SoundBoard for LogSoundBoard {
    fn register(&mut self, clip: &SoundClip) -> Result<(), AudioError> {
        self.names.insert(clip.handle.id(), clip.name.clone());
        Ok(())
    }

    fn play(&mut self, clip: SoundHandle) {
        debug!("sound play: {}", self.label(clip));
        self.playing.insert(clip.id());
    }

    fn stop(&mut self, clip: SoundHandle) {
        if self.playing.remove(&clip.id()) {
            debug!("sound stop: {}", self.label(clip));
        }
    }
}

type ClipSource = Decoder<Cursor<Arc<[u8]>>>;

fn decode(bytes: &Arc<[u8]>) -> Result<ClipSource, AudioError> {
    Ok(Decoder::new(Cursor::new(Arc::clone(bytes)))?)
}

struct RodioClip {
    name: String,
    bytes: Arc<[u8]>,
    /// Present from play until stop. Dropping it silences the clip, so the
    /// next play starts from the top.
    sink: Option<Sink>,
}

/// Sound board playing through the default output device
pub struct RodioSoundBoard {
    // Output stops when the stream is dropped
    _stream: OutputStream,
    output: OutputStreamHandle,
    clips: HashMap<AssetId, RodioClip>,
}

impl RodioSoundBoard {
    pub fn try_new() -> Result<Self, AudioError> {
        let (stream, output) = OutputStream::try_default()?;
        Ok(Self {
            _stream: stream,
            output,
            clips: HashMap::new(),
        })
    }
}

impl SoundBoard for RodioSoundBoard {
    fn register(&mut self, clip: &SoundClip) -> Result<(), AudioError> {
        let bytes: Arc<[u8]> = Arc::from(clip.bytes.as_slice());
        // Reject undecodable files now rather than on the first cue
        decode(&bytes)?;
        self.clips.insert(
            clip.handle.id(),
            RodioClip {
                name: clip.name.clone(),
                bytes,
                sink: None,
            },
        );
        Ok(())
    }

    fn play(&mut self, handle: SoundHandle) {
        let Some(clip) = self.clips.get_mut(&handle.id()) else {
            return;
        };

        if let Some(sink) = clip.sink.as_ref().filter(|sink| !sink.empty()) {
            sink.play();
            return;
        }

        let started = Sink::try_new(&self.output)
            .map_err(AudioError::from)
            .and_then(|sink| {
                sink.append(decode(&clip.bytes)?);
                Ok(sink)
            });
        match started {
            Ok(sink) => {
                debug!("sound play: {}", clip.name);
                clip.sink = Some(sink);
            }
            Err(e) => warn!("Could not play {}: {}", clip.name, e),
        }
    }

    fn stop(&mut self, handle: SoundHandle) {
        if let Some(clip) = self.clips.get_mut(&handle.id()) {
            if let Some(sink) = clip.sink.take() {
                sink.stop();
                debug!("sound stop: {}", clip.name);
            }
        }
    }
}
