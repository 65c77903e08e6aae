//! Audio transcription and text-to-speech collaborator ports.
//!
//! The core only sees these at their interface boundary: a failure surfaces
//! as a user-visible message and never ends the session. Recording hardware
//! and playback devices belong to the host.

use std::sync::Mutex;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("No transcription service is configured")]
    NotConfigured,

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Speech playback failed: {0}")]
    Playback(String),
}

/// Speech-to-text collaborator.
pub trait Transcriber {
    fn transcribe(&self, audio: &[u8]) -> Result<String, SpeechError>;
}

/// Text-to-speech collaborator. Fire-and-forget; the host enforces at most
/// one concurrent playback.
pub trait SpeechSynthesizer {
    fn speak(&self, text: &str) -> Result<PlaybackHandle, SpeechError>;
}

/// Opaque handle to a started playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackHandle(pub u64);

/// Mock transcriber returning a fixed transcript.
pub struct MockTranscriber {
    transcript: String,
    fail: bool,
}

impl MockTranscriber {
    pub fn new(transcript: &str) -> Self {
        Self {
            transcript: transcript.to_string(),
            fail: false,
        }
    }

    /// A transcriber whose backend always errors.
    pub fn failing() -> Self {
        Self {
            transcript: String::new(),
            fail: true,
        }
    }
}

impl Transcriber for MockTranscriber {
    fn transcribe(&self, audio: &[u8]) -> Result<String, SpeechError> {
        if self.fail {
            return Err(SpeechError::Transcription("backend unavailable".into()));
        }
        if audio.is_empty() {
            return Err(SpeechError::Transcription("no audio captured".into()));
        }
        Ok(self.transcript.clone())
    }
}

/// Mock synthesizer handing out sequential playback handles.
#[derive(Default)]
pub struct MockSpeech {
    next_handle: Mutex<u64>,
}

impl MockSpeech {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpeechSynthesizer for MockSpeech {
    fn speak(&self, _text: &str) -> Result<PlaybackHandle, SpeechError> {
        let mut next = self.next_handle.lock().unwrap();
        *next += 1;
        Ok(PlaybackHandle(*next))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_transcriber_returns_transcript() {
        let t = MockTranscriber::new("tomorrow at 2pm");
        assert_eq!(t.transcribe(b"audio").unwrap(), "tomorrow at 2pm");
    }

    #[test]
    fn empty_audio_is_an_error() {
        let t = MockTranscriber::new("anything");
        assert!(matches!(
            t.transcribe(&[]),
            Err(SpeechError::Transcription(_))
        ));
    }

    #[test]
    fn failing_transcriber_errors() {
        let t = MockTranscriber::failing();
        assert!(t.transcribe(b"audio").is_err());
    }

    #[test]
    fn playback_handles_are_sequential() {
        let speech = MockSpeech::new();
        let a = speech.speak("hello").unwrap();
        let b = speech.speak("again").unwrap();
        assert_ne!(a, b);
    }
}
