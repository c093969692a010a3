// crates/askmap-core/src/voice.rs

//! # Voice Input Adapter
//!
//! Push-to-talk: play a cue, show "listening", run one recognition session
//! in a fixed locale and hand the transcript to the search field.
//!
//! Recognizers report back through a channel of [`SpeechEvent`]s instead of
//! callbacks; the session consumes them at its single dispatch point.

use crate::error::{AskMapError, Result};
use crate::lock;
use futures::channel::mpsc;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// A recognized utterance.
    Result(String),
    /// Recognition failed with a recognizer-specific code (`no-speech`, `network`, ...).
    Error(String),
    /// The speaker stopped talking.
    SpeechEnd,
}

pub type SpeechEventSender = mpsc::UnboundedSender<SpeechEvent>;
pub type SpeechEventReceiver = mpsc::UnboundedReceiver<SpeechEvent>;

/// A speech-to-text backend.
pub trait SpeechRecognizer: Send + Sync {
    /// Begin one session. Events for it go to `events`.
    fn start(&self, locale: &str, events: SpeechEventSender) -> Result<()>;
    fn stop(&self);
}

/// The short sound played when listening starts.
pub trait AudioCue: Send + Sync {
    fn play(&self) -> Result<()>;
}

/// No sound at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentCue;

impl AudioCue for SilentCue {
    fn play(&self) -> Result<()> {
        Ok(())
    }
}

/// State of the push-to-talk control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListenIndicator {
    #[default]
    Ready,
    Listening,
}

impl ListenIndicator {
    pub fn label(self) -> &'static str {
        match self {
            ListenIndicator::Ready => "🎤 Speak",
            ListenIndicator::Listening => "Listening...",
        }
    }
}

#[derive(Debug, Default)]
struct VoiceState {
    indicator: ListenIndicator,
    active: bool,
}

pub struct VoiceInput {
    recognizer: Arc<dyn SpeechRecognizer>,
    cue: Arc<dyn AudioCue>,
    locale: String,
    events: SpeechEventSender,
    state: Mutex<VoiceState>,
}

impl VoiceInput {
    /// The returned receiver yields every event of every session started
    /// through this adapter.
    pub fn new(
        recognizer: Arc<dyn SpeechRecognizer>,
        cue: Arc<dyn AudioCue>,
        locale: impl Into<String>,
    ) -> (Self, SpeechEventReceiver) {
        let (tx, rx) = mpsc::unbounded();
        let voice = Self {
            recognizer,
            cue,
            locale: locale.into(),
            events: tx,
            state: Mutex::new(VoiceState::default()),
        };
        (voice, rx)
    }

    /// Start listening. Rejected with [`AskMapError::VoiceBusy`] while a
    /// session is already running.
    pub fn capture_speech(&self) -> Result<()> {
        {
            let mut state = lock(&self.state);
            if state.active {
                return Err(AskMapError::VoiceBusy);
            }
            state.active = true;
            state.indicator = ListenIndicator::Listening;
        }

        if let Err(e) = self.cue.play() {
            tracing::info!(error = %e, "audio cue failed");
        }

        if let Err(e) = self.recognizer.start(&self.locale, self.events.clone()) {
            tracing::error!(error = %e, "could not start speech recognition");
            self.reset(false);
            return Err(e);
        }

        tracing::debug!(locale = %self.locale, "listening");
        Ok(())
    }

    /// Apply one recognizer event. Returns the transcript to put in the
    /// search field, if this event carried one.
    pub fn handle_event(&self, event: &SpeechEvent) -> Option<String> {
        match event {
            SpeechEvent::Result(transcript) => {
                // the session is over for us even if the recognizer never
                // follows up with SpeechEnd
                self.reset(false);
                tracing::debug!(transcript = %transcript, "speech recognized");
                Some(transcript.clone())
            }
            SpeechEvent::Error(code) => {
                tracing::error!(code = %code, "speech recognition error");
                self.reset(true);
                None
            }
            SpeechEvent::SpeechEnd => {
                self.reset(true);
                None
            }
        }
    }

    fn reset(&self, stop: bool) {
        {
            let mut state = lock(&self.state);
            state.indicator = ListenIndicator::Ready;
            state.active = false;
        }
        if stop {
            self.recognizer.stop();
        }
    }

    pub fn indicator(&self) -> ListenIndicator {
        lock(&self.state).indicator
    }

    pub fn is_active(&self) -> bool {
        lock(&self.state).active
    }
}
