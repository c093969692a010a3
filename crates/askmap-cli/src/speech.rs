//! Terminal stand-ins for a microphone and a speaker.

use askmap_core::voice::{AudioCue, SpeechEvent, SpeechEventSender, SpeechRecognizer};
use askmap_core::Result;
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// "Recognizes" one line typed on stdin.
///
/// An empty line reports `no-speech`, like a browser recognizer that heard
/// nothing. `stop` only suppresses events that have not been sent yet.
#[derive(Debug, Default)]
pub struct LineRecognizer {
    stopped: Arc<AtomicBool>,
}

impl LineRecognizer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpeechRecognizer for LineRecognizer {
    fn start(&self, locale: &str, events: SpeechEventSender) -> Result<()> {
        self.stopped.store(false, Ordering::SeqCst);
        let stopped = Arc::clone(&self.stopped);
        eprint!("Type what you would say ({locale}) and press Enter: ");
        std::io::stderr().flush()?;

        std::thread::spawn(move || {
            let mut line = String::new();
            let event = match std::io::stdin().lock().read_line(&mut line) {
                Ok(_) if !line.trim().is_empty() => SpeechEvent::Result(line.trim().to_string()),
                Ok(_) => SpeechEvent::Error("no-speech".into()),
                Err(e) => SpeechEvent::Error(format!("audio-capture: {e}")),
            };
            if stopped.load(Ordering::SeqCst) {
                return;
            }
            let is_result = matches!(event, SpeechEvent::Result(_));
            // receiver gone means the session is over; nothing to report to
            let _ = events.unbounded_send(event);
            if is_result {
                let _ = events.unbounded_send(SpeechEvent::SpeechEnd);
            }
        });
        Ok(())
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}

/// ASCII BEL on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl AudioCue for TerminalBell {
    fn play(&self) -> Result<()> {
        let mut err = std::io::stderr();
        err.write_all(b"\x07")?;
        err.flush()?;
        Ok(())
    }
}
