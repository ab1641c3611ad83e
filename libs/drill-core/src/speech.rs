//! Pronunciation playback.
//!
//! Synthesis itself lives outside this crate behind [`SpeechBackend`]. The
//! catalog caches the backend's voice list, loading it on first use and
//! reloading it on an explicit [`VoiceCatalog::refresh`] (hosts call it when
//! the platform reports that its voice list changed).

use serde::{Deserialize, Serialize};

/// Language used when none is given.
pub const DEFAULT_LANG: &str = "en-US";

/// Installed synthesis voice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    pub lang: String,
}

/// One request to speak a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Utterance {
    pub text: String,
    pub lang: String,
    pub voice: Option<Voice>,
    pub rate: f32,
}

/// Callback invoked once an utterance finishes playing.
pub type OnEnd = Box<dyn FnOnce() + Send>;

/// Platform speech engine.
pub trait SpeechBackend {
    /// Voices currently installed. May be empty until the platform is ready.
    fn voices(&self) -> Vec<Voice>;

    /// Stop whatever is being spoken.
    fn cancel(&mut self);

    fn speak(&mut self, utterance: Utterance, on_end: Option<OnEnd>);
}

/// Cached voice list with explicit lifecycle.
pub struct VoiceCatalog<B> {
    backend: B,
    voices: Vec<Voice>,
}

impl<B: SpeechBackend> VoiceCatalog<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            voices: Vec::new(),
        }
    }

    /// Reload the cached voice list from the backend.
    pub fn refresh(&mut self) {
        self.voices = self.backend.voices();
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Exact language match first, then any English voice.
    pub fn preferred_voice(&mut self, lang: &str) -> Option<Voice> {
        if self.voices.is_empty() {
            self.refresh();
        }
        self.voices
            .iter()
            .find(|v| v.lang == lang)
            .or_else(|| self.voices.iter().find(|v| v.lang.starts_with("en")))
            .cloned()
    }

    /// Speak `text`, interrupting any utterance in progress.
    pub fn speak(&mut self, text: &str, lang: &str, on_end: Option<OnEnd>) {
        let voice = self.preferred_voice(lang);
        self.backend.cancel();
        self.backend.speak(
            Utterance {
                text: text.to_string(),
                lang: lang.to_string(),
                voice,
                rate: 1.0,
            },
            on_end,
        );
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// What a client should pronounce for the word on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechCue {
    pub text: String,
    pub lang: String,
    /// Delay before speaking, in milliseconds.
    pub lead_ms: u64,
}

impl SpeechCue {
    pub fn english(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            lang: DEFAULT_LANG.to_string(),
            lead_ms: crate::timing::PRONOUNCE_LEAD_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeBackend {
        installed: Vec<Voice>,
        cancels: usize,
        spoken: Vec<Utterance>,
    }

    impl SpeechBackend for FakeBackend {
        fn voices(&self) -> Vec<Voice> {
            self.installed.clone()
        }

        fn cancel(&mut self) {
            self.cancels += 1;
        }

        fn speak(&mut self, utterance: Utterance, on_end: Option<OnEnd>) {
            self.spoken.push(utterance);
            if let Some(cb) = on_end {
                cb();
            }
        }
    }

    fn voice(name: &str, lang: &str) -> Voice {
        Voice {
            name: name.to_string(),
            lang: lang.to_string(),
        }
    }

    #[test]
    fn exact_language_preferred() {
        let backend = FakeBackend {
            installed: vec![voice("Daniel", "en-GB"), voice("Samantha", "en-US")],
            ..Default::default()
        };
        let mut catalog = VoiceCatalog::new(backend);
        assert_eq!(catalog.preferred_voice("en-US").unwrap().name, "Samantha");
    }

    #[test]
    fn falls_back_to_any_english_voice() {
        let backend = FakeBackend {
            installed: vec![voice("Kyoko", "ja-JP"), voice("Daniel", "en-GB")],
            ..Default::default()
        };
        let mut catalog = VoiceCatalog::new(backend);
        assert_eq!(catalog.preferred_voice("en-AU").unwrap().name, "Daniel");
    }

    #[test]
    fn no_voice_when_nothing_matches() {
        let backend = FakeBackend {
            installed: vec![voice("Kyoko", "ja-JP")],
            ..Default::default()
        };
        let mut catalog = VoiceCatalog::new(backend);
        assert!(catalog.preferred_voice("en-US").is_none());
    }

    #[test]
    fn voice_list_loaded_lazily_and_refreshed_explicitly() {
        let mut catalog = VoiceCatalog::new(FakeBackend::default());
        assert!(catalog.voices().is_empty());
        assert!(catalog.preferred_voice("en-US").is_none());

        catalog.backend.installed = vec![voice("Samantha", "en-US")];
        catalog.refresh();
        assert_eq!(catalog.voices().len(), 1);
        assert!(catalog.preferred_voice("en-US").is_some());
    }

    #[test]
    fn speak_cancels_then_plays_and_calls_back() {
        let backend = FakeBackend {
            installed: vec![voice("Samantha", "en-US")],
            ..Default::default()
        };
        let mut catalog = VoiceCatalog::new(backend);
        let done = Arc::new(AtomicBool::new(false));
        let flag = done.clone();
        catalog.speak(
            "deduce",
            DEFAULT_LANG,
            Some(Box::new(move || flag.store(true, Ordering::SeqCst))),
        );

        let backend = catalog.backend();
        assert_eq!(backend.cancels, 1);
        assert_eq!(backend.spoken.len(), 1);
        assert_eq!(backend.spoken[0].text, "deduce");
        assert_eq!(backend.spoken[0].rate, 1.0);
        assert_eq!(backend.spoken[0].voice.as_ref().unwrap().name, "Samantha");
        assert!(done.load(Ordering::SeqCst));
    }

    #[test]
    fn cue_defaults() {
        let cue = SpeechCue::english("merge");
        assert_eq!(cue.lang, "en-US");
        assert_eq!(cue.lead_ms, 300);
    }
}
