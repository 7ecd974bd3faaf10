use crate::host::locale::Localization;
use crate::host::speech::{AnnouncementSink, Priority};

/// Wraps the raw sink with the crate's speaking discipline: exactly one
/// utterance per discrete user action, exact repeats of the previous
/// utterance dropped unless the new one is high-priority.
pub struct Announcer {
    sink: Box<dyn AnnouncementSink>,
    locale: Box<dyn Localization>,
    last: Option<String>,
}

impl Announcer {
    pub fn new(sink: Box<dyn AnnouncementSink>, locale: Box<dyn Localization>) -> Self {
        Self {
            sink,
            locale,
            last: None,
        }
    }

    pub fn announce(&mut self, text: &str, priority: Priority) {
        match priority {
            Priority::Normal => {
                if self.last.as_deref() == Some(text) {
                    return; // duplicate suppression
                }
                self.sink.speak(text);
            }
            Priority::High => {
                self.sink.speak_interrupt(text);
            }
        }
        self.last = Some(text.to_string());
    }

    /// Announce a localized fixed phrase by key.
    pub fn announce_phrase(&mut self, key: &str, priority: Priority) {
        let text = self.locale.resolve(key);
        self.announce(&text, priority);
    }

    /// Resolve a phrase without speaking it, for composed announcements.
    pub fn phrase(&self, key: &str) -> String {
        self.locale.resolve(key)
    }

    pub fn last_spoken(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Forget the last utterance so the next identical one speaks again.
    /// Used when re-reading the current position on demand.
    pub fn reset_suppression(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::{RecordingSink, SpeechLog};
    use crate::host::locale::StaticLocale;

    fn announcer(log: &SpeechLog) -> Announcer {
        Announcer::new(
            Box::new(RecordingSink::new(log.clone())),
            Box::new(StaticLocale),
        )
    }

    #[test]
    fn drops_exact_repeats_at_normal_priority() {
        let log = SpeechLog::new();
        let mut a = announcer(&log);
        a.announce("1 of 3: Play", Priority::Normal);
        a.announce("1 of 3: Play", Priority::Normal);
        assert_eq!(log.lines().len(), 1, "Exact repeat is suppressed");
    }

    #[test]
    fn phrase_keys_pass_through_the_locale_seam() {
        let log = SpeechLog::new();
        let mut a = Announcer::new(
            Box::new(RecordingSink::new(log.clone())),
            Box::new(crate::host::locale::KeyEcho),
        );
        a.announce_phrase("phrase.end_of_list", Priority::Normal);
        assert_eq!(log.last().unwrap(), "phrase.end_of_list");
    }

    #[test]
    fn high_priority_bypasses_suppression() {
        let log = SpeechLog::new();
        let mut a = announcer(&log);
        a.announce_phrase("phrase.end_of_list", Priority::High);
        a.announce_phrase("phrase.end_of_list", Priority::High);
        assert_eq!(log.lines().len(), 2, "Boundary phrase repeats every attempt");
        assert!(log.0.borrow()[0].interrupt);
    }
}
