/// Screen-reader output channel. Fire-and-forget: implementations must not
/// block the calling tick, and failures stay on their side of the seam.
pub trait AnnouncementSink {
    fn speak(&mut self, text: &str);

    /// Cut off anything currently being spoken and say this instead.
    fn speak_interrupt(&mut self, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Normal,
    /// Bypasses duplicate suppression and interrupts in-flight speech.
    High,
}

/// Sink that writes announcements to stdout. Default for live runs without
/// a real TTS bridge attached.
pub struct ConsoleSink;

impl AnnouncementSink for ConsoleSink {
    fn speak(&mut self, text: &str) {
        println!("[speech] {}", text);
    }

    fn speak_interrupt(&mut self, text: &str) {
        println!("[speech!] {}", text);
    }
}
