use std::io::{self, Write};

use log::warn;

use crate::events::{EventSink, GameEvent};

/// Sound stand-in for the terminal: rings the bell on crashes and a cleared
/// board, and stays quiet while muted.
///
/// Apples are silent; a bell on every apple gets old fast.
#[derive(Debug)]
pub struct BellSink<O: Write = io::Stdout> {
    out: O,
    muted: bool,
}

impl BellSink<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<O: Write> BellSink<O> {
    #[must_use]
    pub fn new(out: O) -> Self {
        Self { out, muted: false }
    }

    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn ring(&mut self) -> io::Result<()> {
        self.out.write_all(b"\x07")?;
        self.out.flush()
    }
}

impl<O: Write> EventSink for BellSink<O> {
    fn emit(&mut self, event: GameEvent) {
        if self.muted || event == GameEvent::FoodEaten {
            return;
        }

        if let Err(error) = self.ring() {
            warn!("failed to ring terminal bell: {error}");
        }
    }

    fn toggle_mute(&mut self) {
        self.muted = !self.muted;
    }
}

#[cfg(test)]
mod tests {
    use super::BellSink;
    use crate::events::{EventSink, GameEvent};

    #[test]
    fn crash_rings_the_bell() {
        let mut sink = BellSink::new(Vec::new());

        sink.emit(GameEvent::FoodEaten);
        sink.emit(GameEvent::Crashed);

        assert_eq!(sink.out, b"\x07");
    }

    #[test]
    fn muted_sink_stays_silent() {
        let mut sink = BellSink::new(Vec::new());

        sink.toggle_mute();
        sink.emit(GameEvent::Crashed);
        sink.emit(GameEvent::BoardFull);

        assert!(sink.is_muted());
        assert!(sink.out.is_empty());

        sink.toggle_mute();
        sink.emit(GameEvent::BoardFull);
        assert_eq!(sink.out, b"\x07");
    }
}
