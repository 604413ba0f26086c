/// Discrete gameplay events for audio or other fire-and-forget observers.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameEvent {
    FoodEaten,
    Crashed,
    BoardFull,
}

/// Receives events emitted by the game session.
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);

    /// Flips the sink's mute flag. Sinks without one ignore it.
    fn toggle_mute(&mut self) {}
}

/// Records events in order; handy for replays and tests.
impl EventSink for Vec<GameEvent> {
    fn emit(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}
