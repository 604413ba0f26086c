use std::collections::VecDeque;

use crate::direction::Direction;

/// FIFO of pending turns, so quick key presses chain across ticks.
///
/// Each queued direction is checked against the one before it (the queue tail,
/// or the snake's current direction when empty): repeats and reversals are
/// dropped, so no dequeued sequence can turn the snake back into itself.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    pending: VecDeque<Direction>,
}

impl InputQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `candidate` if it is a real turn relative to the last committed
    /// direction. Returns whether it was queued.
    pub fn try_enqueue(&mut self, candidate: Direction, current_direction: Direction) -> bool {
        let reference = self.pending.back().copied().unwrap_or(current_direction);
        if candidate == reference || candidate == reference.opposite() {
            return false;
        }

        self.pending.push_back(candidate);
        true
    }

    /// Pops the oldest queued direction, if any.
    pub fn dequeue_if_any(&mut self) -> Option<Direction> {
        self.pending.pop_front()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Iterates over queued directions, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Direction> {
        self.pending.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::direction::Direction;

    use super::InputQueue;

    const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    #[test]
    fn repeat_of_current_direction_is_rejected() {
        let mut queue = InputQueue::new();

        assert!(!queue.try_enqueue(Direction::Right, Direction::Right));
        assert!(queue.is_empty());
    }

    #[test]
    fn reversal_of_current_direction_is_rejected() {
        let mut queue = InputQueue::new();

        assert!(!queue.try_enqueue(Direction::Left, Direction::Right));
        assert!(queue.is_empty());
    }

    #[test]
    fn perpendicular_turn_is_accepted() {
        let mut queue = InputQueue::new();

        assert!(queue.try_enqueue(Direction::Up, Direction::Right));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.dequeue_if_any(), Some(Direction::Up));
        assert_eq!(queue.dequeue_if_any(), None);
    }

    #[test]
    fn queued_tail_becomes_the_reference() {
        let mut queue = InputQueue::new();
        queue.try_enqueue(Direction::Up, Direction::Right);

        // Down reverses the queued Up even though it is legal against Right.
        assert!(!queue.try_enqueue(Direction::Down, Direction::Right));
        assert!(!queue.try_enqueue(Direction::Up, Direction::Right));
        // Left is perpendicular to the queued Up, so the U-turn chains.
        assert!(queue.try_enqueue(Direction::Left, Direction::Right));

        let drained: Vec<_> = std::iter::from_fn(|| queue.dequeue_if_any()).collect();
        assert_eq!(drained, vec![Direction::Up, Direction::Left]);
    }

    #[test]
    fn drained_sequences_never_repeat_or_reverse() {
        // Exhaustively press every 4-key sequence from every starting direction.
        for current in ALL {
            for a in ALL {
                for b in ALL {
                    for c in ALL {
                        for d in ALL {
                            let mut queue = InputQueue::new();
                            for press in [a, b, c, d] {
                                queue.try_enqueue(press, current);
                            }

                            let mut previous = current;
                            while let Some(next) = queue.dequeue_if_any() {
                                assert_ne!(next, previous);
                                assert_ne!(next, previous.opposite());
                                previous = next;
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn clear_empties_the_queue() {
        let mut queue = InputQueue::new();
        queue.try_enqueue(Direction::Up, Direction::Right);
        queue.try_enqueue(Direction::Right, Direction::Right);

        queue.clear();

        assert!(queue.is_empty());
        assert_eq!(queue.iter().count(), 0);
    }
}
