//! Identity keys for locally created entities

use crate::entity::EntityId;

/// Mints `temp_<millis>` keys.
///
/// Two adds inside the same millisecond must not collide, so the generator
/// never hands out a timestamp at or below the last one it issued.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next key from the system clock, distinct from every key in `taken`
    pub fn next(&mut self, taken: impl Fn(&EntityId) -> bool) -> EntityId {
        self.next_at(jiff::Timestamp::now().as_millisecond(), taken)
    }

    /// Next key at or after `now_millis`
    pub fn next_at(&mut self, now_millis: i64, taken: impl Fn(&EntityId) -> bool) -> EntityId {
        let mut candidate = now_millis.max(self.last + 1);
        loop {
            let id = EntityId::temp(candidate);
            if !taken(&id) {
                self.last = candidate;
                return id;
            }
            candidate += 1;
        }
    }
}
