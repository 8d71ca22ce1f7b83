use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Tag identifying one in-flight request of a resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen{}", self.0)
    }
}

/// Monotonic source of generations for one resource.
#[derive(Debug, Default)]
pub struct GenerationCounter {
    last: AtomicU64,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a generation strictly greater than every previous one.
    pub fn next(&self) -> Generation {
        Generation(self.last.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_increase() {
        let counter = GenerationCounter::new();
        let first = counter.next();
        let second = counter.next();
        assert_eq!(first, Generation(1));
        assert!(second > first);
    }
}
