use std::fmt;

/// Identity of one dispatch. Completions carrying any other generation are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues generations and remembers the one currently in flight.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct FlightTracker {
    issued: u64,
    current: Option<Generation>,
}

impl FlightTracker {
    pub(crate) fn begin(&mut self) -> Generation {
        self.issued += 1;
        let generation = Generation(self.issued);
        self.current = Some(generation);
        generation
    }

    /// Returns false when `generation` is not the tracked one.
    pub(crate) fn complete(&mut self, generation: Generation) -> bool {
        if self.current == Some(generation) {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn current(&self) -> Option<Generation> {
        self.current
    }
}
