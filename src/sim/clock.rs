/// Second-granularity clock over a fixed horizon.
///
/// The queue simulator has no early termination: every second of the
/// horizon is visited exactly once, in order.
///
/// # Examples
///
/// ```
/// use qdelay_sim::sim::clock::Clock;
///
/// let mut clock = Clock::new(3);
/// let mut seconds = Vec::new();
///
/// clock.run(|t| seconds.push(t));
/// assert_eq!(seconds, vec![0, 1, 2]);
/// ```
pub struct Clock {
    /// Next second to hand out
    current: usize,
    /// Horizon length in seconds
    horizon: usize,
}

impl Clock {
    /// Creates a clock covering `horizon` seconds.
    pub fn new(horizon: usize) -> Self {
        Self {
            current: 0,
            horizon,
        }
    }

    /// Returns the current second and advances, or `None` past the horizon.
    pub fn tick(&mut self) -> Option<usize> {
        if self.current < self.horizon {
            let t = self.current;
            self.current += 1;
            Some(t)
        } else {
            None
        }
    }

    /// Calls `f` once for every remaining second.
    pub fn run(&mut self, mut f: impl FnMut(usize)) {
        while let Some(t) = self.tick() {
            f(t);
        }
    }
}
