//! Edge Trigger
//!
//! One-sample rising-edge detector on the boolean input level. During coarse
//! acquisition the first rising transition of a second is the best available
//! estimate of the true window boundary, and the controller uses it to
//! anchor the detector bank.

/// Rising-edge detector over consecutive boolean samples.
#[derive(Debug, Clone, Default)]
pub struct EdgeTrigger {
    last: bool,
}

impl EdgeTrigger {
    /// Create a trigger with the previous sample assumed absent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current sample; returns `true` on a rising transition.
    pub fn update(&mut self, sample: bool) -> bool {
        let rising = sample && !self.last;
        self.last = sample;
        rising
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_on_rising_transition() {
        let mut edge = EdgeTrigger::new();
        assert!(edge.update(true));
        assert!(!edge.update(true));
        assert!(!edge.update(false));
        assert!(edge.update(true));
        assert!(!edge.update(false));
    }

    #[test]
    fn initial_high_level_counts_as_edge() {
        // Previous level is assumed absent at power-on, matching a receiver
        // that starts sampling mid-silence.
        let mut edge = EdgeTrigger::new();
        assert!(edge.update(true));
    }
}
