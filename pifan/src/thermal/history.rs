use std::collections::VecDeque;

use super::config::ThermalConfig;
use super::sample::Sample;

/// Sampling resolution of the history window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum PollMode {
    Baseline,
    /// A temperature edge is in the window: poll faster and keep
    /// proportionally more samples, so the window still covers the same
    /// wall-clock time.
    Fast,
}

/// Oldest-first samples covering a fixed wall-clock window.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    samples: VecDeque<Sample>,
    baseline_capacity: usize,
    fast_capacity: usize,
}

impl HistoryBuffer {
    pub fn new(config: &ThermalConfig) -> Self {
        let fast_capacity = config.capacity(PollMode::Fast);
        Self {
            samples: VecDeque::with_capacity(fast_capacity + 1),
            baseline_capacity: config.capacity(PollMode::Baseline),
            fast_capacity,
        }
    }

    /// Fast while any sample in the window carries an edge trigger.
    pub fn poll_mode(&self) -> PollMode {
        if self.samples.iter().any(|s| s.edge_trigger) {
            PollMode::Fast
        } else {
            PollMode::Baseline
        }
    }

    /// Sample limit for the current poll mode.
    ///
    /// Leaving fast mode shrinks the limit immediately, but the excess is
    /// only dropped on the next [`push`](Self::push).
    pub fn capacity(&self) -> usize {
        match self.poll_mode() {
            PollMode::Baseline => self.baseline_capacity,
            PollMode::Fast => self.fast_capacity,
        }
    }

    /// Append `sample`, then drop the oldest samples in one batch if the
    /// window is over capacity.
    ///
    /// Returns the poll mode the capacity was computed for, i.e. with the
    /// new sample included and before anything was dropped.
    pub fn push(&mut self, sample: Sample) -> PollMode {
        self.samples.push_back(sample);

        let mode = self.poll_mode();
        let capacity = self.capacity();
        if self.samples.len() > capacity {
            let excess = self.samples.len() - capacity;
            self.samples.drain(..excess);
        }

        mode
    }

    pub fn all(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    pub fn latest_mut(&mut self) -> Option<&mut Sample> {
        self.samples.back_mut()
    }

    /// The sample pushed just before the latest one.
    pub fn previous(&self) -> Option<&Sample> {
        self.samples.len().checked_sub(2).and_then(|i| self.samples.get(i))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> HistoryBuffer {
        HistoryBuffer::new(&ThermalConfig::default())
    }

    fn steady(temp: f32) -> Sample {
        Sample::new(temp, false, false)
    }

    fn edge(temp: f32) -> Sample {
        Sample::new(temp, false, true)
    }

    fn temperatures(history: &HistoryBuffer) -> Vec<f32> {
        history.all().map(|s| s.temperature_c).collect()
    }

    #[test]
    fn starts_empty_at_baseline() {
        let history = buffer();
        assert!(history.is_empty());
        assert_eq!(history.poll_mode(), PollMode::Baseline);
        assert_eq!(history.capacity(), 10);
        assert!(history.latest().is_none());
        assert!(history.previous().is_none());
    }

    #[test]
    fn previous_is_second_newest() {
        let mut history = buffer();
        history.push(steady(40.0));
        assert!(history.previous().is_none());

        history.push(steady(41.0));
        assert_eq!(history.previous().unwrap().temperature_c, 40.0);
        assert_eq!(history.latest().unwrap().temperature_c, 41.0);
    }

    #[test]
    fn drops_oldest_beyond_baseline_capacity() {
        let mut history = buffer();
        for i in 0..11 {
            history.push(steady(40.0 + i as f32));
        }

        assert_eq!(history.len(), 10);
        assert_eq!(history.all().next().unwrap().temperature_c, 41.0);
        assert_eq!(history.latest().unwrap().temperature_c, 50.0);
    }

    #[test]
    fn edge_trigger_switches_to_fast_capacity() {
        let mut history = buffer();
        for _ in 0..10 {
            history.push(steady(40.0));
        }

        let mode = history.push(edge(44.0));

        assert_eq!(mode, PollMode::Fast);
        assert_eq!(history.capacity(), 60);
        assert_eq!(history.len(), 11);
    }

    #[test]
    fn fast_window_holds_sixty_samples() {
        let mut history = buffer();
        history.push(edge(44.0));
        for _ in 0..59 {
            assert_eq!(history.push(steady(44.0)), PollMode::Fast);
        }

        assert_eq!(history.len(), 60);
        assert!(history.all().next().unwrap().edge_trigger);
    }

    #[test]
    fn leaving_fast_mode_truncates_in_one_batch() {
        let mut history = buffer();
        history.push(edge(44.0));
        for i in 1..60 {
            history.push(steady(i as f32));
        }
        assert_eq!(history.len(), 60);

        // Pushes the edge sample out, but it counted toward this truncation
        assert_eq!(history.push(steady(60.0)), PollMode::Fast);
        assert_eq!(history.len(), 60);
        assert_eq!(history.capacity(), 10);

        assert_eq!(history.push(steady(61.0)), PollMode::Baseline);
        assert_eq!(history.len(), 10);
        assert_eq!(
            temperatures(&history),
            (52..=61).map(|t| t as f32).collect::<Vec<_>>()
        );
    }

    #[test]
    fn window_span_is_constant_across_modes() {
        let config = ThermalConfig::default();
        let mut history = HistoryBuffer::new(&config);

        history.push(steady(40.0));
        let baseline = config.poll_interval(history.poll_mode()) * history.capacity() as u32;

        history.push(edge(45.0));
        let fast = config.poll_interval(history.poll_mode()) * history.capacity() as u32;

        assert_eq!(baseline, config.history_window);
        assert_eq!(fast, config.history_window);
    }
}
