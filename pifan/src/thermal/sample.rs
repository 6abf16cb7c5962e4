use super::selector::FanLevel;

/// One poll of the sensors and what the controller made of it.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub temperature_c: f32,

    /// Either clock domain was above its unboosted ceiling.
    pub boosted: bool,

    /// Effective historical maximum carried forward while a boosted sample
    /// is in the window. Zero when no boost was in the window.
    pub boost_peak_memory_c: f32,

    /// Temperature jumped by at least the edge delta since the previous
    /// sample.
    pub edge_trigger: bool,

    /// Level applied (or kept) for this sample; `None` until selected.
    pub selected_level: Option<FanLevel>,
}

impl Sample {
    pub fn new(temperature_c: f32, boosted: bool, edge_trigger: bool) -> Self {
        Self {
            temperature_c,
            boosted,
            boost_peak_memory_c: 0.0,
            edge_trigger,
            selected_level: None,
        }
    }
}
