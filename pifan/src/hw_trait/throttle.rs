use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// The firmware's `get_throttled` word.
    ///
    /// The low half-word reports conditions active right now, the high
    /// half-word latches anything that has happened since boot. Bits the
    /// firmware defines beyond these are retained as-is.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ThrottleFlags: u32 {
        const UNDER_VOLTAGE = 1 << 0;
        const FREQUENCY_CAPPED = 1 << 1;
        const THROTTLED = 1 << 2;
        const SOFT_TEMP_LIMIT = 1 << 3;
        const UNDER_VOLTAGE_OCCURRED = 1 << 16;
        const FREQUENCY_CAPPED_OCCURRED = 1 << 17;
        const THROTTLED_OCCURRED = 1 << 18;
        const SOFT_TEMP_LIMIT_OCCURRED = 1 << 19;
    }
}

impl ThrottleFlags {
    pub fn from_raw(raw: u32) -> Self {
        Self::from_bits_retain(raw)
    }
}

impl fmt::Display for ThrottleFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.bits())?;
        let mut names = self.iter_names().map(|(name, _)| name).peekable();
        if names.peek().is_some() {
            write!(f, " [{}]", names.collect::<Vec<_>>().join(" | "))?;
        }
        Ok(())
    }
}
