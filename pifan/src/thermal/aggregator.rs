use super::history::HistoryBuffer;

/// Effective historical maximum temperature over the window.
///
/// While any sample in the window was taken under boost, the peak memory
/// of every sample also counts, and the result is written into the newest
/// sample's memory. A short boost therefore keeps the fans up for as long
/// as the boosted sample stays in the window; once it ages out nothing
/// reinforces the chain and the memory stops counting.
///
/// An empty window reads as 0 °C.
pub fn aggregate(history: &mut HistoryBuffer) -> f32 {
    let was_boosted = history.all().any(|s| s.boosted);

    let mut max_temp = history.all().map(|s| s.temperature_c).fold(0.0, f32::max);

    if was_boosted {
        max_temp = history
            .all()
            .map(|s| s.boost_peak_memory_c)
            .fold(max_temp, f32::max);

        if let Some(latest) = history.latest_mut() {
            latest.boost_peak_memory_c = max_temp;
        }
    }

    max_temp
}
