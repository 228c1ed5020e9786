//! Narration pacing heuristics
//!
//! A scene's words-per-minute score tells the author whether the text fits
//! its window when read aloud. 160 WPM with a ±40 tolerance band is the
//! baseline; anything outside the band gets the attention color in the
//! sidebar. TALKING scenes are never scored.

/// Baseline speech rate in words per minute.
pub const BASELINE_WPM: f64 = 160.0;

/// Tolerance band around the baseline.
pub const WPM_TOLERANCE: f64 = 40.0;

/// Words per minute for a description read over its scene window.
pub fn words_per_minute(start_ms: u64, end_ms: u64, text: &str) -> f64 {
    let minutes = end_ms.saturating_sub(start_ms) as f64 / 60_000.0;
    if minutes <= 0.0 {
        return 0.0;
    }
    let words = text.split_whitespace().count() as f64;
    words / minutes
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PacingRating {
    TooSlow,
    Good,
    TooFast,
}

impl PacingRating {
    pub fn rate(wpm: f64) -> Self {
        if wpm < BASELINE_WPM - WPM_TOLERANCE {
            PacingRating::TooSlow
        } else if wpm > BASELINE_WPM + WPM_TOLERANCE {
            PacingRating::TooFast
        } else {
            PacingRating::Good
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_words_over_a_minute_is_ten_wpm_and_too_slow() {
        let wpm = words_per_minute(0, 60_000, "one two three four five six seven eight nine ten");
        assert_eq!(wpm, 10.0);
        assert_eq!(PacingRating::rate(wpm), PacingRating::TooSlow);
    }

    #[test]
    fn band_edges_are_inclusive() {
        assert_eq!(PacingRating::rate(120.0), PacingRating::Good);
        assert_eq!(PacingRating::rate(200.0), PacingRating::Good);
        assert_eq!(PacingRating::rate(119.9), PacingRating::TooSlow);
        assert_eq!(PacingRating::rate(200.1), PacingRating::TooFast);
    }

    #[test]
    fn degenerate_window_scores_zero() {
        assert_eq!(words_per_minute(1_000, 1_000, "some words"), 0.0);
    }

    #[test]
    fn whitespace_runs_do_not_inflate_word_count() {
        assert_eq!(words_per_minute(0, 60_000, "  two   words  "), 2.0);
    }
}
