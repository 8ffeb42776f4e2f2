//! Percent strings for snapshot fields.

/// `x` as a percentage with `decimals` places; exactly zero renders as `"0%"`.
pub fn format_percent(x: f64, decimals: usize) -> String {
    if x == 0.0 {
        return "0%".to_string();
    }
    format!("{:.*}%", decimals, x * 100.0)
}

/// Headline success rate: no decimals.
pub fn format_headline(x: f64) -> String {
    format_percent(x, 0)
}

/// Per-track probability: two decimals.
pub fn format_track_probability(x: f64) -> String {
    format_percent(x, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_bare_percent() {
        assert_eq!(format_headline(0.0), "0%");
        assert_eq!(format_track_probability(0.0), "0%");
    }

    #[test]
    fn decimals_follow_field() {
        assert_eq!(format_headline(0.75), "75%");
        assert_eq!(format_headline(0.25), "25%");
        assert_eq!(format_track_probability(0.05919555623216688), "5.92%");
        assert_eq!(format_track_probability(0.035396335823418536), "3.54%");
        assert_eq!(format_track_probability(1.0), "100.00%");
    }
}
