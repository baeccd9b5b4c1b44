//! Number and percentage formatting for chart labels.

/// Compact display form: `1.5M`, `12.0K`, `42`, `3.5`.
pub fn format_number(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// Share of `total` as `xx.x%`. A zero total yields `0.0%`.
pub fn format_percentage(value: f64, total: f64) -> String {
    if total == 0.0 || !total.is_finite() {
        return "0.0%".to_string();
    }
    format!("{:.1}%", value / total * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_thresholds() {
        assert_eq!(format_number(2_500_000.0), "2.5M");
        assert_eq!(format_number(1_000_000.0), "1.0M");
        assert_eq!(format_number(125_000.0), "125.0K");
        assert_eq!(format_number(1_000.0), "1.0K");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(12.345), "12.3");
        assert_eq!(format_number(-7.0), "-7");
    }

    #[test]
    fn test_percentages() {
        let data = [30.0, 30.0, 40.0];
        let total: f64 = data.iter().sum();
        let labels: Vec<String> = data.iter().map(|v| format_percentage(*v, total)).collect();
        assert_eq!(labels, vec!["30.0%", "30.0%", "40.0%"]);
        assert_eq!(format_percentage(1.0, 3.0), "33.3%");
    }

    #[test]
    fn test_zero_total() {
        assert_eq!(format_percentage(0.0, 0.0), "0.0%");
    }
}
