//! Emission arithmetic and read-side aggregation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domains::bills::models::EmissionRow;

/// kg CO2 emitted per consumed unit (kWh).
pub const CO2_PER_UNIT: f64 = 0.82;

/// Estimated kg CO2 for the consumed units, as a fixed-point string with
/// two decimal places.
pub fn calc_carbon(units: f64) -> String {
    format!("{:.2}", units * CO2_PER_UNIT)
}

/// Totals returned by GET /emissions-summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionsSummary {
    pub total: f64,
    pub monthly: BTreeMap<String, f64>,
}

/// Fold all stored bills into a grand total and per-month sums.
///
/// Missing or unparseable emission values count as zero; bills without a
/// billing month are grouped under "Unknown". A month whose every bill
/// lacks an emission still appears, with a zero sum.
pub fn summarize(rows: &[EmissionRow]) -> EmissionsSummary {
    let mut monthly = BTreeMap::new();
    let mut total = 0.0;

    for row in rows {
        let month = match row.billing_month.as_deref() {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => "Unknown".to_string(),
        };
        let emitted = row
            .carbon_emitted
            .as_deref()
            .and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(0.0);

        *monthly.entry(month).or_insert(0.0) += emitted;
        total += emitted;
    }

    EmissionsSummary { total, monthly }
}

/// Usage lines fed to the insights prompt, e.g. `"Jan: 82.00 kg CO2"`.
///
/// Emission values are passed through as stored; a bill with no emission
/// reads as 0.
pub fn usage_lines(rows: &[EmissionRow]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            format!(
                "{}: {} kg CO2",
                row.billing_month.as_deref().unwrap_or("Unknown"),
                row.carbon_emitted.as_deref().unwrap_or("0"),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(month: Option<&str>, emitted: Option<&str>) -> EmissionRow {
        EmissionRow {
            billing_month: month.map(String::from),
            carbon_emitted: emitted.map(String::from),
        }
    }

    #[test]
    fn test_calc_carbon_is_fixed_point() {
        assert_eq!(calc_carbon(100.0), "82.00");
        assert_eq!(calc_carbon(250.0), "205.00");
        assert_eq!(calc_carbon(0.0), "0.00");
        assert_eq!(calc_carbon(1.5), "1.23");
    }

    #[test]
    fn test_summarize_coerces_and_defaults() {
        let rows = vec![
            row(Some("Jan"), Some("82.00")),
            row(Some("Jan"), Some("41.00")),
            row(None, None),
        ];

        let summary = summarize(&rows);

        assert_eq!(summary.total, 123.0);
        assert_eq!(summary.monthly["Jan"], 123.0);
        // The month-less bill still shows up, under "Unknown" with 0.
        assert_eq!(summary.monthly["Unknown"], 0.0);
        assert_eq!(summary.monthly.len(), 2);
    }

    #[test]
    fn test_summarize_unparseable_emission_counts_as_zero() {
        let rows = vec![row(Some("Feb"), Some("not-a-number"))];
        let summary = summarize(&rows);

        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.monthly["Feb"], 0.0);
    }

    #[test]
    fn test_summarize_empty_month_is_unknown() {
        let rows = vec![row(Some(""), Some("10.00"))];
        let summary = summarize(&rows);

        assert_eq!(summary.monthly["Unknown"], 10.0);
    }

    #[test]
    fn test_summarize_empty_store() {
        let summary = summarize(&[]);
        assert_eq!(summary.total, 0.0);
        assert!(summary.monthly.is_empty());
    }

    #[test]
    fn test_usage_lines_format() {
        let rows = vec![
            row(Some("Mar"), Some("82.00")),
            row(None, Some("41.00")),
            row(Some("Jan"), None),
        ];

        assert_eq!(
            usage_lines(&rows),
            vec![
                "Mar: 82.00 kg CO2",
                "Unknown: 41.00 kg CO2",
                "Jan: 0 kg CO2",
            ]
        );
    }
}
