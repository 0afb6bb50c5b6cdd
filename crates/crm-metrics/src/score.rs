use crm_model::Report;

/// Overall data-quality score in `[0, 100]`.
///
/// The share of fields without issues, rounded to the nearest integer.
/// A report without fields scores 0.
pub fn quality_score(report: &Report) -> u8 {
    if report.total_fields == 0 {
        return 0;
    }
    let quality_ratio = 1.0 - report.fields_with_issues as f64 / report.total_fields as f64;
    (quality_ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Population rate rounded for display in field details.
pub fn display_population_rate(populated_count: u64, total_records: u64) -> u8 {
    if total_records == 0 {
        return 0;
    }
    let rate = populated_count as f64 / total_records as f64 * 100.0;
    rate.round().clamp(0.0, 100.0) as u8
}
