//! Achievement export: CSV with a fixed column order, and a versioned JSON
//! envelope. Filenames carry the export date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::achievements::catalog;
use crate::models::unlock::UnlockRecord;

pub const EXPORT_VERSION: &str = "1";

const CSV_HEADER: &str = "code,name,description,category,rarity,icon,unlocked_at,days_since";

#[derive(Debug, Clone, Serialize)]
pub struct ExportRow {
    pub code: String,
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    pub rarity: &'static str,
    pub icon: &'static str,
    pub unlocked_at: DateTime<Utc>,
    pub days_since: i64,
}

#[derive(Debug, Serialize)]
pub struct JsonExport {
    pub version: &'static str,
    pub exported_at: NaiveDate,
    pub total: usize,
    pub achievements: Vec<ExportRow>,
}

/// Joins unlock records against the catalog, newest first. Records whose code
/// no longer exists in the catalog are skipped rather than half-exported.
pub fn build_export_rows(records: &[UnlockRecord], today: NaiveDate) -> Vec<ExportRow> {
    let mut rows: Vec<ExportRow> = records
        .iter()
        .filter_map(|r| {
            let def = catalog::find(&r.achievement_code)?;
            Some(ExportRow {
                code: r.achievement_code.clone(),
                name: def.name,
                description: def.description,
                category: def.category.as_str(),
                rarity: def.rarity.as_str(),
                icon: def.icon,
                unlocked_at: r.unlocked_at,
                days_since: (today - r.unlocked_at.date_naive()).num_days(),
            })
        })
        .collect();
    rows.sort_by(|a, b| b.unlocked_at.cmp(&a.unlocked_at));
    rows
}

pub fn to_csv(rows: &[ExportRow]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for row in rows {
        let unlocked_at = row.unlocked_at.to_rfc3339();
        let days_since = row.days_since.to_string();
        let fields = [
            row.code.as_str(),
            row.name,
            row.description,
            row.category,
            row.rarity,
            row.icon,
            unlocked_at.as_str(),
            days_since.as_str(),
        ]
        .map(csv_field);
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    out
}

pub fn to_json(rows: Vec<ExportRow>, exported_at: NaiveDate) -> JsonExport {
    JsonExport {
        version: EXPORT_VERSION,
        exported_at,
        total: rows.len(),
        achievements: rows,
    }
}

pub fn csv_filename(today: NaiveDate) -> String {
    format!("achievements-{}.csv", today.format("%Y-%m-%d"))
}

pub fn json_filename(today: NaiveDate) -> String {
    format!("achievements-{}.json", today.format("%Y-%m-%d"))
}

/// Quotes a field when it contains a comma, quote, or newline; embedded
/// quotes are doubled.
fn csv_field(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') || raw.contains('\n') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;
    use uuid::Uuid;

    fn record(code: &str, days_ago: i64) -> UnlockRecord {
        let base = Utc.with_ymd_and_hms(2025, 6, 20, 12, 0, 0).unwrap();
        UnlockRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            achievement_code: code.to_string(),
            unlocked_at: base - Duration::days(days_ago),
            metadata: json!({}),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 20).unwrap()
    }

    #[test]
    fn test_one_row_per_matched_unlock_sorted_desc() {
        let records = vec![record("first_post", 5), record("rising_star", 1)];
        let rows = build_export_rows(&records, today());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].code, "rising_star");
        assert_eq!(rows[0].days_since, 1);
        assert_eq!(rows[1].days_since, 5);
    }

    #[test]
    fn test_unknown_codes_are_skipped() {
        let records = vec![record("retired_badge", 2), record("first_post", 1)];
        let rows = build_export_rows(&records, today());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code, "first_post");
    }

    #[test]
    fn test_csv_header_and_row_count() {
        let records = vec![record("first_post", 1), record("rising_star", 2)];
        let csv = to_csv(&build_export_rows(&records, today()));
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_csv_quotes_embedded_commas() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a, b"), "\"a, b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_json_envelope_shape() {
        let records = vec![record("first_post", 1)];
        let export = to_json(build_export_rows(&records, today()), today());
        assert_eq!(export.version, "1");
        assert_eq!(export.total, 1);
        let value = serde_json::to_value(&export).unwrap();
        assert!(value["achievements"][0]["unlocked_at"].is_string());
    }

    #[test]
    fn test_filenames_are_dated() {
        assert_eq!(csv_filename(today()), "achievements-2025-06-20.csv");
        assert_eq!(json_filename(today()), "achievements-2025-06-20.json");
    }
}
