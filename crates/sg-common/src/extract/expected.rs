use serde_json::Value;

use crate::level::parse_level;
use crate::schema::ExpectedCompetency;

/// Per user, the competency requirements of the single most recently issued
/// approved work order. `ROW_NUMBER` picks top-1 by issue recency.
pub const LATEST_WORK_ORDER_QUERY: &str = "\
SELECT orgId, workOrderId, userId, competencyId, competencyLevel \
FROM (\
  SELECT wo.org_id AS orgId, wo.id AS workOrderId, wo.user_id AS userId, \
         wo.competency_id AS competencyId, wo.competency_level AS competencyLevel, \
         ROW_NUMBER() OVER (PARTITION BY wo.user_id ORDER BY wo.issued_at DESC) AS rn \
  FROM work_order_competencies wo \
  WHERE wo.status = 'Approved'\
) latest WHERE rn = 1";

/// Normalize analytical-engine result rows into the expected-competency table.
/// Rows missing a competency id and rows without a positive level are
/// excluded, so every surviving row has `competency_level >= 1`.
pub fn normalize(rows: &[Value]) -> Vec<ExpectedCompetency> {
    rows.iter()
        .filter_map(|row| {
            let competency_id = non_empty_str(row, "competencyId")?;
            let level = level_of(row.get("competencyLevel"));
            if level <= 0 {
                return None;
            }
            Some(ExpectedCompetency {
                org_id: non_empty_str(row, "orgId").unwrap_or_default(),
                work_order_id: non_empty_str(row, "workOrderId").unwrap_or_default(),
                user_id: non_empty_str(row, "userId")?,
                competency_id,
                competency_level: level,
            })
        })
        .collect()
}

fn non_empty_str(row: &Value, key: &str) -> Option<String> {
    row.get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn level_of(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(1),
        Some(Value::String(text)) => parse_level(Some(text)),
        _ => 1,
    }
}
