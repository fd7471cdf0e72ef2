//! CSV exports of sections and inspections.

use std::borrow::Cow;

use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use railtrack_core::inspection::{Inspection, InspectionFilter};
use railtrack_core::limits::{clamp_limit, DEFAULT_EXPORT_LIMIT, MAX_EXPORT_LIMIT};
use railtrack_core::section::TrackSection;

use crate::error::AppResult;
use crate::extract::ValidQuery;
use crate::query::ExportParams;
use crate::state::AppState;

const SECTIONS_HEADER: &str = "id,name,status,last_check,persistent_faults";
const INSPECTIONS_HEADER: &str = "id,section_id,status,detail,inspected_at";

/// Quote a field if it contains a delimiter, quote or line break.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Render sections as CSV, one line per section, no trailing newline.
pub fn sections_csv(sections: &[TrackSection]) -> String {
    let mut lines = Vec::with_capacity(sections.len() + 1);
    lines.push(SECTIONS_HEADER.to_string());
    for s in sections {
        lines.push(format!(
            "{},{},{},{},{}",
            s.id,
            csv_field(&s.name),
            s.status,
            s.last_check.map_or(String::new(), |t| t.to_rfc3339()),
            s.persistent_faults,
        ));
    }
    lines.join("\n")
}

/// Render inspections as CSV, one line per inspection, no trailing newline.
pub fn inspections_csv(inspections: &[Inspection]) -> String {
    let mut lines = Vec::with_capacity(inspections.len() + 1);
    lines.push(INSPECTIONS_HEADER.to_string());
    for i in inspections {
        lines.push(format!(
            "{},{},{},{},{}",
            i.id,
            i.section_id,
            i.status,
            csv_field(i.detail.as_deref().unwrap_or("")),
            i.inspected_at.to_rfc3339(),
        ));
    }
    lines.join("\n")
}

fn csv_attachment(filename: &'static str, body: String) -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/csv"),
            (CONTENT_DISPOSITION, filename),
        ],
        body,
    )
}

/// GET /api/export/sections
pub async fn export_sections(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let sections = state.engine.list_sections().await?;
    tracing::info!(rows = sections.len(), "Exporting sections CSV");
    Ok(csv_attachment(
        "attachment; filename=sections.csv",
        sections_csv(&sections),
    ))
}

/// GET /api/export/inspections?limit=
///
/// Newest first, 1000 rows by default.
pub async fn export_inspections(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<ExportParams>,
) -> AppResult<impl IntoResponse> {
    let inspections = state
        .engine
        .list_inspections(InspectionFilter {
            section_id: None,
            limit: clamp_limit(params.limit, DEFAULT_EXPORT_LIMIT, MAX_EXPORT_LIMIT),
        })
        .await?;
    tracing::info!(rows = inspections.len(), "Exporting inspections CSV");
    Ok(csv_attachment(
        "attachment; filename=inspections.csv",
        inspections_csv(&inspections),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields_are_not_quoted() {
        assert_eq!(csv_field("Yard-2"), "Yard-2");
    }

    #[test]
    fn fields_with_delimiters_are_quoted() {
        assert_eq!(csv_field("a,b"), "\"a,b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn empty_exports_have_only_the_header() {
        assert_eq!(sections_csv(&[]), SECTIONS_HEADER);
        assert_eq!(inspections_csv(&[]), INSPECTIONS_HEADER);
    }
}
