//! Findings and report aggregation.
//!
//! Checks produce immutable [`Finding`] lists; [`aggregate`] is a separate
//! pure reduction that folds them into a scored [`Report`]. No accumulator
//! state survives between analysis runs.

use serde::Serialize;

use crate::dom::NodeId;

/// Severity of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical,
    Warning,
}

/// Element locator attached to a finding.
#[derive(Debug, Clone)]
pub struct Locator {
    pub tag: String,
    pub line: Option<u64>,
}

/// One rule violation.
#[derive(Debug, Clone)]
pub struct Finding {
    pub rule: &'static str,
    pub severity: Severity,
    pub message: String,
    pub element: Option<Locator>,
    /// Observed vs required contrast ratio, where applicable.
    pub ratio: Option<(f64, f64)>,
    pub penalty: u32,
    pub suggestion: Option<String>,
    /// Node the finding is anchored to; used for document-order sorting.
    pub node: Option<NodeId>,
}

/// Aggregated analysis report.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub summary: Summary,
    pub critical: Vec<ReportedFinding>,
    pub warnings: Vec<ReportedFinding>,
}

/// Report summary block.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub score: u32,
    pub grade: String,
    pub critical_count: u32,
    pub warning_count: u32,
}

/// Serialized form of one finding.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedFinding {
    pub rule: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// Starting score before penalties are applied.
pub const BASE_SCORE: u32 = 100;

/// Reduce findings into a report.
///
/// Each finding's penalty is subtracted from the base score exactly once
/// and the result is clamped to `[0, 100]`. Findings are partitioned by
/// severity and each group ordered by document source position, ties
/// broken by rule identifier.
pub fn aggregate(findings: Vec<Finding>) -> Report {
    let total_penalty: u32 = findings.iter().map(|f| f.penalty).sum();
    let score = BASE_SCORE.saturating_sub(total_penalty).min(100);

    let mut critical: Vec<&Finding> = findings
        .iter()
        .filter(|f| f.severity == Severity::Critical)
        .collect();
    let mut warnings: Vec<&Finding> = findings
        .iter()
        .filter(|f| f.severity == Severity::Warning)
        .collect();

    let sort_key = |f: &&Finding| (f.node.map(|n| n.0).unwrap_or(0), f.rule);
    critical.sort_by_key(sort_key);
    warnings.sort_by_key(sort_key);

    let summary = Summary {
        score,
        grade: grade_for(score).to_string(),
        critical_count: critical.len() as u32,
        warning_count: warnings.len() as u32,
    };

    Report {
        summary,
        critical: critical.into_iter().map(reported).collect(),
        warnings: warnings.into_iter().map(reported).collect(),
    }
}

/// Derive the grade label from the numeric score.
fn grade_for(score: u32) -> &'static str {
    if score >= 90 {
        "AAA"
    } else if score >= 80 {
        "AA"
    } else {
        "C"
    }
}

fn reported(f: &Finding) -> ReportedFinding {
    ReportedFinding {
        rule: f.rule.to_string(),
        description: f.message.clone(),
        element: f.element.as_ref().map(|l| l.tag.clone()),
        line_number: f.element.as_ref().and_then(|l| l.line),
        suggestion: f.suggestion.clone(),
    }
}
