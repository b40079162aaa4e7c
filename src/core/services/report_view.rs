use chrono::NaiveDate;

use crate::core::errors::{AdminError, Result};
use crate::core::models::effect::{Effect, Transition};
use crate::core::models::report::{ExportFormat, ReportFilterState, ReportType};
use crate::core::models::selection::Selection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportAction {
    Select(ReportType),
    SetRange { start: NaiveDate, end: NaiveDate },
    SetDepartment(Selection<String>),
    Export(ExportFormat),
}

/// A headline figure on the expense analysis report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub title: &'static str,
    pub value: &'static str,
    pub note: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentRow {
    pub department: &'static str,
    pub total: &'static str,
    pub trips: &'static str,
    pub average: &'static str,
    pub change: &'static str,
}

/// Canned content of a report. Figures are presentation fixtures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportBody {
    Metrics {
        cards: Vec<MetricCard>,
        charts: Vec<&'static str>,
    },
    Table {
        title: &'static str,
        rows: Vec<DepartmentRow>,
    },
    Summary {
        title: &'static str,
        description: &'static str,
    },
}

/// Apply a user action to the report selection.
pub fn reduce(
    state: &ReportFilterState,
    action: ReportAction,
) -> Result<Transition<ReportFilterState>> {
    let mut next = state.clone();
    match action {
        ReportAction::Select(report) => next.report = report,
        ReportAction::SetRange { start, end } => {
            if start > end {
                return Err(AdminError::InvalidRange {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
            next.start = start;
            next.end = end;
        }
        ReportAction::SetDepartment(department) => next.department = department,
        ReportAction::Export(format) => {
            tracing::debug!(report = %state.report, format = format.name(), "export requested");
            return Ok(Transition::with(
                next,
                Effect::Notify(format!(
                    "{}を{}形式でエクスポートします",
                    state.report.label(),
                    format.name()
                )),
            ));
        }
    }
    Ok(Transition::quiet(next))
}

/// Fixed body for a report type.
pub fn render(report: ReportType) -> ReportBody {
    match report {
        ReportType::ExpenseAnalysis => ReportBody::Metrics {
            cards: vec![
                MetricCard {
                    title: "総経費額",
                    value: "¥2,450,000",
                    note: "前年比 +12%",
                },
                MetricCard {
                    title: "出張回数",
                    value: "156回",
                    note: "前年比 +8%",
                },
                MetricCard {
                    title: "平均単価",
                    value: "¥15,705",
                    note: "前年比 +3%",
                },
                MetricCard {
                    title: "節税効果",
                    value: "¥980,000",
                    note: "年間節税額",
                },
            ],
            charts: vec!["月別経費推移", "経費カテゴリ別分析"],
        },
        ReportType::DepartmentComparison => ReportBody::Table {
            title: "部門別経費比較",
            rows: vec![
                DepartmentRow {
                    department: "営業部",
                    total: "¥980,000",
                    trips: "62回",
                    average: "¥15,806",
                    change: "+15%",
                },
                DepartmentRow {
                    department: "開発部",
                    total: "¥650,000",
                    trips: "35回",
                    average: "¥18,571",
                    change: "+8%",
                },
                DepartmentRow {
                    department: "総務部",
                    total: "¥420,000",
                    trips: "28回",
                    average: "¥15,000",
                    change: "-2%",
                },
            ],
        },
        ReportType::UserActivity => ReportBody::Summary {
            title: "ユーザー活動レポート",
            description: "ユーザーの活動状況とシステム利用状況を分析",
        },
        ReportType::ComplianceReport => ReportBody::Summary {
            title: "コンプライアンスレポート",
            description: "法令遵守状況と規程適用状況の分析",
        },
        ReportType::TaxOptimization => ReportBody::Summary {
            title: "節税効果レポート",
            description: "出張日当制度による節税効果の詳細分析",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn select_changes_only_report_type() {
        let state = ReportFilterState::default();
        let t = reduce(&state, ReportAction::Select(ReportType::TaxOptimization)).unwrap();
        assert_eq!(t.state.report, ReportType::TaxOptimization);
        assert_eq!(t.state.start, state.start);
        assert!(t.effects.is_empty());
    }

    #[test]
    fn inverted_range_is_rejected() {
        let state = ReportFilterState::default();
        let err = reduce(
            &state,
            ReportAction::SetRange {
                start: date("2024-06-01"),
                end: date("2024-05-31"),
            },
        )
        .unwrap_err();
        assert!(matches!(err, AdminError::InvalidRange { .. }));
    }

    #[test]
    fn single_day_range_is_allowed() {
        let state = ReportFilterState::default();
        let t = reduce(
            &state,
            ReportAction::SetRange {
                start: date("2024-07-20"),
                end: date("2024-07-20"),
            },
        )
        .unwrap();
        assert_eq!(t.state.start, t.state.end);
    }

    #[test]
    fn export_notifies_without_changing_state() {
        let state = ReportFilterState::default();
        let t = reduce(&state, ReportAction::Export(ExportFormat::Excel)).unwrap();
        assert_eq!(t.state, state);
        match &t.effects[..] {
            [Effect::Notify(msg)] => {
                assert!(msg.contains("EXCEL"));
                assert!(msg.contains("経費分析レポート"));
            }
            other => panic!("unexpected effects: {other:?}"),
        }
    }

    #[test]
    fn every_report_type_has_a_body() {
        for report in ReportType::ALL {
            match render(report) {
                ReportBody::Metrics { cards, .. } => assert_eq!(cards.len(), 4),
                ReportBody::Table { rows, .. } => assert_eq!(rows.len(), 3),
                ReportBody::Summary { title, .. } => assert_eq!(title, report.label()),
            }
        }
    }
}
