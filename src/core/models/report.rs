use std::str::FromStr;

use chrono::NaiveDate;

use crate::core::errors::AdminError;
use crate::core::models::selection::Selection;

/// Departments a report can be scoped to.
pub const DEPARTMENTS: [&str; 5] = ["営業部", "総務部", "開発部", "企画部", "経理部"];

/// The five canned reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportType {
    #[default]
    ExpenseAnalysis,
    DepartmentComparison,
    UserActivity,
    ComplianceReport,
    TaxOptimization,
}

impl ReportType {
    pub const ALL: [ReportType; 5] = [
        ReportType::ExpenseAnalysis,
        ReportType::DepartmentComparison,
        ReportType::UserActivity,
        ReportType::ComplianceReport,
        ReportType::TaxOptimization,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ReportType::ExpenseAnalysis => "expense-analysis",
            ReportType::DepartmentComparison => "department-comparison",
            ReportType::UserActivity => "user-activity",
            ReportType::ComplianceReport => "compliance-report",
            ReportType::TaxOptimization => "tax-optimization",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReportType::ExpenseAnalysis => "経費分析レポート",
            ReportType::DepartmentComparison => "部門別比較レポート",
            ReportType::UserActivity => "ユーザー活動レポート",
            ReportType::ComplianceReport => "コンプライアンスレポート",
            ReportType::TaxOptimization => "節税効果レポート",
        }
    }
}

impl FromStr for ReportType {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|r| r.id() == wanted)
            .ok_or_else(|| AdminError::UnknownReportType {
                name: wanted.to_string(),
                available: Self::ALL
                    .iter()
                    .map(|r| r.id())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Excel,
    Pdf,
}

impl ExportFormat {
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Excel => "EXCEL",
            ExportFormat::Pdf => "PDF",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "excel" => Ok(ExportFormat::Excel),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(AdminError::UnknownExportFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Validate a department name against [`DEPARTMENTS`].
pub fn parse_department(s: &str) -> Result<String, AdminError> {
    DEPARTMENTS
        .iter()
        .find(|d| **d == s)
        .map(|d| d.to_string())
        .ok_or_else(|| AdminError::UnknownDepartment {
            name: s.to_string(),
            available: DEPARTMENTS.join(", "),
        })
}

/// Transient selection held by the reporting view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFilterState {
    pub report: ReportType,
    /// Inclusive, `start <= end`.
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub department: Selection<String>,
}

impl Default for ReportFilterState {
    fn default() -> Self {
        Self {
            report: ReportType::default(),
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or_default(),
            department: Selection::All,
        }
    }
}
