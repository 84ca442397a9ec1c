use crate::extract::{BracketedId, IdExtractor, LabeledId};
use crate::grouper::{group_runs, split_per_page, Record};
use clap::ValueEnum;
use rmcp::schemars;
use serde::{Deserialize, Serialize};

/// The four institutional exports, in the order they are processed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// One page per student
    #[value(name = "registered-courses")]
    RegisteredCourses,
    /// Multi-page, starts with "Student ID"
    #[value(name = "cgpa")]
    #[serde(rename = "cgpa")]
    CgpaProgress,
    /// Multi-page, starts with "Student ID"
    History,
    /// Multi-page, ID inside brackets
    Schedule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    PerPage,
    Runs,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::RegisteredCourses,
        ReportKind::CgpaProgress,
        ReportKind::History,
        ReportKind::Schedule,
    ];

    /// Filename prefix. These strings are an external contract; "Schedual"
    /// is spelled the way downstream consumers expect it.
    pub fn prefix(self) -> &'static str {
        match self {
            ReportKind::RegisteredCourses => "01-RegisteredCourses",
            ReportKind::CgpaProgress => "02-CGPAProgress",
            ReportKind::History => "01-history",
            ReportKind::Schedule => "02-Schedual",
        }
    }

    pub fn grouping(self) -> Grouping {
        match self {
            ReportKind::RegisteredCourses => Grouping::PerPage,
            _ => Grouping::Runs,
        }
    }

    pub fn extractor(self) -> &'static dyn IdExtractor {
        match self {
            ReportKind::Schedule => &BracketedId,
            _ => &LabeledId,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportKind::RegisteredCourses => "registered courses",
            ReportKind::CgpaProgress => "CGPA progress",
            ReportKind::History => "history",
            ReportKind::Schedule => "schedule",
        }
    }

    /// Partition a document's page texts into records.
    pub fn records<T: AsRef<str>>(self, pages: &[T]) -> Vec<Record> {
        match self.grouping() {
            Grouping::PerPage => split_per_page(pages, self.extractor()),
            Grouping::Runs => group_runs(pages, self.extractor()),
        }
    }

    /// `<prefix> <identifier>.pdf`
    pub fn file_name(self, identifier: &str) -> String {
        format!("{} {}.pdf", self.prefix(), identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(
            ReportKind::RegisteredCourses.file_name("123"),
            "01-RegisteredCourses 123.pdf"
        );
        assert_eq!(
            ReportKind::CgpaProgress.file_name("123"),
            "02-CGPAProgress 123.pdf"
        );
        assert_eq!(ReportKind::History.file_name("123"), "01-history 123.pdf");
        assert_eq!(ReportKind::Schedule.file_name("123"), "02-Schedual 123.pdf");
    }

    #[test]
    fn test_processing_order() {
        assert_eq!(
            ReportKind::ALL,
            [
                ReportKind::RegisteredCourses,
                ReportKind::CgpaProgress,
                ReportKind::History,
                ReportKind::Schedule,
            ]
        );
    }

    #[test]
    fn test_registered_courses_keeps_every_page() {
        let pages = ["intro", "Student ID: 9", "[4]"];
        let records = ReportKind::RegisteredCourses.records(&pages);
        let ids: Vec<_> = records.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["Unknown_1", "9", "Unknown_3"]);
    }

    #[test]
    fn test_schedule_uses_brackets() {
        let pages = ["Student ID: 9", "[4]", "Monday"];
        let records = ReportKind::Schedule.records(&pages);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].identifier, "4");
        assert_eq!(records[0].pages, vec![1, 2]);
    }

    #[test]
    fn test_history_uses_label() {
        let pages = ["[4]", "Student ID: 9", "[5]"];
        let records = ReportKind::History.records(&pages);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].identifier, "9");
        assert_eq!(records[0].pages, vec![1, 2]);
    }

    #[test]
    fn test_value_names() {
        assert_eq!(
            ReportKind::from_str("registered-courses", false).ok(),
            Some(ReportKind::RegisteredCourses)
        );
        assert_eq!(
            ReportKind::from_str("cgpa", false).ok(),
            Some(ReportKind::CgpaProgress)
        );
        assert_eq!(
            ReportKind::from_str("schedule", false).ok(),
            Some(ReportKind::Schedule)
        );
    }
}
