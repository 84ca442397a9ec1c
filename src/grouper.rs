use crate::extract::IdExtractor;
use serde::Serialize;

/// A contiguous run of pages attributed to one identifier.
///
/// Page indices are 0-based positions in the source document. The
/// identifier is decided when the record is created and never revised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub identifier: String,
    pub pages: Vec<usize>,
}

impl Record {
    /// Start a record at `first_page`. A missing identifier falls back to
    /// the positional placeholder of that page.
    fn start(first_page: usize, identifier: Option<String>) -> Self {
        Record {
            identifier: identifier.unwrap_or_else(|| placeholder(first_page)),
            pages: vec![first_page],
        }
    }

    /// 1-based page numbers, as used by the PDF layer.
    pub fn page_numbers(&self) -> Vec<u32> {
        self.pages.iter().map(|&p| p as u32 + 1).collect()
    }
}

/// `Unknown_<n>` for the page at 0-based `index`.
pub fn placeholder(index: usize) -> String {
    format!("Unknown_{}", index + 1)
}

/// One record per page, in page order. Never drops a page.
pub fn split_per_page<T: AsRef<str>>(pages: &[T], extractor: &dyn IdExtractor) -> Vec<Record> {
    pages
        .iter()
        .enumerate()
        .map(|(i, text)| Record::start(i, extractor.extract(text.as_ref())))
        .collect()
}

/// Group pages into runs: a page with an identifier opens a new record,
/// a page without one joins the open record. Pages before the first
/// identifier belong to no record and are dropped.
pub fn group_runs<T: AsRef<str>>(pages: &[T], extractor: &dyn IdExtractor) -> Vec<Record> {
    let mut records = Vec::new();
    let mut current: Option<Record> = None;

    for (i, text) in pages.iter().enumerate() {
        match extractor.extract(text.as_ref()) {
            Some(id) => {
                if let Some(done) = current.take() {
                    records.push(done);
                }
                current = Some(Record::start(i, Some(id)));
            }
            None => {
                if let Some(open) = current.as_mut() {
                    open.pages.push(i);
                }
            }
        }
    }

    records.extend(current);
    records
}

/// Number of leading pages `group_runs` discards.
pub fn leading_dropped(records: &[Record], page_count: usize) -> usize {
    records
        .first()
        .and_then(|r| r.pages.first().copied())
        .unwrap_or(page_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{BracketedId, LabeledId};

    fn concat_pages(records: &[Record]) -> Vec<usize> {
        records.iter().flat_map(|r| r.pages.iter().copied()).collect()
    }

    #[test]
    fn test_per_page_one_record_each() {
        let pages = ["Student ID: 1", "Student ID: 2", "no id here", "Student ID 4"];
        let records = split_per_page(&pages, &LabeledId);
        assert_eq!(records.len(), pages.len());
        assert_eq!(concat_pages(&records), vec![0, 1, 2, 3]);
        let ids: Vec<_> = records.iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "Unknown_3", "4"]);
    }

    #[test]
    fn test_per_page_all_unknown() {
        let pages = ["a", "b"];
        let records = split_per_page(&pages, &LabeledId);
        assert_eq!(records[0].identifier, "Unknown_1");
        assert_eq!(records[1].identifier, "Unknown_2");
    }

    #[test]
    fn test_per_page_empty() {
        let pages: [&str; 0] = [];
        assert!(split_per_page(&pages, &LabeledId).is_empty());
    }

    #[test]
    fn test_runs_drop_leading_pages() {
        let pages = ["cover", "intro", "Student ID: 7", "continued"];
        let records = group_runs(&pages, &LabeledId);
        assert_eq!(
            records,
            vec![Record {
                identifier: "7".into(),
                pages: vec![2, 3],
            }]
        );
        assert_eq!(leading_dropped(&records, pages.len()), 2);
    }

    #[test]
    fn test_runs_multiple_students() {
        let pages = [
            "Student ID: 100",
            "more",
            "more",
            "Student ID: 200",
            "Student ID: 300",
            "tail",
        ];
        let records = group_runs(&pages, &LabeledId);
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].identifier, "100");
        assert_eq!(records[0].pages, vec![0, 1, 2]);
        assert_eq!(records[1].identifier, "200");
        assert_eq!(records[1].pages, vec![3]);
        assert_eq!(records[2].identifier, "300");
        assert_eq!(records[2].pages, vec![4, 5]);
        assert_eq!(leading_dropped(&records, pages.len()), 0);
    }

    #[test]
    fn test_runs_identifier_fixed_at_start() {
        // A later page in the same run never changes the identifier.
        let pages = ["[11] header", "no id", "[12]"];
        let records = group_runs(&pages, &BracketedId);
        assert_eq!(records[0].identifier, "11");
        assert_eq!(records[1].identifier, "12");
    }

    #[test]
    fn test_runs_no_identifiers() {
        let pages = ["a", "b", "c"];
        let records = group_runs(&pages, &BracketedId);
        assert!(records.is_empty());
        assert_eq!(leading_dropped(&records, pages.len()), 3);
    }

    #[test]
    fn test_runs_partition_and_round_trip() {
        let pages = [
            "junk",
            "[1]",
            "x",
            "[2]",
            "[3]",
            "y",
            "z",
            "[1]",
        ];
        let records = group_runs(&pages, &BracketedId);
        let concat = concat_pages(&records);

        // increasing, no repeats
        assert!(concat.windows(2).all(|w| w[0] < w[1]));
        // every run is contiguous
        for r in &records {
            assert!(r.pages.windows(2).all(|w| w[1] == w[0] + 1));
        }
        // round trip minus the dropped prefix
        let dropped = leading_dropped(&records, pages.len());
        assert_eq!(concat, (dropped..pages.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_page_numbers_are_one_based() {
        let record = Record {
            identifier: "5".into(),
            pages: vec![0, 1, 2],
        };
        assert_eq!(record.page_numbers(), vec![1, 2, 3]);
    }

    #[test]
    fn test_placeholder() {
        assert_eq!(placeholder(0), "Unknown_1");
        assert_eq!(placeholder(41), "Unknown_42");
    }
}
