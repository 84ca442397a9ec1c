use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::report::ReportKind;

#[derive(Parser)]
#[command(name = "reportsplit")]
#[command(about = "Split institutional student reports into one PDF per student")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config TOML. If omitted, uses ./reportsplit.toml if present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run as MCP server
    Mcp,

    /// Split reports into <output-dir>/<student id>/<prefix> <student id>.pdf
    Split {
        /// RegisteredCourses report (one page per student)
        #[arg(long)]
        registered_courses: Option<PathBuf>,

        /// CGPAProgress report (each student starts with "Student ID")
        #[arg(long)]
        cgpa: Option<PathBuf>,

        /// History report (each student starts with "Student ID")
        #[arg(long)]
        history: Option<PathBuf>,

        /// Schedule report (student ID inside brackets)
        #[arg(long)]
        schedule: Option<PathBuf>,

        /// Output directory. If omitted, files are staged in a temporary
        /// directory and listed for collection.
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show how a report would be split, without writing files
    Detect {
        /// PDF file to inspect
        path: PathBuf,

        /// Which report this is
        #[arg(short, long, value_enum)]
        kind: ReportKind,
    },

    /// List split files under an output directory
    #[command(alias = "ls")]
    List {
        /// Output directory to list
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_split() {
        let cli = Cli::try_parse_from([
            "reportsplit",
            "split",
            "--cgpa",
            "cgpa.pdf",
            "--schedule",
            "sched.pdf",
            "-o",
            "out",
        ])
        .unwrap();
        match cli.command {
            Commands::Split {
                registered_courses,
                cgpa,
                history,
                schedule,
                output_dir,
                json,
            } => {
                assert_eq!(registered_courses, None);
                assert_eq!(cgpa, Some(PathBuf::from("cgpa.pdf")));
                assert_eq!(history, None);
                assert_eq!(schedule, Some(PathBuf::from("sched.pdf")));
                assert_eq!(output_dir, Some(PathBuf::from("out")));
                assert!(!json);
            }
            _ => panic!("expected split"),
        }
    }

    #[test]
    fn test_parse_detect_kind() {
        let cli =
            Cli::try_parse_from(["reportsplit", "detect", "r.pdf", "--kind", "registered-courses"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Detect {
                kind: ReportKind::RegisteredCourses,
                ..
            }
        ));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "reportsplit",
            "list",
            "out",
            "--log-level",
            "debug",
            "--config",
            "c.toml",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
    }

    #[test]
    fn test_reject_unknown_kind() {
        assert!(Cli::try_parse_from(["reportsplit", "detect", "r.pdf", "--kind", "gpa"]).is_err());
    }
}
