use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use brightpath_business::EntityKind;

#[derive(Parser)]
#[command(name = "brightpath")]
#[command(about = "Terminal client for the BrightPath school portal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL (overrides BRIGHTPATH_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Show timing/latency information
    #[arg(long, global = true)]
    pub timing: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Admin collections, as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityArg {
    #[value(alias = "student")]
    Students,
    #[value(alias = "teacher")]
    Teachers,
    #[value(alias = "parent")]
    Parents,
}

impl From<EntityArg> for EntityKind {
    fn from(arg: EntityArg) -> Self {
        match arg {
            EntityArg::Students => Self::Student,
            EntityArg::Teachers => Self::Teacher,
            EntityArg::Parents => Self::Parent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SignupRole {
    Teacher,
    Parent,
    Admin,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and remember the session
    Login {
        /// Account email (prompted if omitted)
        #[arg(long, short = 'e')]
        email: Option<String>,
    },
    /// Forget the saved session
    Logout,
    /// Show who is logged in
    Whoami,
    /// Create a teacher, parent or admin account
    Signup {
        /// Account type (prompted if omitted)
        #[arg(long, value_enum)]
        role: Option<SignupRole>,
    },
    /// Print one page of students, teachers or parents
    List {
        #[arg(value_enum)]
        entity: EntityArg,

        /// Case-insensitive filter over every column
        #[arg(long, short = 's')]
        search: Option<String>,

        /// Page to show (clamped to the last page)
        #[arg(long, short = 'p', default_value_t = 1)]
        page: usize,
    },
    /// Browse the admin tables interactively
    Browse {
        /// Table to open first
        #[arg(value_enum, default_value = "students")]
        entity: EntityArg,
    },
    /// Add or edit students
    #[command(subcommand)]
    Student(StudentCommand),
    /// Delete a student, teacher or parent
    Delete {
        #[arg(value_enum)]
        entity: EntityArg,

        /// Record id
        id: String,

        /// Do not ask for confirmation
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// List or add subjects
    #[command(subcommand)]
    Subjects(SubjectsCommand),
    /// Read or post announcements
    #[command(subcommand)]
    Announcements(AnnouncementsCommand),
    /// Show your children and their released results (parents)
    Children,
    /// Summarize a passage of text (parents)
    Summarize {
        /// Text to summarize; prompted for when omitted
        text: Option<String>,
    },
    /// Results upload progress and uploaded marks (admins)
    #[command(subcommand)]
    Results(ResultsCommand),
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Student form fields; anything missing is prompted for.
#[derive(Debug, Clone, Default, Args)]
pub struct StudentFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub gender: Option<String>,
    /// Date of birth, YYYY-MM-DD
    #[arg(long)]
    pub dob: Option<String>,
    #[arg(long)]
    pub grade: Option<String>,
}

#[derive(Subcommand)]
pub enum StudentCommand {
    /// Register a new student
    Add(StudentFields),
    /// Update an existing student
    Update {
        /// Student id
        id: String,
        #[command(flatten)]
        fields: StudentFields,
    },
}

#[derive(Subcommand)]
pub enum SubjectsCommand {
    /// List all subjects
    List,
    /// Add a subject
    Add {
        /// Subject name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum AnnouncementsCommand {
    /// List announcements, newest first
    List,
    /// Post an announcement
    Post {
        /// Announcement text
        message: String,
    },
}

#[derive(Subcommand)]
pub enum ResultsCommand {
    /// Upload progress per grade for a term
    Summary {
        /// Term name, e.g. "Term 1"
        #[arg(long, short = 't')]
        term: String,
    },
    /// Per-subject results of one grade
    Class {
        /// Grade name, e.g. "Grade 4"
        grade: String,
    },
    /// Every uploaded mark
    Feed {
        /// Only marks from this term
        #[arg(long, short = 't')]
        term: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_parses_search_and_page() {
        let cli = Cli::parse_from(["brightpath", "list", "teacher", "--search", "math", "-p", "2"]);
        match cli.command {
            Commands::List {
                entity,
                search,
                page,
            } => {
                assert_eq!(EntityKind::from(entity), EntityKind::Teacher);
                assert_eq!(search.as_deref(), Some("math"));
                assert_eq!(page, 2);
            }
            _ => panic!("expected list command"),
        }
    }

    #[test]
    fn test_student_update_flattens_fields() {
        let cli = Cli::parse_from([
            "brightpath",
            "student",
            "update",
            "12",
            "--grade",
            "Grade 6",
        ]);
        match cli.command {
            Commands::Student(StudentCommand::Update { id, fields }) => {
                assert_eq!(id, "12");
                assert_eq!(fields.grade.as_deref(), Some("Grade 6"));
                assert!(fields.name.is_none());
            }
            _ => panic!("expected student update"),
        }
    }

    #[test]
    fn test_results_subcommands_parse() {
        let cli = Cli::parse_from(["brightpath", "results", "class", "Grade 4"]);
        assert!(matches!(
            cli.command,
            Commands::Results(ResultsCommand::Class { ref grade }) if grade == "Grade 4"
        ));

        let cli = Cli::parse_from(["brightpath", "results", "feed"]);
        assert!(matches!(
            cli.command,
            Commands::Results(ResultsCommand::Feed { term: None })
        ));

        let cli = Cli::parse_from(["brightpath", "results", "summary", "-t", "Term 1"]);
        assert!(matches!(
            cli.command,
            Commands::Results(ResultsCommand::Summary { ref term }) if term == "Term 1"
        ));
    }

    #[test]
    fn test_api_url_is_global() {
        let cli = Cli::parse_from(["brightpath", "whoami", "--api-url", "http://localhost:8000"]);
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:8000"));
    }
}
