//! Command implementations for the BrightPath CLI.
//!
//! Each subcommand is implemented in its own module.

pub mod announcements;
pub mod browse;
pub mod children;
pub mod completions;
pub mod delete;
pub mod list;
pub mod login;
pub mod results;
pub mod signup;
pub mod students;
pub mod subjects;

pub use announcements::{run_announcements_list, run_announcements_post};
pub use browse::run_browse;
pub use children::{run_children, run_summarize};
pub use completions::generate_completions;
pub use delete::run_delete;
pub use list::run_list;
pub use login::{run_login, run_logout, run_whoami};
pub use results::{run_class_results, run_results, run_results_feed};
pub use signup::run_signup;
pub use students::{run_student_add, run_student_update};
pub use subjects::{run_subjects_add, run_subjects_list};
