//! One module per subcommand.

pub mod add;
pub mod completions;
pub mod copy;
pub mod delete;
pub mod init;
pub mod list;
pub mod show;
pub mod tally;
