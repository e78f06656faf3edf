//! One module per subcommand, each exposing `execute`.

pub mod add;
pub mod completions;
pub mod delete;
pub mod generate;
pub mod get;
pub mod init;
pub mod list;
pub mod search;
pub mod strength;
pub mod update;
