use crate::commands::{import, serve, users, CommandEnum};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional custom database file path
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Optional custom configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show debug information
    #[arg(short = 'g', long = "debug")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a Netscape bookmark export (browser HTML backup)
    Import {
        /// Path to the exported HTML file
        file: PathBuf,

        /// Username or email of the account receiving the bookmarks
        #[arg(short, long, required_unless_present = "dry_run")]
        user: Option<String>,

        /// Print the parsed result as JSON instead of storing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Serve uploaded files over HTTP
    Serve {
        /// Address to bind, overrides `listen_addr` from the config
        #[arg(short, long)]
        listen: Option<String>,
    },

    /// Create the `admin` account
    InitAdmin {
        #[arg(long)]
        email: String,

        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// List all users
    Users,

    /// Disable a user by username or email
    DisableUser { login: String },
}

impl Commands {
    pub fn into_command(self) -> CommandEnum {
        match self {
            Commands::Import {
                file,
                user,
                dry_run,
            } => CommandEnum::Import(import::ImportCommand {
                file,
                user,
                dry_run,
            }),
            Commands::Serve { listen } => CommandEnum::Serve(serve::ServeCommand { listen }),
            Commands::InitAdmin { email, password } => {
                CommandEnum::InitAdmin(users::InitAdminCommand { email, password })
            }
            Commands::Users => CommandEnum::Users(users::UsersCommand),
            Commands::DisableUser { login } => {
                CommandEnum::DisableUser(users::DisableUserCommand { login })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // Helper to parse CLI arguments from a string
    fn parse_args(args: &str) -> Result<Cli, clap::Error> {
        let args_vec: Vec<&str> = args.split_whitespace().collect();
        Cli::try_parse_from(std::iter::once("stash").chain(args_vec))
    }

    #[test]
    fn test_import_args() {
        let cli = parse_args("--debug import backup.html --user alice").unwrap();
        assert!(cli.debug);
        match cli.command {
            Commands::Import {
                file,
                user,
                dry_run,
            } => {
                assert_eq!(file, PathBuf::from("backup.html"));
                assert_eq!(user.as_deref(), Some("alice"));
                assert!(!dry_run);
            }
            _ => panic!("Expected import command"),
        }
    }

    #[rstest]
    #[case("import backup.html", false)]
    #[case("import backup.html --dry-run", true)]
    #[case("serve --listen 0.0.0.0:8080", true)]
    #[case("init-admin --email admin@example.com", true)]
    #[case("init-admin", false)]
    #[case("users", true)]
    #[case("disable-user alice", true)]
    #[case("disable-user", false)]
    fn test_parse_validity(#[case] args: &str, #[case] valid: bool) {
        assert_eq!(parse_args(args).is_ok(), valid);
    }

    #[test]
    fn test_global_paths() {
        let cli = parse_args("--db /tmp/s.db --config /tmp/c.yml users").unwrap();
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/s.db")));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.yml")));
    }
}
