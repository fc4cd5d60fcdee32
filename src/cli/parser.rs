use crate::config::DEFAULT_CONFIG_PATH;
use std::path::PathBuf;

/// Arguments of a fetch invocation
#[derive(Debug, Clone, PartialEq)]
pub struct FetchArgs {
    pub owner: String,
    pub repo: String,
    pub start_date: String,
    pub end_date: String,
    pub config_path: PathBuf,
}

/// Enum representing CLI commands
#[derive(Debug, PartialEq)]
pub enum Command {
    Fetch(FetchArgs),
    Help,
    Unknown(String),
}

pub const USAGE: &str = "\
Usage: prwindow <owner> <repo> <start-date> <end-date> [--config <path>]

Prints the pull requests of <owner>/<repo> created between <start-date> and
<end-date> (inclusive, YYYY-MM-DD) as JSON.

Options:
  --config <path>  Properties file holding `auth=<token>` [default: auth.properties]
  -h, --help       Show this help";

const CONFIG_FLAG: &str = "--config";
const HELP_FLAGS: &[&str] = &["help", "--help", "-h"];

/// Parse command line arguments and return a Command
///
/// # Arguments
/// * `args` - Command line arguments (including program name)
///
/// # Returns
/// * `Command` - The parsed command
pub fn parse_args(args: &[String]) -> Command {
    let mut positional: Vec<&str> = Vec::new();
    let mut config_path: Option<PathBuf> = None;

    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        if HELP_FLAGS.contains(&arg.as_str()) {
            return Command::Help;
        }

        if arg == CONFIG_FLAG {
            match rest.next() {
                Some(path) if !path.is_empty() => config_path = Some(PathBuf::from(path)),
                _ => return Command::Unknown(format!("Missing value for {CONFIG_FLAG}")),
            }
        } else if let Some(path) = arg.strip_prefix("--config=") {
            if path.is_empty() {
                return Command::Unknown(format!("Missing value for {CONFIG_FLAG}"));
            }
            config_path = Some(PathBuf::from(path));
        } else if arg.starts_with("--") {
            return Command::Unknown(format!("Unknown option {arg}"));
        } else {
            positional.push(arg);
        }
    }

    match positional.as_slice() {
        [] => Command::Help,
        [owner, repo, start_date, end_date] => {
            if !is_valid_name(owner) || !is_valid_name(repo) {
                return Command::Unknown(
                    "Invalid repository. <owner> and <repo> must be non-empty and must not contain '/'."
                        .to_string(),
                );
            }
            Command::Fetch(FetchArgs {
                owner: owner.to_string(),
                repo: repo.to_string(),
                start_date: start_date.to_string(),
                end_date: end_date.to_string(),
                config_path: config_path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
            })
        }
        other => Command::Unknown(format!(
            "Expected 4 arguments (<owner> <repo> <start-date> <end-date>), got {}",
            other.len()
        )),
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty() && !name.contains('/')
}
