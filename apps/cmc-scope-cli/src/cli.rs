use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cmc-scope")]
#[command(about = "Resolve CMC Go people scopes for a user record")]
#[command(version)]
pub struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the canonical form of a role
    Canonicalize {
        role: String,
    },

    /// Print people, view and edit scopes and the row filter as JSON
    Scope {
        /// User record as JSON (`-` reads stdin)
        #[arg(short, long)]
        user: PathBuf,
    },

    /// Is a district visible to the user?
    District {
        district_id: String,

        /// User record as JSON (`-` reads stdin)
        #[arg(short, long)]
        user: PathBuf,

        /// District region. Looked up in the catalog when omitted
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Is a campus visible to the user?
    Campus {
        #[arg(allow_negative_numbers = true)]
        campus_id: i64,

        /// User record as JSON (`-` reads stdin)
        #[arg(short, long)]
        user: PathBuf,

        /// The campus's district
        #[arg(short, long)]
        district: Option<String>,

        /// The district's region. Looked up in the catalog when omitted
        #[arg(short, long)]
        region: Option<String>,
    },
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn parses_canonicalize() {
        let cli = Cli::try_parse_from(["cmc-scope", "canonicalize", "campus co-director"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Canonicalize {
                role: "campus co-director".to_owned()
            }
        );
        assert_eq!(cli.config, None);
    }

    #[test]
    fn config_is_global() {
        let cli = Cli::try_parse_from([
            "cmc-scope",
            "scope",
            "--user",
            "user.json",
            "--config",
            "cmc.yaml",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("cmc.yaml")));
        assert_eq!(
            cli.command,
            Command::Scope {
                user: PathBuf::from("user.json")
            }
        );
    }

    #[test]
    fn parses_campus_with_optional_anchors() {
        let cli = Cli::try_parse_from([
            "cmc-scope", "campus", "12", "-u", "-", "--district", "Ohio",
        ])
        .unwrap();
        assert_eq!(
            cli.command,
            Command::Campus {
                campus_id: 12,
                user: PathBuf::from("-"),
                district: Some("Ohio".to_owned()),
                region: None,
            }
        );
    }

    #[test]
    fn district_requires_user() {
        assert!(Cli::try_parse_from(["cmc-scope", "district", "Ohio"]).is_err());
    }

    #[test]
    fn campus_id_must_be_numeric() {
        assert!(Cli::try_parse_from(["cmc-scope", "campus", "abc", "-u", "u.json"]).is_err());
    }
}
