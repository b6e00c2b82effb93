//! typeahead - Entry Point

use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use typeahead::config::{self, CliOverrides, KeyBindings};
use typeahead::model::Item;
use typeahead::state::{DefaultSelection, Dropdown, DropdownOptions, MatchMode};
use typeahead::view::{self, ColorConfig, DropdownStyles};

/// typeahead - pick one line from a list with incremental search
#[derive(Parser, Debug)]
#[command(name = "typeahead")]
#[command(version)]
#[command(about = "Interactive type-ahead picker: prints the chosen item's value")]
pub struct Args {
    /// File with one item per line (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Split each line at the first DELIMITER into label and value
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// Match mode for type-ahead search
    #[arg(short, long, value_parser = ["prefix", "substring"])]
    pub mode: Option<String>,

    /// Match case exactly
    #[arg(long)]
    pub case_sensitive: bool,

    /// Caption shown before the selection
    #[arg(long)]
    pub label: Option<String>,

    /// Label of the item selected initially
    #[arg(long)]
    pub default: Option<String>,

    /// Most rows shown in the popup (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub max_height: Option<u16>,

    /// Open the filter prompt immediately
    #[arg(short, long)]
    pub filter: bool,

    /// Print the selection as a JSON object
    #[arg(long)]
    pub json: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Flags that override the config file and environment.
    fn cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            mode: self.mode.as_deref().and_then(|mode| mode.parse::<MatchMode>().ok()),
            case_sensitive: self.case_sensitive.then_some(true),
            max_height: self.max_height.map(usize::from),
            label: self.label.clone(),
        }
    }
}

/// Selection as printed with `--json`.
#[derive(Debug, Serialize)]
struct JsonSelection<'a> {
    position: usize,
    label: &'a str,
    value: &'a str,
}

fn format_selection(position: usize, item: &Item<String>, json: bool) -> Result<String, serde_json::Error> {
    if json {
        serde_json::to_string(&JsonSelection {
            position,
            label: item.label(),
            value: item.value(),
        })
    } else {
        Ok(item.value().clone())
    }
}

/// Runs the picker. Returns whether an item was chosen.
fn run(args: Args) -> Result<bool, Box<dyn std::error::Error>> {
    // Defaults → Config File → Env Vars → CLI Args
    let (config, rejected) = config::resolve(args.config.clone(), args.cli_overrides())?;
    let key_bindings = KeyBindings::with_overrides(&config.keybindings)?;

    typeahead::logging::init(&config.log_file_path)?;
    for env in &rejected {
        warn!(
            variable = env.variable,
            value = %env.value,
            reason = %env.reason,
            "ignoring environment override"
        );
    }
    info!(config = ?config, "Configuration loaded and resolved");

    let items = typeahead::source::read_items(args.file.clone(), args.delimiter.as_deref())?;

    let options = DropdownOptions {
        label: config.label.clone(),
        default: args.default.clone().map(DefaultSelection::Label),
        border: config.border,
        max_height: config.max_height,
        auto_complete: true,
        case_sensitive: config.case_sensitive,
        mode: config.mode,
    };
    let dropdown = Dropdown::new(items, options);
    let styles = DropdownStyles::with_color_config(ColorConfig::from_env_and_args(args.no_color));
    let initial_filter = args.filter.then_some(config.mode);

    match view::run_picker(dropdown, key_bindings, styles, initial_filter)? {
        Some((position, item)) => {
            info!(position, label = item.label(), "item chosen");
            println!("{}", format_selection(position, &item, args.json)?);
            Ok(true)
        }
        None => {
            info!("picker cancelled");
            Ok(false)
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("typeahead: {e}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["typeahead", "--help"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["typeahead", "--version"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["typeahead"]);
        assert_eq!(args.file, None);
        assert_eq!(args.delimiter, None);
        assert_eq!(args.mode, None);
        assert!(!args.case_sensitive);
        assert_eq!(args.label, None);
        assert_eq!(args.default, None);
        assert_eq!(args.max_height, None);
        assert!(!args.filter);
        assert!(!args.json);
        assert!(!args.no_color);
        assert_eq!(args.config, None);
        assert_eq!(args.cli_overrides(), CliOverrides::default());
    }

    #[test]
    fn test_file_path_populates_file_field() {
        let args = Args::parse_from(["typeahead", "colors.txt"]);
        assert_eq!(args.file, Some(PathBuf::from("colors.txt")));
    }

    #[test]
    fn test_delimiter_short_and_long() {
        let args = Args::parse_from(["typeahead", "-d", "\t"]);
        assert_eq!(args.delimiter.as_deref(), Some("\t"));
        let args = Args::parse_from(["typeahead", "--delimiter", "="]);
        assert_eq!(args.delimiter.as_deref(), Some("="));
    }

    #[test]
    fn test_mode_accepts_prefix_and_substring() {
        let args = Args::parse_from(["typeahead", "-m", "substring"]);
        assert_eq!(args.cli_overrides().mode, Some(MatchMode::Substring));
        let args = Args::parse_from(["typeahead", "--mode", "prefix"]);
        assert_eq!(args.cli_overrides().mode, Some(MatchMode::Prefix));
    }

    #[test]
    fn test_mode_invalid_rejects() {
        let result = Args::try_parse_from(["typeahead", "--mode", "fuzzy"]);
        assert!(result.is_err(), "Unknown match mode should be rejected");
    }

    #[test]
    fn test_max_height_rejects_zero() {
        let result = Args::try_parse_from(["typeahead", "--max-height", "0"]);
        assert!(result.is_err(), "max-height must be at least 1");
    }

    #[test]
    fn test_filter_flag_short() {
        let args = Args::parse_from(["typeahead", "-f"]);
        assert!(args.filter);
    }

    #[test]
    fn test_case_sensitive_overrides_only_when_set() {
        let args = Args::parse_from(["typeahead", "--case-sensitive"]);
        assert_eq!(args.cli_overrides().case_sensitive, Some(true));
        let args = Args::parse_from(["typeahead"]);
        assert_eq!(args.cli_overrides().case_sensitive, None);
    }

    #[test]
    fn test_combined_flags() {
        let args = Args::parse_from([
            "typeahead",
            "items.txt",
            "-d",
            ":",
            "-m",
            "substring",
            "--label",
            "Host",
            "--default",
            "db1",
            "--max-height",
            "5",
            "--json",
            "--no-color",
            "--config",
            "/tmp/typeahead.toml",
        ]);
        assert_eq!(args.file, Some(PathBuf::from("items.txt")));
        assert_eq!(args.default.as_deref(), Some("db1"));
        assert!(args.json);
        assert!(args.no_color);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/typeahead.toml")));
        assert_eq!(
            args.cli_overrides(),
            CliOverrides {
                mode: Some(MatchMode::Substring),
                case_sensitive: None,
                max_height: Some(5),
                label: Some("Host".to_string()),
            }
        );
    }

    #[test]
    fn test_format_selection_prints_value() {
        let item = Item::new("Red", "#ff0000".to_string());
        assert_eq!(format_selection(0, &item, false).unwrap(), "#ff0000");
    }

    #[test]
    fn test_format_selection_json() {
        let item = Item::new("Red", "#ff0000".to_string());
        let output = format_selection(2, &item, true).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!({"position": 2, "label": "Red", "value": "#ff0000"})
        );
    }
}
