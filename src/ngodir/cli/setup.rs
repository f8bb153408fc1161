use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ngodir", bin_name = "ngodir", version)]
#[command(about = "Browse and filter a directory of support organizations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory document to load (JSON)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Configuration directory
    #[arg(
        long,
        global = true,
        value_name = "DIR",
        env = "NGODIR_HOME",
        help_heading = "Options"
    )]
    pub config_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List organizations matching the given filters
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one organization in full
    Show {
        /// Record id
        id: String,
    },

    /// List the regions present in the directory
    Regions {
        /// Only regions whose name contains this text
        filter: Option<String>,
    },

    /// List the known categories
    Categories,

    /// List the service and focus-group values
    Facets,

    /// Interactive session driven by one command per line on stdin
    Browse,

    /// Get or set configuration
    Config {
        /// Configuration key (page-size, debounce-ms, data-file)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(clap::Args, Debug, Default)]
pub struct ListArgs {
    /// Search name, description, location and services
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only show these regions (repeatable); records without a region stay listed
    #[arg(short, long = "region", value_name = "REGION")]
    pub regions: Vec<String>,

    /// Only show this category (e.g. housing, legal)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Restrict to these services (repeatable)
    #[arg(long = "service", value_name = "SERVICE")]
    pub services: Vec<String>,

    /// Restrict to these focus groups (repeatable)
    #[arg(long = "focus", value_name = "GROUP")]
    pub focus_groups: Vec<String>,

    /// Only show organizations flagged as safe spaces
    #[arg(long)]
    pub flagged: bool,

    /// Sort order: name, location, region or services
    #[arg(long, default_value = "name")]
    pub sort: String,

    /// Page to show
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naked_invocation_has_no_command() {
        let cli = Cli::try_parse_from(["ngodir"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn list_collects_repeated_facets() {
        let cli = Cli::try_parse_from([
            "ngodir", "list", "--service", "Legal", "--service", "Housing", "--focus", "women",
            "--sort", "services", "-p", "2",
        ])
        .unwrap();
        let Some(Commands::List(args)) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.services, ["Legal", "Housing"]);
        assert_eq!(args.focus_groups, ["women"]);
        assert_eq!(args.sort, "services");
        assert_eq!(args.page, 2);
        assert!(args.regions.is_empty());
    }

    #[test]
    fn regions_repeat_and_filter() {
        let cli = Cli::try_parse_from(["ngodir", "list", "-r", "Delhi", "--region", "Goa"]).unwrap();
        let Some(Commands::List(args)) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.regions, ["Delhi", "Goa"]);

        let cli = Cli::try_parse_from(["ngodir", "regions", "pradesh"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Regions { filter: Some(f) }) if f == "pradesh"
        ));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["ngodir", "regions", "--data", "ngos.json", "-v"]).unwrap();
        assert_eq!(cli.data, Some(PathBuf::from("ngos.json")));
        assert!(cli.verbose);
    }
}
