//! # CLI Layer
//!
//! This module is **one possible UI client** for the directory. It is the
//! **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr, stdin)
//! - Installs the tracing subscriber
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! Handlers translate arguments into [`UserEvent`]s, hand them to the API and
//! print whatever comes back through `render`.

use super::browse::{self, BrowseCommand};
use super::render;
use super::setup::{Cli, Commands, ListArgs};
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use ngodir::api::{DirectoryApi, UserEvent};
use ngodir::config::DirectoryConfig;
use ngodir::error::{DirectoryError, Result};
use ngodir::model::Facet;
use ngodir::source::fs::FileSource;
use ngodir::source::memory::InMemorySource;
use ngodir::source::sample::sample_records;
use ngodir::source::DataSource;
use ngodir::state::{Category, RegionFilter, SortKey};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_dir = resolve_config_dir(cli.config_dir.as_deref())?;
    let mut config = DirectoryConfig::load(&config_dir)?;
    tracing::debug!(config_dir = %config_dir.display(), "configuration loaded");

    if let Some(Commands::Config { key, value }) = &cli.command {
        return handle_config(&mut config, &config_dir, key.as_deref(), value.as_deref());
    }

    match cli.data.clone().or_else(|| config.data_file.clone()) {
        Some(path) => dispatch(DirectoryApi::new(FileSource::new(path), &config), cli.command),
        None => dispatch(
            DirectoryApi::new(InMemorySource::new(sample_records()), &config),
            cli.command,
        ),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn resolve_config_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    let proj_dirs = ProjectDirs::from("org", "ngodir", "ngodir").ok_or_else(|| {
        DirectoryError::Config("could not determine a configuration directory".to_string())
    })?;
    Ok(proj_dirs.config_dir().to_path_buf())
}

fn dispatch<S: DataSource>(mut api: DirectoryApi<S>, command: Option<Commands>) -> Result<()> {
    let report = api.load()?;
    if let Some(warning) = render::render_fallback(report) {
        eprintln!("{}", warning);
    }

    match command {
        Some(Commands::List(args)) => handle_list(&mut api, args),
        Some(Commands::Show { id }) => handle_show(&api, &id),
        Some(Commands::Regions { filter }) => {
            let regions = api.regions_matching(filter.as_deref().unwrap_or_default());
            print!("{}", render::render_values("Regions", &regions));
            Ok(())
        }
        Some(Commands::Categories) => {
            print!("{}", render::render_categories(api.categories()));
            Ok(())
        }
        Some(Commands::Facets) => handle_facets(&api),
        Some(Commands::Browse) => handle_browse(&mut api),
        Some(Commands::Config { .. }) => Ok(()),
        None => handle_list(
            &mut api,
            ListArgs {
                sort: SortKey::default().to_string(),
                page: 1,
                ..ListArgs::default()
            },
        ),
    }
}

fn list_events(args: ListArgs) -> Result<Vec<UserEvent>> {
    let mut events = Vec::new();
    if let Some(search) = args.search {
        events.push(UserEvent::SearchChanged(search));
    }
    if !args.regions.is_empty() {
        let all = args
            .regions
            .iter()
            .any(|r| RegionFilter::parse(r) == RegionFilter::All);
        events.push(if all {
            UserEvent::RegionsCleared
        } else {
            UserEvent::RegionsSelected(args.regions)
        });
    }
    if let Some(category) = args.category {
        events.push(UserEvent::CategorySelected(Category::parse(&category)));
    }
    if !args.services.is_empty() {
        events.push(UserEvent::FacetSelected {
            facet: Facet::Services,
            values: args.services,
        });
    }
    if !args.focus_groups.is_empty() {
        events.push(UserEvent::FacetSelected {
            facet: Facet::FocusGroups,
            values: args.focus_groups,
        });
    }
    if args.flagged {
        events.push(UserEvent::FlaggedToggled(true));
    }
    events.push(UserEvent::SortChanged(args.sort.parse()?));
    // Every other event sends the view back to page 1, so the page goes last.
    events.push(UserEvent::PageRequested(args.page));
    Ok(events)
}

fn handle_list<S: DataSource>(api: &mut DirectoryApi<S>, args: ListArgs) -> Result<()> {
    let requested = args.page;
    let mut view = api.view();
    for event in list_events(args)? {
        view = api.apply(event);
    }
    if view.page != requested && !view.is_empty() {
        eprintln!(
            "{}",
            format!("Page {} does not exist, showing page 1.", requested).yellow()
        );
    }
    print!("{}", render::render_view(&view));
    Ok(())
}

fn handle_show<S: DataSource>(api: &DirectoryApi<S>, id: &str) -> Result<()> {
    let record = api.record(id)?;
    print!("{}", render::render_record(record));
    Ok(())
}

fn handle_facets<S: DataSource>(api: &DirectoryApi<S>) -> Result<()> {
    for (i, facet) in Facet::all().iter().enumerate() {
        if i > 0 {
            println!();
        }
        let heading = match facet {
            Facet::Services => "Services",
            Facet::FocusGroups => "Focus groups",
        };
        print!("{}", render::render_values(heading, api.facet_values(*facet)));
    }
    Ok(())
}

/// Reads stdin on its own thread so typed searches can settle while the
/// session waits for the next line.
fn spawn_line_reader() -> mpsc::Receiver<io::Result<String>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

fn handle_browse<S: DataSource>(api: &mut DirectoryApi<S>) -> Result<()> {
    let lines = spawn_line_reader();
    let mut stdout = io::stdout();

    let mut view = api.view();
    print!("{}", render::render_view(&view));
    println!("{}", "Type help for commands.".dimmed());

    loop {
        let received = match api.search_deadline() {
            Some(deadline) => {
                lines.recv_timeout(deadline.saturating_duration_since(Instant::now()))
            }
            None => lines.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        // A search whose quiet period ran out is committed before the next line.
        if let Some(settled) = api.tick(Instant::now()) {
            view = settled;
            print!("{}", render::render_view(&view));
        }

        let line = match received {
            Ok(line) => line?,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        let command = match browse::parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{}", message.red());
                continue;
            }
        };

        if let BrowseCommand::Event(UserEvent::SearchChanged(text)) = command {
            api.type_search(text, Instant::now());
            continue;
        }
        // Anything else acts on the search as typed so far.
        if let Some(flushed) = api.flush_search() {
            view = flushed;
            if matches!(command, BrowseCommand::Quit) {
                print!("{}", render::render_view(&view));
            }
        }

        let event = match command {
            BrowseCommand::Event(event) => event,
            BrowseCommand::Next if view.has_next() => UserEvent::PageRequested(view.page + 1),
            BrowseCommand::Prev if view.has_prev() => UserEvent::PageRequested(view.page - 1),
            BrowseCommand::Next | BrowseCommand::Prev => {
                eprintln!("{}", "No more pages in that direction.".yellow());
                continue;
            }
            BrowseCommand::Show(id) => {
                match api.record(&id) {
                    Ok(record) => print!("{}", render::render_record(record)),
                    Err(e) => eprintln!("{}", e.to_string().red()),
                }
                continue;
            }
            BrowseCommand::Regions(text) => {
                let regions = api.regions_matching(&text);
                print!("{}", render::render_values("Regions", &regions));
                continue;
            }
            BrowseCommand::Help => {
                println!("{}", browse::HELP);
                continue;
            }
            BrowseCommand::Quit => break,
        };

        view = api.apply(event);
        print!("{}", render::render_view(&view));
        stdout.flush()?;
    }

    if let Some(flushed) = api.flush_search() {
        print!("{}", render::render_view(&flushed));
    }
    Ok(())
}

fn handle_config(
    config: &mut DirectoryConfig,
    config_dir: &Path,
    key: Option<&str>,
    value: Option<&str>,
) -> Result<()> {
    match (key, value) {
        (None, _) => {
            for key in DirectoryConfig::keys() {
                println!("{} = {}", key, config.get(key)?);
            }
        }
        (Some(key), None) => println!("{} = {}", key, config.get(key)?),
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save(config_dir)?;
            println!("{}", format!("{} = {}", key, config.get(key)?).green());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ListArgs {
        ListArgs {
            sort: "name".to_string(),
            page: 1,
            ..ListArgs::default()
        }
    }

    #[test]
    fn page_event_comes_last() {
        let events = list_events(ListArgs {
            search: Some("legal".into()),
            services: vec!["Housing".into()],
            page: 2,
            ..args()
        })
        .unwrap();
        assert_eq!(events.first(), Some(&UserEvent::SearchChanged("legal".into())));
        assert_eq!(events.last(), Some(&UserEvent::PageRequested(2)));
        assert!(events.contains(&UserEvent::FacetSelected {
            facet: Facet::Services,
            values: vec!["Housing".into()],
        }));
    }

    #[test]
    fn repeated_regions_select_a_set() {
        let events = list_events(ListArgs {
            regions: vec!["Delhi".into(), "Goa".into()],
            ..args()
        })
        .unwrap();
        assert!(events.contains(&UserEvent::RegionsSelected(vec![
            "Delhi".into(),
            "Goa".into()
        ])));

        let events = list_events(ListArgs {
            regions: vec!["Delhi".into(), "all".into()],
            ..args()
        })
        .unwrap();
        assert!(events.contains(&UserEvent::RegionsCleared));
    }

    #[test]
    fn unknown_sort_key_is_an_error() {
        let result = list_events(ListArgs {
            sort: "size".into(),
            ..args()
        });
        assert!(result.is_err());
    }

    #[test]
    fn explicit_config_dir_wins() {
        let dir = resolve_config_dir(Some(Path::new("/tmp/ngodir-test"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/ngodir-test"));
    }
}
