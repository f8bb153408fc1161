//! Line commands for `ngodir browse`. Each line maps to at most one
//! [`UserEvent`]; navigation words are resolved against the current page.

use ngodir::api::UserEvent;
use ngodir::model::Facet;
use ngodir::state::{Category, RegionFilter, SortKey};

pub const HELP: &str = "\
commands:
  search <text>          search name, description, location and services
  region <name|all>      restrict to one region
  state <name>           toggle a region in the region checklist
  regions [text]         list regions containing text
  category <name|all>    restrict to one category
  service <tag>          toggle a service
  focus <tag>            toggle a focus group
  clear <facet>          clear a facet (services, focus-groups, regions)
  flagged on|off         only safe spaces
  sort <key>             name, location, region, services
  page <n> | next | prev
  show <id>              full details
  reset                  clear every filter
  help | quit";

#[derive(Debug, PartialEq, Eq)]
pub enum BrowseCommand {
    Event(UserEvent),
    Next,
    Prev,
    Show(String),
    Regions(String),
    Help,
    Quit,
}

pub fn parse_line(line: &str) -> Result<Option<BrowseCommand>, String> {
    let line = line.trim_start();
    if line.is_empty() {
        return Ok(None);
    }
    // Search text is taken verbatim, trailing spaces included.
    let (word, text) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = text.trim();

    let command = match word.to_lowercase().as_str() {
        "search" | "s" => BrowseCommand::Event(UserEvent::SearchChanged(text.to_string())),
        "region" => BrowseCommand::Event(UserEvent::RegionSelected(RegionFilter::parse(rest))),
        "category" | "cat" => {
            BrowseCommand::Event(UserEvent::CategorySelected(Category::parse(rest)))
        }
        "service" => BrowseCommand::Event(UserEvent::FacetToggled {
            facet: Facet::Services,
            value: required(rest, "service")?,
        }),
        "focus" => BrowseCommand::Event(UserEvent::FacetToggled {
            facet: Facet::FocusGroups,
            value: required(rest, "focus")?,
        }),
        "state" | "toggle-region" => {
            BrowseCommand::Event(UserEvent::RegionToggled(required(rest, word)?))
        }
        "regions" => BrowseCommand::Regions(rest.to_string()),
        "clear" if rest.eq_ignore_ascii_case("regions") || rest.eq_ignore_ascii_case("states") => {
            BrowseCommand::Event(UserEvent::RegionsCleared)
        }
        "clear" => {
            let facet: Facet = required(rest, "clear")?
                .parse()
                .map_err(|e: ngodir::error::DirectoryError| e.to_string())?;
            BrowseCommand::Event(UserEvent::FacetCleared(facet))
        }
        "flagged" => {
            let on = match rest.to_lowercase().as_str() {
                "on" | "yes" | "true" | "" => true,
                "off" | "no" | "false" => false,
                other => return Err(format!("flagged expects on or off, got '{}'", other)),
            };
            BrowseCommand::Event(UserEvent::FlaggedToggled(on))
        }
        "sort" => {
            let key: SortKey = required(rest, "sort")?
                .parse()
                .map_err(|e: ngodir::error::DirectoryError| e.to_string())?;
            BrowseCommand::Event(UserEvent::SortChanged(key))
        }
        "page" | "p" => {
            let page = rest
                .parse()
                .map_err(|_| format!("page expects a number, got '{}'", rest))?;
            BrowseCommand::Event(UserEvent::PageRequested(page))
        }
        "next" | "n" => BrowseCommand::Next,
        "prev" => BrowseCommand::Prev,
        "show" => BrowseCommand::Show(required(rest, "show")?),
        "reset" => BrowseCommand::Event(UserEvent::ResetRequested),
        "help" | "?" => BrowseCommand::Help,
        "quit" | "exit" | "q" => BrowseCommand::Quit,
        other => return Err(format!("unknown command '{}' (try help)", other)),
    };
    Ok(Some(command))
}

fn required(rest: &str, command: &str) -> Result<String, String> {
    if rest.is_empty() {
        Err(format!("{} needs an argument", command))
    } else {
        Ok(rest.to_string())
    }
}
