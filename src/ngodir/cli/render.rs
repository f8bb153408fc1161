//! Terminal rendering. Every function returns the text to print so the
//! handlers stay one-liners and the layout can be checked in tests.

use colored::*;
use ngodir::api::LoadReport;
use ngodir::model::Record;
use ngodir::query::CategoryTable;
use ngodir::state::ViewResult;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const INDENT: &str = "    ";
const FLAG_MARKER: &str = "◆";

pub fn render_view(view: &ViewResult) -> String {
    if view.is_empty() {
        return format!(
            "No organizations found.\n{}\n",
            "Try adjusting your search or filters.".dimmed()
        );
    }

    let mut out = String::new();
    let first = (view.page - 1) * view.page_size;
    for (i, record) in view.records.iter().enumerate() {
        out.push_str(&render_card(first + i + 1, record));
    }
    out.push_str(&render_footer(view));
    out
}

fn render_card(index: usize, record: &Record) -> String {
    let idx_str = format!("{}. ", index);
    let marker = if record.is_flagged {
        format!(" {}", FLAG_MARKER)
    } else {
        String::new()
    };
    let available = LINE_WIDTH.saturating_sub(idx_str.width() + marker.width());
    let name = truncate_to_width(&record.name, available);

    let mut out = format!(
        "{}{}{}\n",
        idx_str.yellow(),
        name.bold(),
        marker.green()
    );

    let place = match (&record.location, &record.region) {
        (location, Some(region)) if !location.is_empty() => format!("{} ({})", location, region),
        (_, Some(region)) => region.clone(),
        (location, None) => location.clone(),
    };
    if !place.is_empty() {
        out.push_str(&format!("{}{}\n", INDENT, place.dimmed()));
    }

    let body_width = LINE_WIDTH.saturating_sub(INDENT.width());
    if !record.description.is_empty() {
        out.push_str(&format!(
            "{}{}\n",
            INDENT,
            truncate_to_width(&record.description, body_width)
        ));
    }
    if !record.services.is_empty() {
        let services = truncate_to_width(&record.services.join(", "), body_width);
        out.push_str(&format!("{}{} {}\n", INDENT, "Services:".cyan(), services));
    }
    if !record.focus_groups.is_empty() {
        out.push_str(&format!(
            "{}{} {}\n",
            INDENT,
            "Focus:".cyan(),
            record.focus_groups.join(", ")
        ));
    }
    out.push('\n');
    out
}

fn render_footer(view: &ViewResult) -> String {
    let noun = if view.total_matches == 1 {
        "organization"
    } else {
        "organizations"
    };
    let mut footer = format!(
        "Page {} of {} · {} {}",
        view.page, view.total_pages, view.total_matches, noun
    );
    if view.has_next() {
        footer.push_str(&format!(" · next: --page {}", view.page + 1));
    }
    format!("{}\n", footer.dimmed())
}

/// Full detail for a single record.
pub fn render_record(record: &Record) -> String {
    let mut out = format!("{}", record.name.bold());
    if record.is_flagged {
        out.push_str(&format!(" {}", format!("{} safe space", FLAG_MARKER).green()));
    }
    out.push('\n');
    out.push_str(&format!("{}\n", "-".repeat(record.name.width().max(8))));

    let mut field = |label: &str, value: &str| {
        if !value.is_empty() {
            out.push_str(&format!("{:<10}{}\n", format!("{}:", label).cyan(), value));
        }
    };
    field("Id", record.id.as_ref());
    field("Location", &record.location);
    field("Region", record.region.as_deref().unwrap_or_default());
    field("Services", &record.services.join(", "));
    field("Focus", &record.focus_groups.join(", "));
    field("Phone", record.contact.phone.as_deref().unwrap_or_default());
    field("Email", record.contact.email.as_deref().unwrap_or_default());

    if !record.description.is_empty() {
        out.push('\n');
        out.push_str(&record.description);
        out.push('\n');
    }
    out
}

/// A plain list of values under a heading.
pub fn render_values<T: AsRef<str>>(heading: &str, values: &[T]) -> String {
    let mut out = format!("{}\n", heading.bold());
    if values.is_empty() {
        out.push_str(&format!("{}{}\n", INDENT, "(none)".dimmed()));
    }
    for value in values {
        out.push_str(&format!("{}{}\n", INDENT, value.as_ref()));
    }
    out
}

pub fn render_categories(table: &CategoryTable) -> String {
    let mut out = format!("{}\n", "Categories".bold());
    for rule in table.rules() {
        let keywords: Vec<&str> = rule
            .services
            .iter()
            .chain(rule.focus_groups.iter())
            .map(String::as_str)
            .collect();
        out.push_str(&format!(
            "{}{:<14}{}\n",
            INDENT,
            rule.name,
            keywords.join(", ").dimmed()
        ));
    }
    out
}

/// Warning shown when the configured source failed and a fallback is in use.
pub fn render_fallback(report: &LoadReport) -> Option<String> {
    if !report.fallback {
        return None;
    }
    let reason = report.error.as_deref().unwrap_or("unknown error");
    Some(format!(
        "{}",
        format!(
            "Could not load {} ({}); showing the built-in sample directory.",
            report.origin, reason
        )
        .yellow()
    ))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
