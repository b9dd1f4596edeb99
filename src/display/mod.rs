use owo_colors::{OwoColorize, Stream};

use crate::store::filter::{HIGH_RATING, Tab};
use crate::store::{PaginationInfo, RequestStatus};
use crate::types::Resource;

pub mod tables;

pub use tables::*;

/// Truncate to `max_len` characters, appending "..." when cut.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

/// Checkbox column
pub fn selection_mark(selected: bool) -> &'static str {
    if selected { "[x]" } else { "[ ]" }
}

/// IMDb rating with one decimal, colored by band
pub fn format_rating(rating: Option<f64>) -> String {
    let Some(rating) = rating else {
        return "N/A"
            .if_supports_color(Stream::Stdout, |t| t.dimmed())
            .to_string();
    };
    let text = format!("★ {rating:.1}");
    if rating >= HIGH_RATING {
        text.if_supports_color(Stream::Stdout, |t| t.green()).to_string()
    } else if rating >= 5.0 {
        text.if_supports_color(Stream::Stdout, |t| t.yellow()).to_string()
    } else {
        text.if_supports_color(Stream::Stdout, |t| t.red()).to_string()
    }
}

pub fn format_gender(gender: Option<&str>) -> String {
    match gender {
        Some(g) if g.eq_ignore_ascii_case("male") => {
            g.if_supports_color(Stream::Stdout, |t| t.blue()).to_string()
        }
        Some(g) if g.eq_ignore_ascii_case("female") => {
            g.if_supports_color(Stream::Stdout, |t| t.magenta()).to_string()
        }
        Some(g) => g.to_string(),
        None => "-".to_string(),
    }
}

pub fn format_status(status: &RequestStatus) -> String {
    let badge = format!("[{status}]");
    match status {
        RequestStatus::Idle => badge
            .if_supports_color(Stream::Stdout, |t| t.dimmed())
            .to_string(),
        RequestStatus::Loading => badge
            .if_supports_color(Stream::Stdout, |t| t.cyan())
            .to_string(),
        RequestStatus::Succeeded => badge
            .if_supports_color(Stream::Stdout, |t| t.green())
            .to_string(),
        RequestStatus::Failed(_) => badge
            .if_supports_color(Stream::Stdout, |t| t.red())
            .to_string(),
    }
}

/// Tab strip with the active tab highlighted, e.g. `All | [Recent] | High Rated`
pub fn format_tab_bar(resource: Resource, active: Tab) -> String {
    Tab::for_resource(resource)
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{tab}]")
                    .if_supports_color(Stream::Stdout, |t| t.bold())
                    .to_string()
            } else {
                tab.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Footer line: `Showing 11-20 of 23 · page 2/3`
pub fn format_pagination(info: &PaginationInfo) -> String {
    format!(
        "Showing {}-{} of {} · page {}/{}",
        info.start_index, info.end_index, info.total_items, info.current_page, info.total_pages
    )
}

/// Whole dollars with thousands separators: `$82,620`
pub fn format_money(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    format!("${out}")
}

/// Signed money for a net figure: `+$15,000`, `-$8,000`
pub fn format_net(amount: i64) -> String {
    let sign = if amount < 0 { "-" } else { "+" };
    let text = format!("{sign}{}", format_money(amount.unsigned_abs()));
    if amount < 0 {
        text.if_supports_color(Stream::Stdout, |t| t.red()).to_string()
    } else {
        text.if_supports_color(Stream::Stdout, |t| t.green()).to_string()
    }
}
