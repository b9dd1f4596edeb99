//! Table rendering for list pages, stats and the dashboard

use serde_json::{Value, json};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::dashboard::Dashboard;
use crate::entity::Entity;
use crate::store::{ListView, Row, Stats};
use crate::types::Resource;

use super::{
    format_gender, format_money, format_net, format_pagination, format_rating, format_status,
    format_tab_bar, selection_mark, truncate_string,
};

const TITLE_WIDTH: usize = 40;
const EMAIL_WIDTH: usize = 32;

#[derive(Tabled)]
struct MovieRow {
    #[tabled(rename = "")]
    mark: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Runtime")]
    runtime: String,
    #[tabled(rename = "Genres")]
    genres: String,
    #[tabled(rename = "Rating")]
    rating: String,
}

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "")]
    mark: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Gender")]
    gender: String,
    #[tabled(rename = "Email")]
    email: String,
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Registered")]
    registered: String,
}

#[derive(Tabled)]
struct CardRow {
    #[tabled(rename = "Metric")]
    label: String,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct RevenueRow {
    #[tabled(rename = "Month")]
    month: &'static str,
    #[tabled(rename = "Earning")]
    earning: String,
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "Net")]
    net: String,
}

fn or_dash(value: Option<String>) -> String {
    value.unwrap_or_else(|| "-".to_string())
}

fn movie_row(row: &Row<'_>) -> MovieRow {
    let entity = row.entity;
    let genres = entity.str_list("genres");
    MovieRow {
        mark: selection_mark(row.selected),
        id: entity.id().to_string(),
        title: truncate_string(entity.str_field("title").unwrap_or("(untitled)"), TITLE_WIDTH),
        year: or_dash(entity.i64_field("year").map(|y| y.to_string())),
        runtime: or_dash(entity.i64_field("runtime").map(|r| format!("{r} min"))),
        genres: if genres.is_empty() {
            "-".to_string()
        } else {
            genres.iter().take(2).copied().collect::<Vec<_>>().join(", ")
        },
        rating: format_rating(entity.f64_field("imdb.rating")),
    }
}

fn user_row(row: &Row<'_>) -> UserRow {
    let entity = row.entity;
    UserRow {
        mark: selection_mark(row.selected),
        id: entity.id().to_string(),
        name: entity.str_field("name").unwrap_or("-").to_string(),
        gender: format_gender(entity.str_field("gender")),
        email: truncate_string(entity.str_field("email").unwrap_or("-"), EMAIL_WIDTH),
        country: entity.str_field("country").unwrap_or("-").to_string(),
        registered: entity.str_field("registeredDate").unwrap_or("-").to_string(),
    }
}

/// Render a list page: tab strip, table and pagination footer
pub fn render_list(view: &ListView<'_>) -> String {
    let mut out = String::new();
    out.push_str(&format_tab_bar(view.resource, view.tab));
    if !view.search.is_empty() {
        out.push_str(&format!("   search: \"{}\"", view.search));
    }
    out.push('\n');

    if let Some(reason) = view.status.error() {
        out.push_str(&format!("{} {reason}\n", format_status(view.status)));
    }

    if view.rows.is_empty() {
        out.push_str(&format!("No {} found.\n", view.resource));
    } else {
        let mut table = match view.resource {
            Resource::Movies => Table::new(view.rows.iter().map(movie_row)),
            Resource::Users => Table::new(view.rows.iter().map(user_row)),
        };
        table.with(Style::rounded());
        out.push_str(&table.to_string());
        out.push('\n');
    }

    out.push_str(&format_pagination(&view.pagination));
    if view.selected_count > 0 {
        out.push_str(&format!(" · {} selected", view.selected_count));
    }
    out
}

/// Render the summary cards for a collection
pub fn render_stats(stats: &Stats) -> String {
    let rows: Vec<CardRow> = stats
        .cards()
        .into_iter()
        .map(|(label, value)| CardRow {
            label: label.to_string(),
            value: value.to_string(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Render balance cards and the revenue series
pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let cards: Vec<CardRow> = dashboard
        .cards
        .iter()
        .map(|card| CardRow {
            label: card.title.to_string(),
            value: format!("{} ({})", card.value, card.trend),
        })
        .collect();
    let revenue: Vec<RevenueRow> = dashboard
        .revenue
        .iter()
        .map(|point| RevenueRow {
            month: point.month,
            earning: format_money(point.earning),
            expense: format_money(point.expense),
            net: format_net(point.net()),
        })
        .collect();

    let mut cards_table = Table::new(cards);
    cards_table.with(Style::rounded());
    let mut revenue_table = Table::new(revenue);
    revenue_table.with(Style::rounded());

    let mut out = format!(
        "{cards_table}\n\nRevenue\n{revenue_table}\nTotal earning {} · total expense {}",
        format_money(dashboard.total_earning()),
        format_money(dashboard.total_expense())
    );
    if let Some(best) = dashboard.best_month() {
        out.push_str(&format!(
            "\nBest month {} ({} earned, {} net)",
            best.month,
            format_money(best.earning),
            format_net(best.net())
        ));
    }
    out
}

/// JSON form of a list page
pub fn list_json(view: &ListView<'_>) -> Value {
    let items: Vec<Value> = view.rows.iter().map(|row| row.entity.to_value()).collect();
    let selected: Vec<&str> = view
        .rows
        .iter()
        .filter(|row| row.selected)
        .map(|row| row.entity.id().as_str())
        .collect();
    json!({
        "resource": view.resource,
        "tab": view.tab.label(),
        "search": view.search,
        "status": view.status.to_string(),
        "pagination": view.pagination,
        "selected": selected,
        "items": items,
    })
}

/// One entity as pretty key/value lines
pub fn render_entity(entity: &Entity) -> String {
    serde_json::to_string_pretty(&entity.to_value()).unwrap_or_else(|_| entity.id().to_string())
}
