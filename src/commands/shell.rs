//! Interactive list session.
//!
//! Reads one command per line and applies it to a single `ListStore`, printing
//! the resulting page. Parsing and execution are separate so a session can be
//! driven from any line source.

use std::io::Write;
use std::str::FromStr;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::config::Config;
use crate::display::{format_status, render_entity, render_list, render_stats};
use crate::entity::EntityId;
use crate::error::{BoardError, Result};
use crate::remote::CollectionClient;
use crate::store::{Draft, ListStore, LoadOutcome, Tab};
use crate::types::Resource;

use super::{SourceOptions, make_client};

pub const HELP: &str = "\
Commands:
  show [ID]              Show the current page, or one entity
  page N | next | prev   Move between pages
  tab LABEL              Switch filter tab (unknown or foreign labels show All)
  search [QUERY]         Fuzzy search; no query clears it
  toggle ID              Select or unselect a row
  select-all             Select exactly the rows on the page, or clear them
  clear                  Clear the selection
  add KEY=VALUE...       Add an entity locally
  edit ID [KEY=VALUE...] Edit an entity locally; with no pairs, print its fields
  rm ID                  Remove an entity locally
  bulk-rm                Remove every selected entity
  reload                 Fetch again (discards local changes)
  stats                  Summary counts
  help                   This text
  quit                   Leave the session";

/// One parsed session command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Show(Option<EntityId>),
    Page(usize),
    Next,
    Prev,
    Tab(Tab),
    Search(String),
    Toggle(EntityId),
    SelectAll,
    Clear,
    Add(Draft),
    Edit(EntityId, Draft),
    Remove(EntityId),
    BulkRemove,
    Reload,
    Stats,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = BoardError;

    fn from_str(line: &str) -> Result<Self> {
        let args = split_args(line)?;
        let Some((name, rest)) = args.split_first() else {
            return Ok(ShellCommand::Show(None));
        };

        let command = match name.to_lowercase().as_str() {
            "show" | "ls" => ShellCommand::Show(rest.first().map(|id| EntityId::new(id.as_str()))),
            "page" | "p" => {
                let n = rest
                    .first()
                    .and_then(|n| n.parse().ok())
                    .ok_or_else(|| usage("page N"))?;
                ShellCommand::Page(n)
            }
            "next" | "n" => ShellCommand::Next,
            "prev" => ShellCommand::Prev,
            "tab" => ShellCommand::Tab(Tab::from_label(&rest.join(" "))),
            "search" | "/" => ShellCommand::Search(rest.join(" ")),
            "toggle" | "t" => ShellCommand::Toggle(required_id(rest, "toggle ID")?),
            "select-all" | "all" => ShellCommand::SelectAll,
            "clear" => ShellCommand::Clear,
            "add" => ShellCommand::Add(Draft::parse_pairs(rest)?),
            "edit" => {
                let id = required_id(rest, "edit ID [KEY=VALUE...]")?;
                ShellCommand::Edit(id, Draft::parse_pairs(&rest[1..])?)
            }
            "rm" | "remove" => ShellCommand::Remove(required_id(rest, "rm ID")?),
            "bulk-rm" => ShellCommand::BulkRemove,
            "reload" | "retry" => ShellCommand::Reload,
            "stats" => ShellCommand::Stats,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" | "q" => ShellCommand::Quit,
            other => {
                return Err(BoardError::Other(format!(
                    "unknown command '{other}' (try 'help')"
                )));
            }
        };
        Ok(command)
    }
}

fn usage(text: &str) -> BoardError {
    BoardError::Other(format!("usage: {text}"))
}

fn required_id(rest: &[String], text: &str) -> Result<EntityId> {
    rest.first()
        .map(|id| EntityId::new(id.as_str()))
        .ok_or_else(|| usage(text))
}

/// Split a line into words, honoring single and double quotes
pub fn split_args(line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    args.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(BoardError::Other("unterminated quote".to_string()));
    }
    if in_word {
        args.push(current);
    }
    Ok(args)
}

/// What the session loop should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Quit,
}

fn page(store: &ListStore) -> String {
    render_list(&store.view())
}

/// Apply one command to the store and describe the result
pub async fn execute(
    store: &mut ListStore,
    client: &dyn CollectionClient,
    command: ShellCommand,
) -> Result<Flow> {
    let text = match command {
        ShellCommand::Show(None) => page(store),
        ShellCommand::Show(Some(id)) => match store.get(&id) {
            Some(entity) => render_entity(entity),
            None => return Err(BoardError::NotFound(id.to_string())),
        },
        ShellCommand::Page(n) => {
            store.set_page(n);
            page(store)
        }
        ShellCommand::Next => {
            if !store.pagination_info().has_next() {
                format!("Already on the last page\n{}", page(store))
            } else {
                store.next_page();
                page(store)
            }
        }
        ShellCommand::Prev => {
            if !store.pagination_info().has_prev() {
                format!("Already on the first page\n{}", page(store))
            } else {
                store.prev_page();
                page(store)
            }
        }
        ShellCommand::Tab(tab) => {
            let tab = tab.for_checked(store.resource()).unwrap_or_default();
            store.set_tab(tab);
            page(store)
        }
        ShellCommand::Search(query) => {
            store.set_search(query);
            page(store)
        }
        ShellCommand::Toggle(id) => {
            if !store.contains(&id) {
                return Err(BoardError::NotFound(id.to_string()));
            }
            store.toggle_selection(&id);
            page(store)
        }
        ShellCommand::SelectAll => {
            store.toggle_select_all();
            page(store)
        }
        ShellCommand::Clear => {
            store.clear_selection();
            page(store)
        }
        ShellCommand::Add(draft) => {
            let id = store.add(&draft)?;
            format!("Added {id}\n{}", page(store))
        }
        ShellCommand::Edit(id, draft) if draft.is_empty() => {
            let entity = store
                .get(&id)
                .ok_or_else(|| BoardError::NotFound(id.to_string()))?;
            let form = Draft::from_entity(entity, store.resource());
            format!("edit {id} {}", form.to_pairs_line())
        }
        ShellCommand::Edit(id, draft) => {
            if store.edit(&id, &draft)? {
                format!("Updated {id}\n{}", page(store))
            } else {
                format!("No {} with id {id}", store.resource())
            }
        }
        ShellCommand::Remove(id) => {
            if store.remove(&id) {
                format!("Removed {id}\n{}", page(store))
            } else {
                format!("No {} with id {id}", store.resource())
            }
        }
        ShellCommand::BulkRemove => {
            let removed = store.bulk_remove();
            format!("Removed {removed} {}\n{}", store.resource(), page(store))
        }
        ShellCommand::Reload => {
            if store.load(client).await == LoadOutcome::Stale {
                tracing::debug!("reload superseded");
            }
            format!("{}\n{}", format_status(store.status()), page(store))
        }
        ShellCommand::Stats => render_stats(&store.stats()),
        ShellCommand::Help => HELP.to_string(),
        ShellCommand::Quit => return Ok(Flow::Quit),
    };
    Ok(Flow::Continue(text))
}

/// Drive a session from `reader`, writing every result to `out`.
///
/// Command errors are printed and the session continues; only I/O failures end it.
pub async fn run_session<R, W>(
    store: &mut ListStore,
    client: &dyn CollectionClient,
    reader: R,
    out: &mut W,
    prompt: bool,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = reader.lines();
    loop {
        if prompt {
            write!(out, "{}> ", store.resource())?;
            out.flush()?;
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let result = match line.parse::<ShellCommand>() {
            Ok(command) => execute(store, client, command).await,
            Err(err) => Err(err),
        };
        match result {
            Ok(Flow::Continue(text)) => writeln!(out, "{text}")?,
            Ok(Flow::Quit) => break,
            Err(err) => writeln!(out, "error: {err}")?,
        }
    }
    Ok(())
}

/// Interactive session over stdin
pub async fn cmd_shell(resource: Resource, source: SourceOptions) -> Result<()> {
    let config = Config::load()?;
    let client = make_client(resource, &source, &config)?;
    let mut store = ListStore::new(resource, config.page_size(resource));

    store.load(client.as_ref()).await;
    let mut stdout = std::io::stdout();
    writeln!(
        stdout,
        "{} {}\n{}",
        resource,
        format_status(store.status()),
        render_list(&store.view())
    )?;

    let prompt = atty::is(atty::Stream::Stdin);
    let reader = BufReader::new(tokio::io::stdin());
    run_session(&mut store, client.as_ref(), reader, &mut stdout, prompt).await
}
