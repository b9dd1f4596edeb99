use crate::config::Config;
use crate::display::{list_json, render_list};
use crate::error::Result;
use crate::store::{FilterContext, Tab};
use crate::types::Resource;

use super::{CommandOutput, OutputOptions, SourceOptions, load_store, make_client};

/// Options for `finboard ls`
pub struct ListOptions {
    pub resource: Resource,
    pub tab: Tab,
    pub page: usize,
    pub search: Option<String>,
    pub source: SourceOptions,
    pub output: OutputOptions,
}

/// List one page of a collection
pub async fn cmd_ls(options: ListOptions) -> Result<()> {
    let tab = options.tab.for_checked(options.resource)?;
    let config = Config::load()?;
    let client = make_client(options.resource, &options.source, &config)?;
    let mut store = load_store(options.resource, client.as_ref(), &config).await?;

    store.set_tab(tab);
    if let Some(query) = options.search {
        store.set_search(query);
    }
    store.set_page(options.page);

    // One clock reading for the whole page
    let view = store.view_at(FilterContext::now());
    CommandOutput::new(list_json(&view))
        .with_text(render_list(&view))
        .print(options.output)
}
