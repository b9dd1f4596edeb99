use crate::dashboard::Dashboard;
use crate::display::render_dashboard;
use crate::error::Result;

use super::{CommandOutput, OutputOptions};

/// Show the balance cards and revenue series
pub fn cmd_dashboard(output: OutputOptions) -> Result<()> {
    let dashboard = Dashboard::load();
    CommandOutput::new(serde_json::to_value(&dashboard)?)
        .with_text(render_dashboard(&dashboard))
        .print(output)
}
