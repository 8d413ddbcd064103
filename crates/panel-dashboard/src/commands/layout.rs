//! Layout commands, each scoped to one columns-count.
//!
//! - `layout` - Stored layout of every enabled panel, as JSON
//! - `collapse` / `expand` - Toggle a panel's collapsed flag
//! - `move` - Reposition panels with `<panel>=<column>:<order>` specs
//! - `columns` - The rendered grid plus unpositioned panels, as JSON

use panel_dashboard::{AppContext, AppError};
use panel_layout::{ColumnsCount, Position};
use std::collections::BTreeMap;

/// One `<panel>=<column>:<order>` argument of `pdash move`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PanelMove {
    pub(crate) panel: String,
    pub(crate) position: Position,
}

/// Parses `news=0:2` into a [`PanelMove`].
pub(crate) fn parse_move(spec: &str) -> Result<PanelMove, String> {
    let (panel, position) = spec
        .split_once('=')
        .ok_or_else(|| format!("expected <panel>=<column>:<order>, got '{spec}'"))?;
    if panel.is_empty() {
        return Err(format!("missing panel name in '{spec}'"));
    }
    let (column, order) = position
        .split_once(':')
        .ok_or_else(|| format!("expected <column>:<order> after '=', got '{position}'"))?;
    let column: i32 = column
        .trim()
        .parse()
        .map_err(|e| format!("invalid column '{column}': {e}"))?;
    let order: i32 = order
        .trim()
        .parse()
        .map_err(|e| format!("invalid order '{order}': {e}"))?;
    Ok(PanelMove {
        panel: panel.to_string(),
        position: (column, order),
    })
}

/// Prints the stored layout of every enabled panel.
pub(crate) fn run_layout_command(
    ctx: &AppContext,
    columns: Option<ColumnsCount>,
) -> Result<(), AppError> {
    let columns = ctx.columns(columns)?;
    let store = ctx.store()?;
    let output = serde_json::json!({
        "columns_count": columns,
        "panels": store.get_all_layouts(columns),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Collapses (`collapsed = true`) or expands a panel.
pub(crate) fn run_collapse_command(
    ctx: &AppContext,
    panel: &str,
    columns: Option<ColumnsCount>,
    collapsed: bool,
) -> Result<(), AppError> {
    let columns = ctx.columns(columns)?;
    ctx.update(|store| store.set_collapsed(columns, panel, collapsed))?;
    let verb = if collapsed { "Collapsed" } else { "Expanded" };
    println!("{verb} {panel} at {columns} columns");
    Ok(())
}

/// Applies every move in one request. Nothing is saved if any move is rejected.
pub(crate) fn run_move_command(
    ctx: &AppContext,
    moves: &[PanelMove],
    columns: Option<ColumnsCount>,
) -> Result<(), AppError> {
    let columns = ctx.columns(columns)?;
    let ordering: BTreeMap<String, Position> = moves
        .iter()
        .map(|m| (m.panel.clone(), m.position))
        .collect();
    let moved = ctx.update(|store| {
        let (enabled, disabled): (Vec<&String>, Vec<&String>) =
            ordering.keys().partition(|name| store.has_panel(name));
        for name in disabled {
            tracing::warn!("{} is not enabled, not moving it", name);
        }
        store.reorder_panels(columns, &ordering)?;
        Ok(enabled.len())
    })?;
    println!("Moved {moved} panel(s) at {columns} columns");
    Ok(())
}

/// Prints the rendered grid and the panels it leaves out.
pub(crate) fn run_columns_command(
    ctx: &AppContext,
    columns: Option<ColumnsCount>,
) -> Result<(), AppError> {
    let columns = ctx.columns(columns)?;
    let store = ctx.store()?;
    let output = serde_json::json!({
        "columns_count": columns,
        "columns": store.get_columns(columns)?,
        "unpositioned": store.unpositioned_panels(columns),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
