//! Panel selection commands.
//!
//! - `panels` - List every registered panel with its enabled and locked state
//! - `enable` - Replace the enabled set, checked through the selection form
//! - `reset` - Enable every registered panel

use panel_dashboard::{AppContext, AppError};
use panel_layout::{PanelRegistry, PanelSelectionForm};
use std::collections::BTreeMap;

/// Prints the selection form as one line per panel.
pub(crate) fn run_panels_command(ctx: &AppContext) -> Result<(), AppError> {
    let store = ctx.store()?;
    let form = PanelSelectionForm::build(&ctx.registry, store.panels());
    print!("{}", render_panel_list(&form));
    Ok(())
}

/// Enables exactly `names`, disabling every other panel.
pub(crate) fn run_enable_command(ctx: &AppContext, names: &[String]) -> Result<(), AppError> {
    let submitted = submitted_selection(&ctx.registry, names);
    let enabled = ctx.update(|store| {
        let selection = PanelSelectionForm::clean(store.registry(), &submitted)?;
        store.set_panels(selection.iter().cloned());
        Ok(selection)
    })?;
    let enabled: Vec<&str> = enabled.iter().map(String::as_str).collect();
    println!("Enabled panels: {}", enabled.join(", "));
    Ok(())
}

/// Enables every registered panel. Layouts of already enabled panels survive.
pub(crate) fn run_reset_command(ctx: &AppContext) -> Result<(), AppError> {
    let count = ctx.update(|store| {
        let names = store.registry().get_all_panel_names();
        let count = names.len();
        store.set_panels(names);
        Ok(count)
    })?;
    println!("Enabled all {count} panels");
    Ok(())
}

/// Form submission with every registered panel off except `names`.
///
/// Names the registry does not know are submitted as enabled so the form
/// reports and drops them.
fn submitted_selection(registry: &PanelRegistry, names: &[String]) -> BTreeMap<String, bool> {
    let mut submitted: BTreeMap<String, bool> = registry
        .get_all_panel_names()
        .into_iter()
        .map(|name| (name, false))
        .collect();
    for name in names {
        submitted.insert(name.clone(), true);
    }
    submitted
}

fn render_panel_list(form: &PanelSelectionForm) -> String {
    let width = form
        .fields
        .iter()
        .map(|field| field.name.len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for field in &form.fields {
        let mark = if field.enabled { 'x' } else { ' ' };
        out.push_str(&format!("[{mark}] {:<width$}  {}", field.name, field.title));
        if field.is_locked() {
            out.push_str(&format!("  (required by {})", field.locked_by.join(", ")));
        }
        out.push('\n');
    }
    out
}
