//! Implementation of the `promptsmith strategies` command.

use super::output_error;
use crate::error::Result;
use crate::strategy::{ReasoningStrategy, StrategySelection};
use std::io::Write;

/// Execute the `promptsmith strategies` command.
pub fn cmd_strategies() -> Result<()> {
    let mut out = std::io::stdout().lock();
    write_strategies(&mut out, &StrategySelection::new(), false)
}

/// List every strategy, optionally with a selection marker.
pub(crate) fn write_strategies<W: Write>(
    out: &mut W,
    selection: &StrategySelection,
    show_selection: bool,
) -> Result<()> {
    for strategy in ReasoningStrategy::ALL {
        let marker = match (show_selection, selection.contains(strategy)) {
            (false, _) => "",
            (true, true) => "[x] ",
            (true, false) => "[ ] ",
        };
        let indent = " ".repeat(marker.len() + 18);
        writeln!(
            out,
            "{}{:<18}{}",
            marker,
            strategy.cli_name(),
            strategy.display_name()
        )
        .and_then(|()| writeln!(out, "{}{}", indent, strategy.description()))
        .map_err(output_error)?;
    }
    Ok(())
}
