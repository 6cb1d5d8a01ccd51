use std::fmt;
use std::io::Write;

use anyhow::{anyhow, Result};

use crate::cli::{AddArgs, CliCommand, IdArgs, ListArgs};
use crate::config::AppConfig;
use crate::core::commands as core_commands;
use crate::model::{ClearOutcome, FilterMode, Task};

pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, mut writer: W) -> Result<()> {
    match command {
        CliCommand::List(args) => handle_list(config, &args, &mut writer),
        CliCommand::Add(args) => handle_add(config, &args, &mut writer),
        CliCommand::Toggle(args) => handle_toggle(config, &args, &mut writer),
        CliCommand::Delete(args) => handle_delete(config, &args, &mut writer),
        CliCommand::ClearCompleted => handle_clear(config, &mut writer),
        CliCommand::Tui(_) | CliCommand::Serve(_) => {
            Err(anyhow!("launch interactive surfaces directly"))
        }
    }
}

fn handle_list<W: Write>(config: &AppConfig, args: &ListArgs, mut writer: W) -> Result<()> {
    let view = core_commands::list_tasks(config, args.filter)?;
    if view.subset.is_empty() {
        writeln!(writer, "{}", empty_message(args.filter))?;
    }
    for task in &view.subset {
        writeln!(writer, "{}", TaskLine(task))?;
    }
    writeln!(writer, "{}", args.filter.count_label(view.count))?;
    Ok(())
}

fn handle_add<W: Write>(config: &AppConfig, args: &AddArgs, mut writer: W) -> Result<()> {
    let task = core_commands::add_task(config, &args.joined())?;
    writeln!(writer, "Added {}", TaskLine(&task))?;
    Ok(())
}

fn handle_toggle<W: Write>(config: &AppConfig, args: &IdArgs, mut writer: W) -> Result<()> {
    let outcome = core_commands::toggle_task(config, args.id)?;
    let state = if outcome.completed {
        "completed"
    } else {
        "active"
    };
    writeln!(writer, "Task {} is now {}", outcome.id, state)?;
    Ok(())
}

fn handle_delete<W: Write>(config: &AppConfig, args: &IdArgs, mut writer: W) -> Result<()> {
    let remaining = core_commands::delete_task(config, args.id)?;
    writeln!(
        writer,
        "Deleted task {} ({} remaining)",
        args.id, remaining
    )?;
    Ok(())
}

fn handle_clear<W: Write>(config: &AppConfig, mut writer: W) -> Result<()> {
    let outcome = core_commands::clear_completed(config)?;
    writeln!(writer, "{}", ClearSummary(&outcome))?;
    Ok(())
}

fn empty_message(filter: FilterMode) -> &'static str {
    match filter {
        FilterMode::All => "No tasks yet",
        FilterMode::Active => "Nothing left to do",
        FilterMode::Completed => "Nothing completed yet",
    }
}

struct TaskLine<'a>(&'a Task);

impl fmt::Display for TaskLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.0.completed { 'x' } else { ' ' };
        write!(f, "[{}] {:>3}  {}", mark, self.0.id, self.0.text)
    }
}

struct ClearSummary<'a>(&'a ClearOutcome);

impl fmt::Display for ClearSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.removed {
            0 => write!(f, "No completed tasks to clear"),
            count => write!(
                f,
                "Cleared {} completed task{} ({} remaining)",
                count,
                if count == 1 { "" } else { "s" },
                self.0.remaining
            ),
        }
    }
}
