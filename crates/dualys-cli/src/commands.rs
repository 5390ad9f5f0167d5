use anyhow::Context;
use colored::Colorize;

use dualys_diff::StateChange;
use dualys_exec::ExecutionOutcome;
use dualys_merge::BaseComparison;
use dualys_types::VfsPath;

use crate::cli::*;
use crate::config::DualysConfig;
use crate::scenario::{run_demo, DemoReport};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = DualysConfig::load_or_default(cli.config.as_deref())?;
    match cli.command {
        Command::Demo(args) => cmd_demo(args, config, &cli.format),
        Command::Config => cmd_config(&config, &cli.format),
    }
}

fn cmd_demo(args: DemoArgs, mut config: DualysConfig, format: &OutputFormat) -> anyhow::Result<()> {
    if let Some(entry_point) = args.entry_point {
        config.wasm.entry_point = VfsPath::new(entry_point)?;
    }
    if args.merge_by_state {
        config.merge.base_comparison = BaseComparison::MaterializedState;
    }

    let module = args
        .wasm_module
        .as_deref()
        .map(|path| {
            std::fs::read(path).with_context(|| format!("reading module {}", path.display()))
        })
        .transpose()?;

    let report = run_demo(&config, module.as_deref())?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_report(&report),
    }
    Ok(())
}

fn print_report(report: &DemoReport) {
    for (id, plan) in &report.plans {
        let ancestry: Vec<_> = plan.ancestry.iter().map(|id| id.as_str()).collect();
        println!(
            "{} {} ({} layers, {} files)",
            "plan".bold(),
            id.to_string().yellow(),
            plan.layers,
            plan.state.len()
        );
        println!("  {}", ancestry.join(" -> ").dimmed());
        for (path, content) in &plan.state {
            println!("  {}  {}", content.short().dimmed(), path);
        }
    }

    println!("\n{}", "web-server -> web-server-test".bold());
    if report.branch_diff.is_empty() {
        println!("  No changes.");
    }
    for change in &report.branch_diff.changes {
        match change {
            StateChange::Added { path, content } => {
                println!("  {} {} ({})", "+".green(), path, content.short())
            }
            StateChange::Removed { path, .. } => println!("  {} {}", "-".red(), path),
            StateChange::Modified { path, old, new } => println!(
                "  {} {} ({} -> {})",
                "~".yellow(),
                path,
                old.short(),
                new.short()
            ),
        }
    }

    println!();
    match &report.merge_error {
        None => println!("{} Merged web-server and database into full-stack", "✓".green().bold()),
        Some(err) => println!("{} Merge failed: {}", "✗".red().bold(), err),
    }

    match &report.execution {
        ExecutionOutcome::Completed {
            plan,
            entry_point,
            content,
        } => println!(
            "{} Executed {} in {} ({})",
            "✓".green().bold(),
            entry_point,
            plan.to_string().yellow(),
            content.short()
        ),
        ExecutionOutcome::EntryPointMissing { plan, entry_point } => println!(
            "{} Entry point {} not found in {}",
            "✗".red().bold(),
            entry_point,
            plan.to_string().yellow()
        ),
        ExecutionOutcome::Inspected { plan, entries } => println!(
            "{} Inspected {} ({} files)",
            "✓".green().bold(),
            plan.to_string().yellow(),
            entries
        ),
    }
}

fn cmd_config(config: &DualysConfig, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Text => print!("{}", config.to_toml()?),
    }
    Ok(())
}
