use colored::Colorize;
use spritestate::api::{CmdMessage, CmdResult, IncompatibleReport, ItemCheck, MessageLevel};
use spritestate::config::SpriteConfig;
use spritestate::error::Result;
use std::path::Path;

const GROUP_WIDTH: usize = 14;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

pub(super) fn print_state(result: &CmdResult) {
    if let Some(body_type) = result.body_type {
        println!(
            "{:<width$}{}",
            "body type",
            body_type.to_string().bold(),
            width = GROUP_WIDTH
        );
    }

    let Some(selections) = &result.selections else {
        return;
    };
    if selections.is_empty() {
        println!("Nothing selected.");
        return;
    }

    for (group, selection) in selections {
        let label = format!("{:<width$}", group, width = GROUP_WIDTH);
        println!(
            "{}{} {}",
            label.yellow(),
            selection.name,
            format!("[{}]", selection.item_id).dimmed()
        );
    }
}

pub(super) fn print_hash(result: &CmdResult) {
    if let Some(hash) = &result.hash {
        println!("#{}", hash);
    }
}

fn verdict(ok: bool) -> colored::ColoredString {
    if ok {
        "ok".green()
    } else {
        "incompatible".red()
    }
}

pub(super) fn print_checks(checks: &[ItemCheck]) {
    for check in checks {
        if !check.known {
            println!("{} {}", check.item_id.bold(), "unknown item".red());
            continue;
        }
        println!(
            "{}  license: {}  animation: {}",
            check.item_id.bold(),
            verdict(check.license_ok),
            verdict(check.animation_ok)
        );
    }
}

pub(super) fn print_incompatible(reports: &[IncompatibleReport]) {
    for report in reports {
        for group in &report.groups {
            println!("  {} {}", group.yellow(), format!("({})", report.kind).dimmed());
        }
    }
}

pub(super) fn print_config(config: &SpriteConfig, dir: &Path) -> Result<()> {
    println!("{}", format!("# {}", dir.display()).dimmed());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
