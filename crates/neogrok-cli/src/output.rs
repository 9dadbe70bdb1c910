//! Terminal rendering of results and repository lists.

use colored::Colorize;
use neogrok_core::render::{FileOutcome, LineGroup, RenderedFile, RenderedResults};
use neogrok_core::repos::{format_bytes, trim_fractional_seconds, RepoList};
use neogrok_core::{LineToken, TokenKind};

pub fn print_results(results: &RenderedResults) {
    println!("{}", results.summary.backend_line().dimmed());
    println!("{}", results.summary.frontend_line().dimmed());

    for outcome in &results.files {
        println!();
        match outcome {
            FileOutcome::Rendered(file) => print_file(file),
            FileOutcome::Failed {
                rank,
                repository,
                file_name,
                error,
            } => {
                println!("{} {}", repository.cyan(), file_name.bold());
                println!("  {} {}", format!("№{rank} failed:").red().bold(), error.red());
            }
        }
    }
}

fn tokens_to_string(tokens: &[LineToken]) -> String {
    tokens
        .iter()
        .map(|t| match t.kind {
            TokenKind::Match => t.text.yellow().bold().to_string(),
            TokenKind::Context => t.text.clone(),
        })
        .collect()
}

fn print_file(file: &RenderedFile) {
    let name = match &file.file_name_tokens {
        Some(tokens) => tokens_to_string(tokens),
        None => file.file_name.bold().to_string(),
    };
    println!("{} {}", file.repository.cyan(), name);
    println!("  {}", file.metadata.join(" | ").dimmed());
    if let Some(url) = &file.file_url {
        println!("  {}", url.blue().underline());
    }

    let width = file
        .groups
        .last()
        .map_or(1, |g| g.last_line_number().to_string().len());
    for (i, group) in file.groups.iter().enumerate() {
        if i > 0 {
            println!("  {}", "⋯".dimmed());
        }
        print_group(group, width);
    }

    if let Some(label) = file.affordance.label() {
        println!("  {}", label.italic().dimmed());
    }
}

fn print_group(group: &LineGroup, width: usize) {
    for line in group.lines() {
        let number = format!("{:>width$}", line.line_number);
        let gutter = if line.tokens.iter().any(LineToken::is_match) {
            number.yellow().to_string()
        } else {
            number.dimmed().to_string()
        };
        println!("  {} {}", gutter, tokens_to_string(&line.tokens));
    }
}

pub fn print_repositories(repos: &RepoList) {
    println!("{}", repos.summary().dimmed());
    for entry in repos.sorted() {
        let repo = &entry.repository;
        println!();
        println!("{} {}", repo.name.bold(), format!("№{}", repo.rank).dimmed());
        if !repo.branches.is_empty() {
            println!("  branches: {}", entry.branch_summary());
        }
        println!(
            "  {} files, {} lines, {}",
            entry.stats.file_count,
            entry.stats.lines,
            format_bytes(entry.stats.content_bytes + entry.stats.index_bytes)
        );
        println!(
            "  last commit {} | indexed {}",
            trim_fractional_seconds(&repo.last_commit),
            trim_fractional_seconds(&entry.index_metadata.last_indexed)
        );
        if !repo.url.is_empty() {
            println!("  {}", repo.url.blue().underline());
        }
    }
}
