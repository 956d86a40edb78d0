use anyhow::Result;
use colored::Colorize;
use std::path::Path;

use crate::parser::{self, Block, Presentation};

pub fn run(file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)?;
    let presentation =
        parser::parse(&content).map_err(|e| anyhow::anyhow!("{}: {e}", file.display()))?;

    if let Some(title) = &presentation.meta.title {
        println!("{}", title.bold());
        if let Some(author) = &presentation.meta.author {
            println!("{}", author.dimmed());
        }
        println!();
    }
    for line in outline_lines(&presentation) {
        println!("{line}");
    }
    if presentation.meta.password.is_some() {
        println!();
        println!("{}", "Password protected".yellow());
    }
    Ok(())
}

/// One line per slide: 1-based number, title, and any jump-link targets.
pub fn outline_lines(presentation: &Presentation) -> Vec<String> {
    let total = presentation.deck.len();
    let width = total.to_string().len();
    presentation
        .deck
        .iter()
        .enumerate()
        .map(|(i, slide)| {
            let title = slide.title().unwrap_or_else(|| "(untitled)".to_string());
            let targets: Vec<String> = slide
                .blocks
                .iter()
                .filter_map(|b| match b {
                    Block::JumpLink { target, .. } => Some(target.to_string()),
                    _ => None,
                })
                .collect();
            let mut line = format!("{:>width$}  {}", i + 1, title);
            if !targets.is_empty() {
                line.push_str(&format!("  -> {}", targets.join(", ")));
            }
            line
        })
        .collect()
}
