use std::sync::LazyLock;

use regex::Regex;

use super::{Block, Inline, LinkTarget};

static JUMP_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([^\]]+)\]\(#([1-9][0-9]*|next|prev)\)\s*(.*)$").expect("jump link pattern")
});
static STRONG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("strong pattern"));
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,3})\s+(.+)$").expect("heading pattern"));

/// Parse the text of one slide into blocks.
pub fn parse(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut list: Vec<Vec<Inline>> = Vec::new();
    let mut quote: Vec<&str> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();

        if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            flush_paragraph(&mut paragraph, &mut blocks);
            flush_quote(&mut quote, &mut blocks);
            list.push(parse_inlines(item.trim()));
            continue;
        }
        flush_list(&mut list, &mut blocks);

        if let Some(q) = trimmed.strip_prefix('>') {
            flush_paragraph(&mut paragraph, &mut blocks);
            quote.push(q.trim());
            continue;
        }
        flush_quote(&mut quote, &mut blocks);

        if trimmed.is_empty() {
            flush_paragraph(&mut paragraph, &mut blocks);
            continue;
        }

        if let Some(kicker) = trimmed.strip_prefix("@kicker:") {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(Block::Kicker(kicker.trim().to_string()));
            continue;
        }

        if let Some(caps) = HEADING.captures(trimmed) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(Block::Heading {
                level: caps[1].len() as u8,
                inlines: parse_inlines(caps[2].trim()),
            });
            continue;
        }

        if let Some(link) = parse_jump_link(trimmed) {
            flush_paragraph(&mut paragraph, &mut blocks);
            blocks.push(link);
            continue;
        }

        paragraph.push(trimmed);
    }

    flush_paragraph(&mut paragraph, &mut blocks);
    flush_list(&mut list, &mut blocks);
    flush_quote(&mut quote, &mut blocks);
    blocks
}

fn parse_jump_link(line: &str) -> Option<Block> {
    let caps = JUMP_LINK.captures(line)?;
    let target = match &caps[2] {
        "next" => LinkTarget::Next,
        "prev" => LinkTarget::Previous,
        // Slide numbers in the source are 1-based.
        n => LinkTarget::Slide(n.parse::<usize>().ok()?.checked_sub(1)?),
    };
    let detail = caps[3].trim();
    Some(Block::JumpLink {
        label: caps[1].trim().to_string(),
        detail: (!detail.is_empty()).then(|| detail.to_string()),
        target,
    })
}

/// Split `**strong**` spans out of plain text.
pub fn parse_inlines(text: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut last = 0;
    for caps in STRONG.captures_iter(text) {
        let Some(m) = caps.get(0) else { continue };
        if m.start() > last {
            inlines.push(Inline::Text(text[last..m.start()].to_string()));
        }
        inlines.push(Inline::Strong(caps[1].to_string()));
        last = m.end();
    }
    if last < text.len() {
        inlines.push(Inline::Text(text[last..].to_string()));
    }
    inlines
}

fn flush_paragraph(lines: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if !lines.is_empty() {
        blocks.push(Block::Paragraph {
            inlines: parse_inlines(&lines.join(" ")),
        });
        lines.clear();
    }
}

fn flush_list(items: &mut Vec<Vec<Inline>>, blocks: &mut Vec<Block>) {
    if !items.is_empty() {
        blocks.push(Block::List {
            items: std::mem::take(items),
        });
    }
}

fn flush_quote(lines: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if !lines.is_empty() {
        blocks.push(Block::Quote {
            inlines: parse_inlines(&lines.join(" ")),
        });
        lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn headings_and_paragraphs() {
        let blocks = parse("# Title\n\nfirst line\nsecond line\n\n### Small");
        assert_eq!(blocks.len(), 3);
        assert_eq!(
            blocks[0],
            Block::Heading {
                level: 1,
                inlines: vec![text("Title")]
            }
        );
        assert_eq!(
            blocks[1],
            Block::Paragraph {
                inlines: vec![text("first line second line")]
            }
        );
        assert!(matches!(blocks[2], Block::Heading { level: 3, .. }));
    }

    #[test]
    fn four_hashes_is_a_paragraph() {
        let blocks = parse("#### too deep");
        assert!(matches!(blocks[0], Block::Paragraph { .. }));
    }

    #[test]
    fn lists_and_quotes() {
        let blocks = parse("- one\n* two\n> wise\n> words\n\nafter");
        assert_eq!(blocks.len(), 3);
        let Block::List { items } = &blocks[0] else {
            panic!("expected list, got {:?}", blocks[0]);
        };
        assert_eq!(items.len(), 2);
        assert_eq!(
            blocks[1],
            Block::Quote {
                inlines: vec![text("wise words")]
            }
        );
    }

    #[test]
    fn kicker_line() {
        let blocks = parse("@kicker: Case Study 1\n## Heading");
        assert_eq!(blocks[0], Block::Kicker("Case Study 1".to_string()));
    }

    #[test]
    fn jump_links() {
        let blocks = parse("[Revisit](#3) Proven results\n[Top](#1)");
        assert_eq!(
            blocks[0],
            Block::JumpLink {
                label: "Revisit".to_string(),
                detail: Some("Proven results".to_string()),
                target: LinkTarget::Slide(2),
            }
        );
        assert_eq!(
            blocks[1],
            Block::JumpLink {
                label: "Top".to_string(),
                detail: None,
                target: LinkTarget::Slide(0),
            }
        );
    }

    #[test]
    fn slide_zero_link_is_plain_text() {
        let blocks = parse("[Nowhere](#0)");
        assert!(matches!(blocks[0], Block::Paragraph { .. }));
    }

    #[test]
    fn out_of_range_link_is_kept() {
        let blocks = parse("[Far away](#99)");
        assert!(matches!(
            blocks[0],
            Block::JumpLink {
                target: LinkTarget::Slide(98),
                ..
            }
        ));
    }

    #[test]
    fn relative_links() {
        let blocks = parse("[Onward](#next)\n[Back](#prev) Where we were\n[Huh](#later)");
        assert!(matches!(
            blocks[0],
            Block::JumpLink {
                target: LinkTarget::Next,
                ..
            }
        ));
        assert!(matches!(
            blocks[1],
            Block::JumpLink {
                target: LinkTarget::Previous,
                ..
            }
        ));
        assert!(matches!(blocks[2], Block::Paragraph { .. }));
    }

    #[test]
    fn strong_spans() {
        let inlines = parse_inlines("The **reality:** nobody used it");
        assert_eq!(
            inlines,
            vec![
                text("The "),
                Inline::Strong("reality:".to_string()),
                text(" nobody used it"),
            ]
        );
        assert_eq!(parse_inlines("**all**"), vec![Inline::Strong("all".to_string())]);
    }
}
