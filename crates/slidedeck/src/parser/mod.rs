pub mod blocks;
pub mod frontmatter;
pub mod splitter;

use std::fmt;

use serde::Deserialize;

use crate::deck::Deck;
use crate::error::DeckError;

#[derive(Debug, Clone)]
pub struct Presentation {
    pub meta: DeckMeta,
    pub deck: Deck<Slide>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeckMeta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub footer: Option<String>,
    /// When set, the deck is locked behind a password prompt.
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Slide {
    pub blocks: Vec<Block>,
}

impl Slide {
    /// Text of the first heading, used for outlines and window titles.
    pub fn title(&self) -> Option<String> {
        self.blocks.iter().find_map(|b| match b {
            Block::Heading { inlines, .. } => Some(inlines_to_text(inlines)),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Small caption shown above the heading.
    Kicker(String),
    Heading {
        level: u8,
        inlines: Vec<Inline>,
    },
    Paragraph {
        inlines: Vec<Inline>,
    },
    List {
        items: Vec<Vec<Inline>>,
    },
    Quote {
        inlines: Vec<Inline>,
    },
    /// A button that jumps to another slide of the same deck.
    JumpLink {
        label: String,
        detail: Option<String>,
        target: LinkTarget,
    },
}

/// Where a jump link leads: `#3`, `#next` or `#prev` in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    Slide(usize),
    Next,
    Previous,
}

impl LinkTarget {
    /// The slide a click would land on, or `None` when it leads nowhere.
    pub fn resolve(self, current: usize, total: usize) -> Option<usize> {
        match self {
            Self::Slide(index) => (index < total).then_some(index),
            Self::Next => (current + 1 < total).then_some(current + 1),
            Self::Previous => current.checked_sub(1),
        }
    }
}

impl fmt::Display for LinkTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Slide(index) => write!(f, "#{}", index + 1),
            Self::Next => f.write_str("#next"),
            Self::Previous => f.write_str("#prev"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Strong(String),
}

pub fn parse(content: &str) -> Result<Presentation, DeckError> {
    let (meta, body) = frontmatter::extract(content)?;
    let slides: Vec<Slide> = splitter::split(&body)
        .into_iter()
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| Slide {
            blocks: blocks::parse(&raw),
        })
        .collect();
    let deck = Deck::new(slides)?;
    Ok(Presentation { meta, deck })
}

pub fn inlines_to_text(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|i| match i {
            Inline::Text(s) | Inline::Strong(s) => s.as_str(),
        })
        .collect()
}
