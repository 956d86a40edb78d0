/// Split a document body (after frontmatter extraction) into raw slide
/// strings.
///
/// A slide break is a line holding only `---` with a blank line (or the
/// edge of the document) on both sides. A `---` hugging text is left alone
/// so it can still be used as a rule inside a slide.
pub fn split(body: &str) -> Vec<String> {
    let body = body.replace("\r\n", "\n");
    let lines: Vec<&str> = body.split('\n').collect();

    let mut slides = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if is_dash_separator(line.trim()) {
            let prev_blank = i == 0 || lines[i - 1].trim().is_empty();
            let next_blank = lines.get(i + 1).is_none_or(|l| l.trim().is_empty());
            if prev_blank && next_blank {
                slides.push(current.join("\n"));
                current.clear();
                continue;
            }
        }
        current.push(line);
    }
    slides.push(current.join("\n"));

    slides
        .into_iter()
        .map(|s| s.trim_matches('\n').to_string())
        .collect()
}

fn is_dash_separator(trimmed: &str) -> bool {
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_slide() {
        let slides = split("# Title\n\nSome text");
        assert_eq!(slides, vec!["# Title\n\nSome text".to_string()]);
    }

    #[test]
    fn test_dash_separator() {
        let slides = split("# One\n\n---\n\n# Two\n\n-----\n\n# Three");
        assert_eq!(slides.len(), 3);
        assert_eq!(slides[1], "# Two");
    }

    #[test]
    fn test_dash_without_blank_lines_is_content() {
        let slides = split("Some text\n---\nMore text");
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn test_separator_at_edges() {
        let slides = split("---\n\n# Only\n\n---");
        assert_eq!(slides.len(), 3);
        assert!(slides[0].is_empty());
        assert_eq!(slides[1], "# Only");
        assert!(slides[2].is_empty());
    }

    #[test]
    fn test_two_dashes_do_not_split() {
        let slides = split("a\n\n--\n\nb");
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn test_crlf() {
        let slides = split("# A\r\n\r\n---\r\n\r\n# B");
        assert_eq!(slides, vec!["# A".to_string(), "# B".to_string()]);
    }
}
