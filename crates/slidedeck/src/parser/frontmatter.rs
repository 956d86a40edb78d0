use super::DeckMeta;
use crate::error::DeckError;

/// Split a leading `---` YAML block off the document.
///
/// Returns default metadata and the untouched body when the document does
/// not start with a frontmatter fence.
pub fn extract(content: &str) -> Result<(DeckMeta, String), DeckError> {
    let content = content.replace("\r\n", "\n");
    if !content.starts_with("---\n") {
        return Ok((DeckMeta::default(), content));
    }
    // Keep the newline after the opening fence so an empty block closes at 0.
    let rest = &content[3..];

    let (yaml, body) = match rest.find("\n---") {
        Some(end) => {
            let after = &rest[end + 4..];
            // The closing fence must be a line of its own.
            match after.chars().next() {
                None | Some('\n') => (&rest[..end], after.strip_prefix('\n').unwrap_or(after)),
                Some(_) => return Ok((DeckMeta::default(), content)),
            }
        }
        None => return Ok((DeckMeta::default(), content)),
    };

    if yaml.trim().is_empty() {
        return Ok((DeckMeta::default(), body.to_string()));
    }

    let meta: DeckMeta =
        serde_yaml::from_str(yaml).map_err(|e| DeckError::Frontmatter(e.to_string()))?;
    Ok((meta, body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_frontmatter() {
        let (meta, body) = extract("# Hello\n\nWorld").unwrap();
        assert!(meta.title.is_none());
        assert_eq!(body, "# Hello\n\nWorld");
    }

    #[test]
    fn reads_fields() {
        let doc =
            "---\ntitle: Talk\ntheme: light\nfooter: example.com\npassword: hunter2\n---\n# First";
        let (meta, body) = extract(doc).unwrap();
        assert_eq!(meta.title.as_deref(), Some("Talk"));
        assert_eq!(meta.theme.as_deref(), Some("light"));
        assert_eq!(meta.footer.as_deref(), Some("example.com"));
        assert_eq!(meta.password.as_deref(), Some("hunter2"));
        assert_eq!(body, "# First");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let (meta, _) = extract("---\ntitle: T\ntransition: fade\n---\nx").unwrap();
        assert_eq!(meta.title.as_deref(), Some("T"));
    }

    #[test]
    fn crlf_is_normalized() {
        let (meta, body) = extract("---\r\nauthor: Me\r\n---\r\nBody").unwrap();
        assert_eq!(meta.author.as_deref(), Some("Me"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn broken_yaml_is_reported() {
        let err = extract("---\ntitle: [unclosed\n---\nbody").unwrap_err();
        assert!(matches!(err, DeckError::Frontmatter(_)));
    }

    #[test]
    fn empty_block_is_stripped() {
        let (meta, body) = extract("---\n---\n# Body").unwrap();
        assert!(meta.title.is_none());
        assert_eq!(body, "# Body");
        let (_, body) = extract("---\n---").unwrap();
        assert_eq!(body, "");
    }

    #[test]
    fn unterminated_fence_is_body() {
        let (meta, body) = extract("---\n# Just a slide").unwrap();
        assert!(meta.title.is_none());
        assert_eq!(body, "---\n# Just a slide");
    }
}
