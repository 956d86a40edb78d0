/// Errors raised while building or wiring a deck.
///
/// User input at the edges of a deck (stepping past the last slide, jumping
/// to an index that does not exist) is never an error; those requests are
/// absorbed by the navigator. Only structural mistakes end up here.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DeckError {
    /// A deck must contain at least one slide.
    #[error("deck has no slides")]
    EmptyDeck,

    /// Slide content asked for navigation outside of a navigator scope.
    #[error("slide navigation used outside of a navigator scope")]
    NoNavigator,

    /// The YAML frontmatter block could not be read.
    #[error("invalid frontmatter: {0}")]
    Frontmatter(String),
}
