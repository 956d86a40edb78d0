use crate::error::DeckError;

/// An ordered, non-empty, immutable sequence of views.
#[derive(Debug, Clone)]
pub struct Deck<V> {
    views: Vec<V>,
}

impl<V> Deck<V> {
    pub fn new(views: Vec<V>) -> Result<Self, DeckError> {
        if views.is_empty() {
            return Err(DeckError::EmptyDeck);
        }
        Ok(Self { views })
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn get(&self, index: usize) -> Option<&V> {
        self.views.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &V> {
        self.views.iter()
    }

    pub fn last_index(&self) -> usize {
        self.views.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_deck_is_rejected() {
        let result = Deck::<&str>::new(vec![]);
        assert_eq!(result.unwrap_err(), DeckError::EmptyDeck);
    }

    #[test]
    fn single_view_deck() {
        let deck = Deck::new(vec!["only"]).unwrap();
        assert_eq!(deck.len(), 1);
        assert_eq!(deck.last_index(), 0);
        assert_eq!(deck.get(0), Some(&"only"));
        assert_eq!(deck.get(1), None);
    }

    #[test]
    fn iteration_keeps_order() {
        let deck = Deck::new(vec![1, 2, 3]).unwrap();
        let collected: Vec<_> = deck.iter().copied().collect();
        assert_eq!(collected, vec![1, 2, 3]);
    }
}
