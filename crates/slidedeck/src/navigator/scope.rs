//! Navigation capability handed to slide content.
//!
//! Content nested anywhere inside a slide can reach the navigator through
//! [`slide_navigation`] while the deck is painting it, without every layer
//! of rendering code threading a reference through.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::DeckError;

use super::Navigator;

/// What slide content may do with the deck.
pub trait SlideNavigation {
    fn go_to_slide(&self, index: usize);
    fn next(&self);
    fn previous(&self);
    fn current_slide(&self) -> usize;
    fn total_slides(&self) -> usize;
}

/// Shared handle to a navigator. Cloning is cheap.
#[derive(Clone)]
pub struct NavigationHandle {
    inner: Rc<RefCell<Navigator>>,
}

thread_local! {
    static SCOPE: RefCell<Vec<NavigationHandle>> = const { RefCell::new(Vec::new()) };
}

/// Pops the scope entry again, also when `f` unwinds.
struct ScopeGuard;

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        SCOPE.with(|s| {
            s.borrow_mut().pop();
        });
    }
}

impl NavigationHandle {
    pub fn new(navigator: Navigator) -> Self {
        Self {
            inner: Rc::new(RefCell::new(navigator)),
        }
    }

    /// Run `f` with this handle installed as the current navigator.
    pub fn provide<R>(&self, f: impl FnOnce() -> R) -> R {
        SCOPE.with(|s| s.borrow_mut().push(self.clone()));
        let _guard = ScopeGuard;
        f()
    }

    pub fn with<R>(&self, f: impl FnOnce(&Navigator) -> R) -> R {
        f(&self.inner.borrow())
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Navigator) -> R) -> R {
        f(&mut self.inner.borrow_mut())
    }
}

impl SlideNavigation for NavigationHandle {
    fn go_to_slide(&self, index: usize) {
        self.inner.borrow_mut().go_to_slide(index);
    }

    fn next(&self) {
        self.inner.borrow_mut().next();
    }

    fn previous(&self) {
        self.inner.borrow_mut().previous();
    }

    fn current_slide(&self) -> usize {
        self.inner.borrow().current_slide()
    }

    fn total_slides(&self) -> usize {
        self.inner.borrow().total_slides()
    }
}

/// The innermost navigator in scope, or [`DeckError::NoNavigator`] when
/// called from outside any deck.
pub fn slide_navigation() -> Result<NavigationHandle, DeckError> {
    SCOPE.with(|s| s.borrow().last().cloned().ok_or(DeckError::NoNavigator))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(total: usize) -> NavigationHandle {
        NavigationHandle::new(Navigator::new(total).unwrap())
    }

    #[test]
    fn missing_scope_fails_immediately() {
        assert_eq!(slide_navigation().err(), Some(DeckError::NoNavigator));
    }

    #[test]
    fn nested_content_can_jump() {
        let deck = handle(10);
        deck.provide(|| -> Result<(), DeckError> {
            let nav = slide_navigation()?;
            assert_eq!(nav.total_slides(), 10);
            nav.go_to_slide(8);
            Ok(())
        })
        .unwrap();
        assert_eq!(deck.current_slide(), 8);
        assert!(slide_navigation().is_err());
    }

    #[test]
    fn out_of_range_jump_from_content_is_ignored() {
        let deck = handle(3);
        deck.provide(|| slide_navigation().map(|nav| nav.go_to_slide(12)))
            .unwrap();
        assert_eq!(deck.current_slide(), 0);
    }

    #[test]
    fn innermost_scope_wins() {
        let outer = handle(2);
        let inner = handle(7);
        outer.provide(|| {
            inner.provide(|| {
                assert_eq!(slide_navigation().unwrap().total_slides(), 7);
            });
            assert_eq!(slide_navigation().unwrap().total_slides(), 2);
        });
    }

    #[test]
    fn scope_is_restored_after_panic() {
        let deck = handle(2);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            deck.provide(|| panic!("content blew up"));
        }));
        assert!(result.is_err());
        assert!(slide_navigation().is_err());
    }
}
