//! # Session State
//!
//! Holds the register's `PosState` and runs every change through
//! `barpos_core::apply`.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Dispatch                                     │
//! │                                                                         │
//! │  command ──► dispatch(action)                                           │
//! │                 │  lock                                                 │
//! │                 ▼                                                       │
//! │            apply(&state, action)                                        │
//! │                 │                                                       │
//! │         Ok(next)│            Err(e)                                     │
//! │                 ▼               ▼                                       │
//! │         *state = next      state untouched, error returned              │
//! │                 │  unlock                                               │
//! │                 ▼                                                       │
//! │         read the response from the new state                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use barpos_core::{apply, Action, CoreResult, PosState};
use tracing::{info, warn};

/// Shared, mutex-guarded session state.
///
/// Cloning shares the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    state: Arc<Mutex<PosState>>,
}

impl SessionState {
    pub fn new(initial: PosState) -> Self {
        SessionState {
            state: Arc::new(Mutex::new(initial)),
        }
    }

    /// A poisoned lock still holds a consistent state, since every change
    /// is a whole-value swap.
    fn lock(&self) -> MutexGuard<'_, PosState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Executes a function with read access to the state.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let count = session.with_state(|s| s.cart().item_count());
    /// ```
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&PosState) -> R,
    {
        let state = self.lock();
        f(&state)
    }

    /// Applies `action`, then reads a response from the resulting state.
    ///
    /// The state is replaced only when the action succeeds.
    pub fn dispatch<F, R>(&self, action: Action, read: F) -> CoreResult<R>
    where
        F: FnOnce(&PosState) -> R,
    {
        let name = action.name();
        let mut state = self.lock();

        match apply(&state, action) {
            Ok(next) => {
                *state = next;
                info!(action = name, "State updated");
                Ok(read(&state))
            }
            Err(err) => {
                warn!(action = name, error = %err, "Action rejected");
                Err(err)
            }
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> PosState {
        self.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barpos_core::CoreError;

    #[test]
    fn test_dispatch_swaps_state_on_success() {
        let session = SessionState::new(PosState::seeded());
        let beer = session.with_state(|s| s.catalog().find_by_name("Beer").unwrap().id.clone());

        let qty = session
            .dispatch(
                Action::AddToCart {
                    item_id: beer.clone(),
                },
                |s| s.cart().quantity_of(&beer),
            )
            .unwrap();

        assert_eq!(qty, Some(1));
        assert_eq!(session.with_state(|s| s.cart().total_quantity()), 1);
    }

    #[test]
    fn test_dispatch_keeps_state_on_error() {
        let session = SessionState::new(PosState::seeded());
        let before = session.snapshot();

        let err = session
            .dispatch(
                Action::AddToCart {
                    item_id: "missing".to_string(),
                },
                |_| (),
            )
            .unwrap_err();

        assert_eq!(err, CoreError::ItemNotFound("missing".to_string()));
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_clones_share_state() {
        let session = SessionState::new(PosState::seeded());
        let other = session.clone();
        let beer = session.with_state(|s| s.catalog().find_by_name("Beer").unwrap().id.clone());

        other
            .dispatch(Action::AddToCart { item_id: beer }, |_| ())
            .unwrap();

        assert!(!session.with_state(|s| s.cart().is_empty()));
    }
}
