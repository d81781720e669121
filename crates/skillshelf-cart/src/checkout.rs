//! Checkout flow state machine.
//!
//! `Idle -> Processing -> Complete`, entered only with a non-empty cart. An
//! empty cart is a distinct terminal display, not a transition target: the
//! page layer renders it directly and never constructs a flow for it.

use thiserror::Error;

use crate::CartState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutPhase {
    #[default]
    Idle,
    Processing,
    Complete,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("checkout already {0:?}")]
    InvalidTransition(CheckoutPhase),
}

/// One checkout session. `Complete` is terminal; a new non-empty cart starts
/// a fresh flow at `Idle`.
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    phase: CheckoutPhase,
}

impl CheckoutFlow {
    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// Enter `Processing`. Requires a non-empty cart and an `Idle` flow.
    pub fn begin(&mut self, cart: &CartState) -> Result<(), CheckoutError> {
        if self.phase != CheckoutPhase::Idle {
            return Err(CheckoutError::InvalidTransition(self.phase));
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.phase = CheckoutPhase::Processing;
        Ok(())
    }

    /// Payment captured and entitlements granted: move to `Complete`.
    pub fn complete(&mut self) -> Result<(), CheckoutError> {
        if self.phase != CheckoutPhase::Processing {
            return Err(CheckoutError::InvalidTransition(self.phase));
        }
        self.phase = CheckoutPhase::Complete;
        Ok(())
    }

    /// Payment failed mid-flow: roll back to `Idle` so the visitor can retry
    /// with the cart intact.
    pub fn fail(&mut self) -> Result<(), CheckoutError> {
        if self.phase != CheckoutPhase::Processing {
            return Err(CheckoutError::InvalidTransition(self.phase));
        }
        self.phase = CheckoutPhase::Idle;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CartAction, reduce};

    fn non_empty_cart() -> CartState {
        reduce(CartState::default(), CartAction::AddItem("a".into()))
    }

    #[test]
    fn happy_path_runs_idle_processing_complete() {
        let mut flow = CheckoutFlow::default();
        assert_eq!(flow.phase(), CheckoutPhase::Idle);
        flow.begin(&non_empty_cart()).unwrap();
        assert_eq!(flow.phase(), CheckoutPhase::Processing);
        flow.complete().unwrap();
        assert_eq!(flow.phase(), CheckoutPhase::Complete);
    }

    #[test]
    fn cannot_begin_with_empty_cart() {
        let mut flow = CheckoutFlow::default();
        assert_eq!(
            flow.begin(&CartState::default()),
            Err(CheckoutError::EmptyCart)
        );
        assert_eq!(flow.phase(), CheckoutPhase::Idle);
    }

    #[test]
    fn complete_is_terminal() {
        let mut flow = CheckoutFlow::default();
        flow.begin(&non_empty_cart()).unwrap();
        flow.complete().unwrap();
        assert!(flow.begin(&non_empty_cart()).is_err());
        assert!(flow.complete().is_err());
    }

    #[test]
    fn failure_rolls_back_to_idle() {
        let mut flow = CheckoutFlow::default();
        let cart = non_empty_cart();
        flow.begin(&cart).unwrap();
        flow.fail().unwrap();
        assert_eq!(flow.phase(), CheckoutPhase::Idle);
        // Retry works.
        flow.begin(&cart).unwrap();
        flow.complete().unwrap();
    }
}
