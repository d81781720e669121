//! Payment capture behind a trait.
//!
//! The shipped gateway simulates capture with a fixed delay and cannot fail.
//! Commands charge the gateway before emitting any event, so a gateway error
//! leaves no entitlements behind and the caller keeps the cart intact.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;
use ulid::Ulid;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("payment declined: {0}")]
    Declined(String),
    #[error("payment provider unavailable: {0}")]
    Unavailable(String),
}

/// Proof of capture.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub reference: String,
    pub amount: u64,
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Capture `amount` minor currency units for `user_id`.
    async fn charge(&self, user_id: &str, amount: u64) -> Result<PaymentReceipt, PaymentError>;
}

/// Simulated capture: waits a fixed delay, then succeeds.
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedGateway {
    fn default() -> Self {
        // Matches the visible "processing" pause of the reference checkout.
        Self::new(Duration::from_millis(1500))
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, user_id: &str, amount: u64) -> Result<PaymentReceipt, PaymentError> {
        tokio::time::sleep(self.delay).await;

        let receipt = PaymentReceipt {
            reference: Ulid::new().to_string(),
            amount,
        };

        info!(
            user_id = %user_id,
            amount,
            reference = %receipt.reference,
            "Simulated payment captured"
        );

        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn simulated_gateway_always_captures() {
        let gateway = SimulatedGateway::new(Duration::from_millis(1));
        let receipt = gateway.charge("u1", 9000).await.unwrap();
        assert_eq!(receipt.amount, 9000);
        assert!(!receipt.reference.is_empty());
    }
}
