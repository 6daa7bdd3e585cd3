//! Mint submission lifecycle.
//!
//! The wallet reports progress as [`WalletEvent`]s; [`MintSubmission`]
//! folds them into a [`MintState`]. There is no retry: a failure is shown
//! and the user submits again.

use crate::contract::{ContractWriter, MintCall, TxHash};
use crate::error::TransactionError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MintState {
    #[default]
    Idle,
    /// Handed to the wallet, no hash yet.
    Pending,
    /// Hash known, waiting for inclusion.
    Confirming { tx: TxHash },
    Success { tx: TxHash },
    Failed { error: TransactionError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    Submitted,
    HashReceived(TxHash),
    Confirmed,
    Rejected(String),
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct MintSubmission {
    state: MintState,
}

impl MintSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MintState {
        &self.state
    }

    /// The submit control is enabled unless a transaction is in flight.
    pub fn can_submit(&self) -> bool {
        !self.is_busy()
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, MintState::Pending | MintState::Confirming { .. })
    }

    /// Apply a wallet event. Events that make no sense in the current
    /// state are dropped.
    pub fn handle(&mut self, event: WalletEvent) -> &MintState {
        let next = match (&self.state, event) {
            (
                MintState::Idle | MintState::Success { .. } | MintState::Failed { .. },
                WalletEvent::Submitted,
            ) => Some(MintState::Pending),
            (MintState::Pending, WalletEvent::HashReceived(tx)) => {
                Some(MintState::Confirming { tx })
            }
            (MintState::Confirming { tx }, WalletEvent::Confirmed) => {
                Some(MintState::Success { tx: *tx })
            }
            (MintState::Pending | MintState::Confirming { .. }, WalletEvent::Rejected(msg)) => {
                Some(MintState::Failed {
                    error: TransactionError::Rejected(msg),
                })
            }
            (MintState::Pending | MintState::Confirming { .. }, WalletEvent::Failed(msg)) => {
                Some(MintState::Failed {
                    error: TransactionError::Failed(msg),
                })
            }
            (state, event) => {
                tracing::debug!(?state, ?event, "ignoring wallet event");
                None
            }
        };
        if let Some(next) = next {
            tracing::debug!(from = ?self.state, to = ?next, "mint state change");
            self.state = next;
        }
        &self.state
    }

    /// Clear a finished submission back to `Idle`.
    pub fn reset(&mut self) {
        if !self.is_busy() {
            self.state = MintState::Idle;
        }
    }

    /// Label for the submit button.
    pub fn button_label(&self, idle_label: &'static str) -> &'static str {
        if self.is_busy() {
            "Minting..."
        } else {
            idle_label
        }
    }

    /// Banner text for a finished submission.
    pub fn status_message(&self) -> Option<String> {
        match &self.state {
            MintState::Success { tx } => Some(format!("Transaction: {}", tx.short())),
            MintState::Failed { error } => Some(format!("Error: {error}")),
            _ => None,
        }
    }
}

/// Submit `call` through `writer` and wait for it, recording every step.
pub fn submit<W: ContractWriter>(
    writer: &mut W,
    call: &MintCall,
    submission: &mut MintSubmission,
) -> Result<TxHash, TransactionError> {
    if submission.is_busy() {
        return Err(TransactionError::Busy);
    }
    submission.handle(WalletEvent::Submitted);

    let tx = match writer.send(call) {
        Ok(tx) => tx,
        Err(err) => {
            submission.handle(failure_event(&err));
            return Err(err);
        }
    };
    tracing::info!(%tx, function = call.function_name(), "transaction sent");
    submission.handle(WalletEvent::HashReceived(tx));

    match writer.wait_for_receipt(&tx) {
        Ok(()) => {
            submission.handle(WalletEvent::Confirmed);
            Ok(tx)
        }
        Err(err) => {
            submission.handle(failure_event(&err));
            Err(err)
        }
    }
}

fn failure_event(err: &TransactionError) -> WalletEvent {
    match err {
        TransactionError::Rejected(msg) => WalletEvent::Rejected(msg.clone()),
        TransactionError::Failed(msg) => WalletEvent::Failed(msg.clone()),
        TransactionError::Busy => WalletEvent::Failed(err.to_string()),
    }
}
