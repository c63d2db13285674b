//! Pending transactions awaiting inclusion: ordered FIFO, no duplicates by
//! signature (§3 "Mempool").

use aureus_core::Transaction;

#[derive(Clone, Debug, Default)]
pub struct Mempool {
    pending: Vec<Transaction>,
}

impl Mempool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn contains_signature(&self, signature: &str) -> bool {
        self.pending
            .iter()
            .any(|tx| tx.signature.as_deref() == Some(signature))
    }

    pub fn push(&mut self, tx: Transaction) {
        self.pending.push(tx);
    }

    /// The single oldest pending transaction, without removing it (§4.5
    /// step 4: "Select exactly the single oldest pending user transaction").
    pub fn oldest(&self) -> Option<&Transaction> {
        self.pending.first()
    }

    /// Sum of pending amounts whose sender resolves to `sender_key`, under
    /// the caller-supplied resolution function (§4.4 step 5).
    pub fn pending_sum_for<F>(&self, sender_key: &str, resolve: F) -> f64
    where
        F: Fn(&str) -> String,
    {
        self.pending
            .iter()
            .filter(|tx| resolve(&tx.sender) == sender_key)
            .map(|tx| tx.amount)
            .sum()
    }

    /// Remove the transaction with this signature, if present (§4.5 step 7,
    /// §4.8 step 1: "remove transactions with matching signatures").
    pub fn remove_by_signature(&mut self, signature: &str) {
        self.pending.retain(|tx| tx.signature.as_deref() != Some(signature));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.pending.iter()
    }
}
