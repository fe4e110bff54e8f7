//! # Transaction Ledger
//!
//! First-in-first-out queue of completed sales.
//!
//! This is the in-memory mirror of the ledger file. The storage layer
//! appends a record to disk first and only then enqueues it here, so the
//! queue never holds a sale that was not durably written. For historical
//! reporting the file is re-read; this queue covers the current session
//! plus whatever was hydrated at startup.

use std::collections::VecDeque;

use crate::types::TransactionRecord;

/// FIFO queue of [`TransactionRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct TransactionLedger {
    queue: VecDeque<TransactionRecord>,
}

impl TransactionLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        TransactionLedger::default()
    }

    /// Appends a record at the tail. No uniqueness check.
    pub fn enqueue(&mut self, record: TransactionRecord) {
        self.queue.push_back(record);
    }

    /// Removes and returns the oldest record.
    pub fn dequeue(&mut self) -> Option<TransactionRecord> {
        self.queue.pop_front()
    }

    /// True when the queue holds nothing.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of queued records.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Copies the queue head-to-tail without consuming it.
    pub fn list_all(&self) -> Vec<TransactionRecord> {
        self.queue.iter().cloned().collect()
    }

    /// Iterates head-to-tail.
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, TransactionRecord> {
        self.queue.iter()
    }

    /// The most recently enqueued record.
    pub fn last(&self) -> Option<&TransactionRecord> {
        self.queue.back()
    }
}

impl FromIterator<TransactionRecord> for TransactionLedger {
    fn from_iter<I: IntoIterator<Item = TransactionRecord>>(iter: I) -> Self {
        TransactionLedger {
            queue: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn txn(id: &str, total_major: i64) -> TransactionRecord {
        TransactionRecord {
            transaction_id: id.to_string(),
            timestamp: "2025-01-01 10:00:00".to_string(),
            product_code: "SF001".to_string(),
            product_name: "Sofa".to_string(),
            quantity: 1,
            unit_price: Money::from_major(total_major),
            total: Money::from_major(total_major),
        }
    }

    #[test]
    fn test_fifo_order() {
        let mut ledger = TransactionLedger::new();
        ledger.enqueue(txn("T1", 10));
        ledger.enqueue(txn("T2", 20));

        let ids: Vec<_> = ledger.list_all().into_iter().map(|t| t.transaction_id).collect();
        assert_eq!(ids, vec!["T1", "T2"]);

        assert_eq!(ledger.dequeue().unwrap().transaction_id, "T1");
        assert_eq!(ledger.dequeue().unwrap().transaction_id, "T2");
        assert!(ledger.dequeue().is_none());
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_list_all_does_not_consume() {
        let mut ledger = TransactionLedger::new();
        ledger.enqueue(txn("T1", 10));

        let _ = ledger.list_all();
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut ledger = TransactionLedger::new();
        ledger.enqueue(txn("T1", 10));
        ledger.enqueue(txn("T1", 10));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_last() {
        let ledger: TransactionLedger = vec![txn("T1", 10), txn("T2", 25)].into_iter().collect();

        assert_eq!(ledger.last().unwrap().transaction_id, "T2");
    }
}
