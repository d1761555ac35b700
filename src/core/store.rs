//! Ordered line items with dense 1-based SL numbers

use super::pricing::{compute_area, compute_item_cost};
use crate::error::{QuoteError, QuoteResult};
use crate::types::{ItemDraft, LineItem};
use tracing::debug;

/// Holds the line items of one quotation.
///
/// Invariant: `items[i].sequence_number == i + 1` for every item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuotationStore {
    items: Vec<LineItem>,
}

impl QuotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, sequence_number: u32) -> Option<&LineItem> {
        self.items
            .iter()
            .find(|item| item.sequence_number == sequence_number)
    }

    /// Price the draft and append it as the last item
    pub fn add_item(&mut self, draft: ItemDraft) -> &LineItem {
        let area = compute_area(draft.height, draft.width, draft.unit);
        let total_cost = compute_item_cost(area, draft.price_per_area, draft.quantity);
        let sequence_number = self.next_sequence_number();

        debug!(sequence_number, area, total_cost, "adding item '{}'", draft.name);

        self.items.push(LineItem {
            sequence_number,
            name: draft.name,
            description: draft.description,
            height: draft.height,
            width: draft.width,
            quantity: draft.quantity,
            price_per_area: draft.price_per_area,
            area,
            total_cost,
            // An empty note reads back as no note
            note: draft.note.filter(|n| !n.is_empty()),
        });

        &self.items[self.items.len() - 1]
    }

    /// Remove the item with `sequence_number` and renumber the rest.
    ///
    /// An unknown number leaves the store untouched and returns `NotFound`.
    pub fn remove_item(&mut self, sequence_number: u32) -> QuoteResult<LineItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.sequence_number == sequence_number)
            .ok_or(QuoteError::NotFound(sequence_number))?;

        let removed = self.items.remove(index);
        self.renumber();

        debug!(sequence_number, remaining = self.items.len(), "removed item");
        Ok(removed)
    }

    /// Replace every item, numbering them 1..N in the given order
    pub fn replace_all(&mut self, items: Vec<LineItem>) {
        self.items = items;
        self.renumber();
    }

    fn next_sequence_number(&self) -> u32 {
        self.items.len() as u32 + 1
    }

    fn renumber(&mut self) {
        for (index, item) in self.items.iter_mut().enumerate() {
            item.sequence_number = index as u32 + 1;
        }
    }
}

impl From<Vec<LineItem>> for QuotationStore {
    fn from(items: Vec<LineItem>) -> Self {
        let mut store = Self::new();
        store.replace_all(items);
        store
    }
}
