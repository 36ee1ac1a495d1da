use serde::{Deserialize, Serialize};

use crate::ingredient::IngredientSet;
use crate::product::Product;

/// Session-local line item identity, assigned when the item enters the cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineItemId(pub u64);

/// One customized product in the cart.
///
/// On the wire the product fields sit at the top level next to the
/// customization, which is what the order service expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    #[serde(skip)]
    pub id: LineItemId,
    #[serde(flatten)]
    pub product: Product,
    /// Base price plus add-ons, frozen when the item was added.
    pub final_price: u64,
    pub added_ingredients: IngredientSet,
    pub removed_ingredients: IngredientSet,
    pub quantity: u32,
}

impl CartLineItem {
    pub fn new(
        product: Product,
        final_price: u64,
        added_ingredients: IngredientSet,
        removed_ingredients: IngredientSet,
    ) -> Self {
        Self {
            id: LineItemId::default(),
            product,
            final_price,
            added_ingredients,
            removed_ingredients,
            quantity: 1,
        }
    }

    pub fn subtotal(&self) -> u64 {
        self.final_price.saturating_mul(u64::from(self.quantity))
    }

    /// "Добавки: …" line, if anything was added.
    pub fn additions_summary(&self) -> Option<String> {
        (!self.added_ingredients.is_empty())
            .then(|| format!("Добавки: {}", self.added_ingredients.names()))
    }

    /// "Убрать: …" line, if anything was left out.
    pub fn removals_summary(&self) -> Option<String> {
        (!self.removed_ingredients.is_empty())
            .then(|| format!("Убрать: {}", self.removed_ingredients.names()))
    }
}

/// Ordered line items. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartLineItem>,
    next_id: u64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an item to the end and give it a fresh id.
    pub fn append(&mut self, mut item: CartLineItem) -> LineItemId {
        self.next_id += 1;
        item.id = LineItemId(self.next_id);
        let id = item.id;
        self.items.push(item);
        id
    }

    /// Remove the item at `index`; out-of-range indices are ignored.
    pub fn remove_at(&mut self, index: usize) -> Option<CartLineItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Set the quantity of the item at `index`. Quantities below 1 and
    /// out-of-range indices are ignored. Returns true if anything changed.
    pub fn update_quantity(&mut self, index: usize, new_quantity: u32) -> bool {
        if new_quantity < 1 {
            return false;
        }
        match self.items.get_mut(index) {
            Some(item) => {
                item.quantity = new_quantity;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of final price times quantity over every item.
    pub fn total(&self) -> u64 {
        self.items.iter().map(CartLineItem::subtotal).sum()
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&CartLineItem> {
        self.items.get(index)
    }

    /// Current position of an item, if it is still in the cart.
    pub fn position_of(&self, id: LineItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn line_item(id: i64, final_price: u64, quantity: u32) -> CartLineItem {
    let mut item = CartLineItem::new(
        crate::product::product(id, "Шаурма", final_price),
        final_price,
        IngredientSet::new(),
        IngredientSet::new(),
    );
    item.quantity = quantity;
    item
}
