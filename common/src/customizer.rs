use crate::cart::CartLineItem;
use crate::ingredient::{Ingredient, IngredientId, IngredientSet};
use crate::product::Product;

/// Per-product selection of add-ons and left-out components.
#[derive(Debug, Clone, PartialEq)]
pub struct Customizer {
    product: Product,
    added: IngredientSet,
    removed: IngredientSet,
}

impl Customizer {
    pub fn new(product: Product) -> Self {
        Self {
            product,
            added: IngredientSet::new(),
            removed: IngredientSet::new(),
        }
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn toggle_additive(&mut self, ingredient: &Ingredient) -> bool {
        self.added.toggle(ingredient)
    }

    pub fn toggle_removal(&mut self, ingredient: &Ingredient) -> bool {
        self.removed.toggle(ingredient)
    }

    pub fn is_added(&self, id: &IngredientId) -> bool {
        self.added.contains(id)
    }

    pub fn is_removed(&self, id: &IngredientId) -> bool {
        self.removed.contains(id)
    }

    pub fn added(&self) -> &IngredientSet {
        &self.added
    }

    pub fn removed(&self) -> &IngredientSet {
        &self.removed
    }

    /// Base price plus every selected add-on. Removals are free.
    pub fn compute_price(&self) -> u64 {
        self.product.price.saturating_add(self.added.price())
    }

    /// Freeze the current selection into a line item with quantity 1 and
    /// start over with an empty selection.
    pub fn commit(&mut self) -> CartLineItem {
        let item = CartLineItem::new(
            self.product.clone(),
            self.compute_price(),
            self.added.clone(),
            self.removed.clone(),
        );
        self.reset();
        item
    }

    /// Switch to a newer copy of the same product. Selections it no longer
    /// offers are dropped; the rest pick up the new surcharges.
    pub fn refresh(&mut self, product: Product) {
        self.added = still_offered(&self.added, &product.ingredients);
        self.removed = still_offered(&self.removed, &product.removable_ingredients);
        self.product = product;
    }

    pub fn reset(&mut self) {
        self.added.clear();
        self.removed.clear();
    }
}

fn still_offered(selected: &IngredientSet, offered: &[Ingredient]) -> IngredientSet {
    let mut next = IngredientSet::new();
    for picked in selected.iter() {
        if let Some(fresh) = offered.iter().find(|i| i.id == picked.id) {
            next.toggle(fresh);
        }
    }
    next
}
