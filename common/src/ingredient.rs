use serde::{Deserialize, Serialize};

use crate::id::RemoteId;

/// Ingredient identifier, unique within one product.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(pub RemoteId);

/// An add-on or a removable default component of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    /// Surcharge in roubles. Missing or null prices count as zero.
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub price: u64,
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub is_removable: bool,
}

/// Ordered set of ingredients keyed by id.
///
/// Keeps selection order so the cart shows add-ons in the order they were picked.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientSet(Vec<Ingredient>);

impl IngredientSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &IngredientId) -> bool {
        self.0.iter().any(|i| &i.id == id)
    }

    /// Insert the ingredient if absent, remove it otherwise.
    /// Returns true when the ingredient is selected afterwards.
    pub fn toggle(&mut self, ingredient: &Ingredient) -> bool {
        if let Some(pos) = self.0.iter().position(|i| i.id == ingredient.id) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(ingredient.clone());
            true
        }
    }

    /// Sum of the surcharges of every ingredient in the set.
    pub fn price(&self) -> u64 {
        self.0.iter().map(|i| i.price).sum()
    }

    /// Comma-separated names, as shown in the cart.
    pub fn names(&self) -> String {
        self.0
            .iter()
            .map(|i| i.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
pub(crate) fn ingredient(id: i64, name: &str, price: u64) -> Ingredient {
    Ingredient {
        id: IngredientId(RemoteId::Number(id)),
        name: name.to_string(),
        price,
        is_removable: false,
    }
}
