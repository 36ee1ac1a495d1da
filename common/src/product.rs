use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::id::RemoteId;
use crate::ingredient::Ingredient;

/// Unique product identifier within the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub RemoteId);

/// Menu section. Variant order is the display order; unknown sections sort last.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductCategory {
    Snacks,
    MainMenu,
    Drinks,
    Sauces,
    Other(String),
}

impl ProductCategory {
    /// Sections the menu always shows, even before the catalog arrives.
    pub const KNOWN: [ProductCategory; 4] = [
        ProductCategory::Snacks,
        ProductCategory::MainMenu,
        ProductCategory::Drinks,
        ProductCategory::Sauces,
    ];

    /// Wire key used by the product service.
    pub fn key(&self) -> &str {
        match self {
            ProductCategory::Snacks => "snacks",
            ProductCategory::MainMenu => "mainMenu",
            ProductCategory::Drinks => "drinks",
            ProductCategory::Sauces => "sauces",
            ProductCategory::Other(key) => key,
        }
    }

    /// Section heading. Unknown sections are shown by their raw key.
    pub fn title(&self) -> &str {
        match self {
            ProductCategory::Snacks => "🍟 Снеки",
            ProductCategory::MainMenu => "🍴 Основное меню",
            ProductCategory::Drinks => "🥤 Напитки",
            ProductCategory::Sauces => "🥫 Соусы",
            ProductCategory::Other(key) => key,
        }
    }
}

impl From<String> for ProductCategory {
    fn from(key: String) -> Self {
        match key.as_str() {
            "snacks" => ProductCategory::Snacks,
            "mainMenu" => ProductCategory::MainMenu,
            "drinks" => ProductCategory::Drinks,
            "sauces" => ProductCategory::Sauces,
            _ => ProductCategory::Other(key),
        }
    }
}

impl From<ProductCategory> for String {
    fn from(category: ProductCategory) -> Self {
        category.key().to_string()
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Free-form product attribute the service sends either as a number or as text
/// (calories, cooking time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Number(u64),
    Text(String),
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Number(n) => write!(f, "{n}"),
            Label::Text(s) => f.write_str(s),
        }
    }
}

/// A menu item as returned by the product service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub description: String,
    /// Base price in roubles.
    pub price: u64,
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub photo_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
    /// Optional add-ons that raise the price.
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub ingredients: Vec<Ingredient>,
    /// Default components the customer may leave out. Never affect the price.
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub removable_ingredients: Vec<Ingredient>,
    #[serde(default, deserialize_with = "crate::wire::null_as_default")]
    pub popular: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<Label>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<Label>,
}

impl Product {
    /// Calories line for the details panel; "300" when the service omits it.
    pub fn calories_label(&self) -> String {
        match &self.calories {
            Some(label) => format!("{label} ккал"),
            None => "300 ккал".to_string(),
        }
    }

    /// Cooking time for the details panel; "15 мин" when the service omits it.
    pub fn cooking_time_label(&self) -> String {
        match &self.cooking_time {
            Some(label) => label.to_string(),
            None => "15 мин".to_string(),
        }
    }
}

/// Which sections of the menu are on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ProductCategory),
}

impl CategoryFilter {
    /// Parse a tab key; `"all"` selects every section.
    pub fn parse(key: &str) -> Self {
        if key == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(ProductCategory::from(key.to_string()))
        }
    }

    pub fn matches(&self, category: &ProductCategory) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => selected == category,
        }
    }

    /// Navigation tabs in display order: "Все" followed by the known sections.
    pub fn tabs() -> Vec<(CategoryFilter, &'static str)> {
        let mut tabs = vec![(CategoryFilter::All, "Все")];
        tabs.push((CategoryFilter::Only(ProductCategory::Snacks), "🍟 Снеки"));
        tabs.push((CategoryFilter::Only(ProductCategory::MainMenu), "🍴 Основное меню"));
        tabs.push((CategoryFilter::Only(ProductCategory::Drinks), "🍹 Напитки"));
        tabs.push((CategoryFilter::Only(ProductCategory::Sauces), "🍴 Соусы"));
        tabs
    }
}

/// Products grouped by menu section, as fetched for this session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    sections: BTreeMap<ProductCategory, Vec<Product>>,
}

impl Default for Catalog {
    /// Every known section present and empty.
    fn default() -> Self {
        let sections = ProductCategory::KNOWN
            .iter()
            .cloned()
            .map(|c| (c, Vec::new()))
            .collect();
        Self { sections }
    }
}

impl Catalog {
    /// Parse the product service response: an object keyed by section name.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    pub fn from_sections(sections: impl IntoIterator<Item = (ProductCategory, Vec<Product>)>) -> Self {
        Self {
            sections: sections.into_iter().collect(),
        }
    }

    /// Sections passing the filter, in display order.
    pub fn sections<'a>(
        &'a self,
        filter: &CategoryFilter,
    ) -> impl Iterator<Item = (&'a ProductCategory, &'a [Product])> + 'a {
        let filter = filter.clone();
        self.sections
            .iter()
            .filter(move |(category, _)| filter.matches(category))
            .map(|(category, products)| (category, products.as_slice()))
    }

    pub fn section(&self, category: &ProductCategory) -> &[Product] {
        self.sections
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn find(&self, id: &ProductId) -> Option<&Product> {
        self.sections.values().flatten().find(|p| &p.id == id)
    }

    pub fn product_count(&self) -> usize {
        self.sections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.product_count() == 0
    }

    pub fn section_counts(&self) -> Vec<(String, usize)> {
        self.sections
            .iter()
            .map(|(c, p)| (c.key().to_string(), p.len()))
            .collect()
    }
}

#[cfg(test)]
pub(crate) fn product(id: i64, name: &str, price: u64) -> Product {
    Product {
        id: ProductId(RemoteId::Number(id)),
        name: name.to_string(),
        description: String::new(),
        price,
        photo_url: String::new(),
        category: None,
        ingredients: Vec::new(),
        removable_ingredients: Vec::new(),
        popular: false,
        calories: None,
        cooking_time: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_JSON: &str = r#"{
        "drinks": [
            {"id": 10, "name": "Айран", "price": 90, "category": "drinks"}
        ],
        "mainMenu": [
            {
                "id": 1,
                "name": "Шаурма классическая",
                "description": "Курица, овощи, соус",
                "price": 250,
                "photoUrl": "https://cdn.example/shawarma.jpg",
                "category": "mainMenu",
                "ingredients": [{"id": 1, "name": "Сыр", "price": 50}],
                "removableIngredients": [{"id": 7, "name": "Лук", "price": 0, "isRemovable": true}],
                "popular": true,
                "calories": 540,
                "cookingTime": "10 мин"
            }
        ],
        "desserts": []
    }"#;

    #[test]
    fn test_catalog_parses_service_shape() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        assert_eq!(catalog.product_count(), 2);

        let shawarma = catalog.section(&ProductCategory::MainMenu)[0].clone();
        assert_eq!(shawarma.price, 250);
        assert!(shawarma.popular);
        assert_eq!(shawarma.removable_ingredients[0].name, "Лук");
        assert_eq!(shawarma.calories_label(), "540 ккал");
        assert_eq!(shawarma.cooking_time_label(), "10 мин");
    }

    #[test]
    fn test_sections_in_menu_order_with_unknown_last() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        let keys: Vec<_> = catalog
            .sections(&CategoryFilter::All)
            .map(|(c, _)| c.key().to_string())
            .collect();
        assert_eq!(keys, vec!["mainMenu", "drinks", "desserts"]);
    }

    #[test]
    fn test_filter_selects_single_section() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        let filter = CategoryFilter::parse("drinks");
        let sections: Vec<_> = catalog.sections(&filter).collect();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].1[0].name, "Айран");

        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
    }

    #[test]
    fn test_sections_accept_temporary_filter() {
        let catalog = Catalog::from_json(CATALOG_JSON).unwrap();
        let drinks: Vec<_> = catalog.sections(&CategoryFilter::parse("drinks")).collect();
        assert_eq!(drinks.len(), 1);
        assert_eq!(drinks[0].0, &ProductCategory::Drinks);
    }

    #[test]
    fn test_null_fields_take_defaults() {
        let catalog = Catalog::from_json(
            r#"{"snacks": [{
                "id": 5,
                "name": "Наггетсы",
                "price": 180,
                "description": null,
                "photoUrl": null,
                "ingredients": null,
                "removableIngredients": null,
                "popular": null
            }]}"#,
        )
        .unwrap();
        let nuggets = &catalog.section(&ProductCategory::Snacks)[0];
        assert_eq!(nuggets.description, "");
        assert_eq!(nuggets.photo_url, "");
        assert!(nuggets.ingredients.is_empty());
        assert!(nuggets.removable_ingredients.is_empty());
        assert!(!nuggets.popular);
    }

    #[test]
    fn test_default_catalog_has_empty_known_sections() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.sections(&CategoryFilter::All).count(), 4);
    }

    #[test]
    fn test_missing_details_fall_back() {
        let p = product(1, "Картошка фри", 120);
        assert_eq!(p.calories_label(), "300 ккал");
        assert_eq!(p.cooking_time_label(), "15 мин");
    }

    #[test]
    fn test_category_titles() {
        assert_eq!(ProductCategory::Snacks.title(), "🍟 Снеки");
        assert_eq!(ProductCategory::from("combo".to_string()).title(), "combo");
    }
}
