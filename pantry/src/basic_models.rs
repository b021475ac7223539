use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Measurement unit for an ingredient amount: grams for solids, millilitres for liquids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[derive(strum::Display, strum::EnumString, strum::AsRefStr)]
pub enum Unit {
    #[serde(rename = "g")]
    #[strum(serialize = "g")]
    Grams,
    #[serde(rename = "ml")]
    #[strum(serialize = "ml")]
    Millilitres,
}

/// The fixed shelf categories an ingredient can be filed under.
///
/// Variants serialize as their human-readable labels, which are also the
/// strings the model is asked to choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[derive(strum::Display, strum::EnumString, strum::AsRefStr, strum::EnumIter)]
pub enum Category {
    #[serde(rename = "Prepared Vegetables")]
    #[strum(serialize = "Prepared Vegetables")]
    PreparedVegetables,
    #[serde(rename = "Vegetables")]
    #[strum(serialize = "Vegetables")]
    Vegetables,
    #[serde(rename = "Fresh Fruits")]
    #[strum(serialize = "Fresh Fruits")]
    FreshFruits,
    #[serde(rename = "Fresh Meat")]
    #[strum(serialize = "Fresh Meat")]
    FreshMeat,
    #[serde(rename = "Seafood & Fish Balls")]
    #[strum(serialize = "Seafood & Fish Balls")]
    SeafoodAndFishBalls,
    #[serde(rename = "Instant Foods")]
    #[strum(serialize = "Instant Foods")]
    InstantFoods,
    #[serde(rename = "Ice Cream & Cheese")]
    #[strum(serialize = "Ice Cream & Cheese")]
    IceCreamAndCheese,
    #[serde(rename = "Cakes")]
    #[strum(serialize = "Cakes")]
    Cakes,
    #[serde(rename = "Dried Fruits")]
    #[strum(serialize = "Dried Fruits")]
    DriedFruits,
    #[serde(rename = "Candies")]
    #[strum(serialize = "Candies")]
    Candies,
    #[serde(rename = "Fruit Jam")]
    #[strum(serialize = "Fruit Jam")]
    FruitJam,
    #[serde(rename = "Snacks")]
    #[strum(serialize = "Snacks")]
    Snacks,
    #[serde(rename = "Milk")]
    #[strum(serialize = "Milk")]
    Milk,
    #[serde(rename = "Yogurt")]
    #[strum(serialize = "Yogurt")]
    Yogurt,
    #[serde(rename = "Alcoholic Beverages")]
    #[strum(serialize = "Alcoholic Beverages")]
    AlcoholicBeverages,
    #[serde(rename = "Beverages")]
    #[strum(serialize = "Beverages")]
    Beverages,
    #[serde(rename = "Seasonings")]
    #[strum(serialize = "Seasonings")]
    Seasonings,
    #[serde(rename = "Grains & Staples")]
    #[strum(serialize = "Grains & Staples")]
    GrainsAndStaples,
    #[serde(rename = "Cold Cuts: Sausages & Ham")]
    #[strum(serialize = "Cold Cuts: Sausages & Ham")]
    ColdCuts,
    #[serde(rename = "Cereals & Grains")]
    #[strum(serialize = "Cereals & Grains")]
    CerealsAndGrains,
}

impl Category {
    /// Render every label as a quoted, comma separated list in brackets,
    /// ready to be pasted into a prompt.
    pub fn prompt_list() -> String {
        let labels = Category::iter()
            .map(|c| format!("\"{}\"", c.as_ref()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("[{}]", labels)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IngredientRecord {
    pub ingredient_name: String,
    pub unit_amount: f64,
    pub unit: Unit,
    pub category: Category,
}

/// Everything we know about one dish. `ingredients` is empty when extraction failed.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DishResult {
    pub dish: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientRecord>,
}

impl DishResult {
    /// The fallback record used once every attempt has failed.
    pub fn empty(dish: &str) -> Self {
        Self {
            dish: dish.to_string(),
            ingredients: vec![],
        }
    }
}
