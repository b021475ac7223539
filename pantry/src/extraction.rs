use serde_json::{Map, Value};

use crate::basic_models::{DishResult, IngredientRecord};

#[derive(thiserror::Error, Debug)]
pub enum ReplyError {
    #[error("No JSON object found in reply")]
    NoJsonObject,
    #[error("Reply has no ingredients")]
    MissingIngredients,
    #[error("Malformed ingredients: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Find the first complete JSON object embedded in free-form text.
///
/// Every `{` is tried in order, and a single JSON value is parsed from that
/// position. The parser decides where the object ends, so nested braces are
/// fine and trailing prose (or a closing code fence) is ignored. Braces in
/// prose that don't open a valid object are skipped over.
pub fn find_json_object(text: &str) -> Option<&str> {
    first_json_object(text).map(|(payload, _)| payload)
}

fn first_json_object(text: &str) -> Option<(&str, Map<String, Value>)> {
    for (start, _) in text.match_indices('{') {
        let mut values = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
        if let Some(Ok(Value::Object(object))) = values.next() {
            let end = start + values.byte_offset();
            return Some((&text[start..end], object));
        }
    }
    None
}

/// An ingredient entry that was left out of an accepted reply.
#[derive(Debug)]
pub struct SkippedIngredient {
    /// Position of the entry in the reply's `ingredients` array.
    pub index: usize,
    pub reason: serde_json::Error,
}

/// An accepted reply, along with any entries that didn't fit the record shape.
#[derive(Debug)]
pub struct ParsedReply {
    pub result: DishResult,
    pub skipped: Vec<SkippedIngredient>,
}

/// Turn a raw model reply into a [`DishResult`] for `dish`.
///
/// The reply is accepted as soon as it contains an object whose
/// `ingredients` field is a list. Each entry is read on its own: entries
/// with an unknown unit or category, or missing fields, are reported in
/// [`ParsedReply::skipped`] and the rest are kept. The dish name always
/// comes from the caller, never from the reply.
pub fn parse_reply(dish: &str, text: &str) -> Result<ParsedReply, ReplyError> {
    let (_, mut object) = first_json_object(text).ok_or(ReplyError::NoJsonObject)?;
    let entries: Vec<Value> = match object.remove("ingredients") {
        Some(Value::Null) | None => return Err(ReplyError::MissingIngredients),
        Some(value) => serde_json::from_value(value)?,
    };

    let mut ingredients = vec![];
    let mut skipped = vec![];
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<IngredientRecord>(entry) {
            Ok(record) => ingredients.push(record),
            Err(reason) => skipped.push(SkippedIngredient { index, reason }),
        }
    }

    Ok(ParsedReply {
        result: DishResult {
            dish: dish.to_string(),
            ingredients,
        },
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_models::{Category, Unit};

    const BURGER_REPLY: &str = r#"Sure! Here is the list:
```json
{
  "ingredients": [
    {"ingredient_name": "Ground beef", "unit_amount": 150, "unit": "g", "category": "Fresh Meat"},
    {"ingredient_name": "Ketchup", "unit_amount": 15, "unit": "ml", "category": "Seasonings"}
  ]
}
```
Enjoy your meal {and your day}!"#;

    #[test]
    fn test_find_json_object_strips_surrounding_text() {
        let payload = find_json_object(BURGER_REPLY).unwrap();
        assert!(payload.starts_with('{'));
        assert!(payload.ends_with('}'));
        assert!(!payload.contains("Enjoy"));
    }

    #[test]
    fn test_find_json_object_skips_prose_braces() {
        let text = r#"Use {your judgement} here: {"ingredients": []} and {more}"#;
        assert_eq!(find_json_object(text), Some(r#"{"ingredients": []}"#));
    }

    #[test]
    fn test_find_json_object_none() {
        assert_eq!(find_json_object("no json at all"), None);
        assert_eq!(find_json_object("[1, 2, 3]"), None);
        assert_eq!(find_json_object("{\"truncated\": "), None);
    }

    #[test]
    fn test_parse_reply() {
        let parsed = parse_reply("hamburger", BURGER_REPLY).unwrap();
        assert!(parsed.skipped.is_empty());
        let result = parsed.result;
        assert_eq!(result.dish, "hamburger");
        assert_eq!(result.ingredients.len(), 2);
        assert_eq!(result.ingredients[0].ingredient_name, "Ground beef");
        assert_eq!(result.ingredients[0].unit_amount, 150.0);
        assert_eq!(result.ingredients[0].category, Category::FreshMeat);
        assert_eq!(result.ingredients[1].unit, Unit::Millilitres);
    }

    #[test]
    fn test_parse_reply_uses_requested_dish() {
        let result = parse_reply("fried rice", r#"{"dish": "paella", "ingredients": []}"#)
            .unwrap()
            .result;
        assert_eq!(result.dish, "fried rice");
        assert!(result.ingredients.is_empty());
    }

    #[test]
    fn test_parse_reply_rejects_bad_shapes() {
        assert!(matches!(
            parse_reply("x", "nothing here"),
            Err(ReplyError::NoJsonObject)
        ));
        assert!(matches!(
            parse_reply("x", r#"{"recipe": "none"}"#),
            Err(ReplyError::MissingIngredients)
        ));
        assert!(matches!(
            parse_reply("x", r#"{"ingredients": null}"#),
            Err(ReplyError::MissingIngredients)
        ));
        assert!(matches!(
            parse_reply("x", r#"{"ingredients": "lots"}"#),
            Err(ReplyError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_reply_keeps_entries_that_fit() {
        let reply = r#"{"ingredients": [
            {"ingredient_name": "Ground beef", "unit_amount": 150, "unit": "g", "category": "Fresh Meat"},
            {"ingredient_name": "Pickles", "unit_amount": 3, "unit": "pieces", "category": "Prepared Vegetables"},
            {"ingredient_name": "Bun", "unit_amount": 80, "unit": "g", "category": "Bakery"},
            {"ingredient_name": "Cheese", "unit_amount": "a slice", "unit": "g", "category": "Ice Cream & Cheese"},
            {"ingredient_name": "Salt"},
            {"ingredient_name": "Ketchup", "unit_amount": 15, "unit": "ml", "category": "Seasonings"}
        ]}"#;
        let parsed = parse_reply("hamburger", reply).unwrap();

        let names = parsed
            .result
            .ingredients
            .iter()
            .map(|i| i.ingredient_name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, vec!["Ground beef", "Ketchup"]);
        let skipped = parsed.skipped.iter().map(|s| s.index).collect::<Vec<_>>();
        assert_eq!(skipped, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_parse_reply_accepts_list_with_nothing_usable() {
        let parsed = parse_reply("x", r#"{"ingredients": [{"ingredient_name": "salt"}, 7]}"#).unwrap();
        assert!(parsed.result.ingredients.is_empty());
        assert_eq!(parsed.skipped.len(), 2);
    }
}
