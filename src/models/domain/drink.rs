use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Drink {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<RecipePart>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate)]
pub struct RecipePart {
    #[validate(length(min = 1, max = 50))]
    pub color: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(range(min = 1, max = 100))]
    pub parts: u32,
}

/// Public view of a drink: colours and proportions, no ingredient names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DrinkShort {
    pub id: i64,
    pub title: String,
    pub recipe: Vec<ShortRecipePart>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ShortRecipePart {
    pub color: String,
    pub parts: u32,
}

impl Drink {
    pub fn new(id: i64, title: &str, recipe: Vec<RecipePart>) -> Self {
        Drink {
            id,
            title: title.to_string(),
            recipe,
        }
    }

    pub fn short(&self) -> DrinkShort {
        DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe: self
                .recipe
                .iter()
                .map(|part| ShortRecipePart {
                    color: part.color.clone(),
                    parts: part.parts,
                })
                .collect(),
        }
    }

    /// Full view, only served to callers holding `get:drinks-detail`.
    pub fn long(&self) -> Drink {
        self.clone()
    }
}

impl RecipePart {
    pub fn new(color: &str, name: &str, parts: u32) -> Self {
        RecipePart {
            color: color.to_string(),
            name: name.to_string(),
            parts,
        }
    }
}
