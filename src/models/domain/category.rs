use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String, // Display label, e.g. "Science"
}

impl Category {
    pub fn new(id: i64, kind: &str) -> Self {
        Category {
            id,
            kind: kind.to_string(),
        }
    }
}
