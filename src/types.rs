use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// opaque purchase identifier shared by all installments of one purchase
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseId(String);

impl PurchaseId {
    /// fresh random identifier
    pub fn generate() -> Self {
        PurchaseId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// id of the installment with the given 1-based index
    pub fn installment_id(&self, index: u32) -> String {
        format!("{}-{}", self.0, index)
    }
}

impl From<String> for PurchaseId {
    fn from(s: String) -> Self {
        PurchaseId(s)
    }
}

impl From<&str> for PurchaseId {
    fn from(s: &str) -> Self {
        PurchaseId(s.to_string())
    }
}

impl fmt::Display for PurchaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// spending category of a purchase
///
/// Labels outside the known set are kept verbatim in `Other` so stored
/// records always round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    #[default]
    Food,
    Transport,
    Housing,
    Health,
    Education,
    Leisure,
    Shopping,
    Services,
    Subscriptions,
    Other(String),
}

impl Category {
    pub fn label(&self) -> &str {
        match self {
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Housing => "Housing",
            Category::Health => "Health",
            Category::Education => "Education",
            Category::Leisure => "Leisure",
            Category::Shopping => "Shopping",
            Category::Services => "Services",
            Category::Subscriptions => "Subscriptions",
            Category::Other(label) => label,
        }
    }
}

impl From<String> for Category {
    fn from(s: String) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "food" => Category::Food,
            "transport" => Category::Transport,
            "housing" => Category::Housing,
            "health" => Category::Health,
            "education" => Category::Education,
            "leisure" => Category::Leisure,
            "shopping" => Category::Shopping,
            "services" => Category::Services,
            "subscriptions" => Category::Subscriptions,
            _ => Category::Other(s.trim().to_string()),
        }
    }
}

impl From<Category> for String {
    fn from(c: Category) -> Self {
        c.label().to_string()
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Category::from(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// purchase fields checked before allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseField {
    Date,
    Description,
    TotalAmount,
    InstallmentCount,
}

impl fmt::Display for PurchaseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PurchaseField::Date => "date",
            PurchaseField::Description => "description",
            PurchaseField::TotalAmount => "total amount",
            PurchaseField::InstallmentCount => "installment count",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installment_ids() {
        let id = PurchaseId::from("abc");
        assert_eq!(id.installment_id(1), "abc-1");
        assert_eq!(id.installment_id(12), "abc-12");
        assert_ne!(PurchaseId::generate(), PurchaseId::generate());
    }

    #[test]
    fn test_category_labels_round_trip() {
        assert_eq!("health".parse::<Category>().unwrap(), Category::Health);
        assert_eq!("".parse::<Category>().unwrap(), Category::Food);

        let custom: Category = serde_json::from_str("\"Pets\"").unwrap();
        assert_eq!(custom, Category::Other("Pets".to_string()));
        assert_eq!(serde_json::to_string(&custom).unwrap(), "\"Pets\"");
        assert_eq!(serde_json::to_string(&Category::Leisure).unwrap(), "\"Leisure\"");
    }
}
