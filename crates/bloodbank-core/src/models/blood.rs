//! Blood classification vocabulary: ABO/Rh groups, Rh antigen, product types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown blood group: {0}")]
pub struct UnknownBloodGroup(pub String);

/// One of the eight ABO/Rh blood groups.
///
/// Variant order is the canonical display order used everywhere inventory is
/// broken down by group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    APositive,
    #[serde(rename = "A-")]
    ANegative,
    #[serde(rename = "B+")]
    BPositive,
    #[serde(rename = "B-")]
    BNegative,
    #[serde(rename = "AB+")]
    AbPositive,
    #[serde(rename = "AB-")]
    AbNegative,
    #[serde(rename = "O+")]
    OPositive,
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    /// All groups in canonical order.
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }

    /// The Rh antigen implied by the group's sign.
    pub fn rh(&self) -> Antigen {
        match self {
            BloodGroup::APositive
            | BloodGroup::BPositive
            | BloodGroup::AbPositive
            | BloodGroup::OPositive => Antigen::Positive,
            _ => Antigen::Negative,
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for BloodGroup {
    type Err = UnknownBloodGroup;

    /// Accepts the canonical spelling, case-insensitively, with either an
    /// ASCII hyphen or a unicode minus sign for negative groups.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('\u{2212}', "-");
        BloodGroup::ALL
            .into_iter()
            .find(|g| g.as_str() == normalized)
            .ok_or_else(|| UnknownBloodGroup(s.to_string()))
    }
}

/// Rh antigen, stored alongside the blood group rather than derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Antigen {
    #[default]
    Positive,
    Negative,
}

impl fmt::Display for Antigen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Antigen::Positive => write!(f, "Positive"),
            Antigen::Negative => write!(f, "Negative"),
        }
    }
}

impl FromStr for Antigen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" | "pos" | "+" => Ok(Antigen::Positive),
            "negative" | "neg" | "-" => Ok(Antigen::Negative),
            other => Err(format!("unknown antigen: {}", other)),
        }
    }
}

/// Blood product a unit was processed into. Travels as `blood_type` on the wire.
///
/// Unrecognized labels are kept verbatim in `Other` so records from newer
/// servers still decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductType {
    #[default]
    WholeBlood,
    Plasma,
    Platelets,
    RedBloodCells,
    Other(String),
}

impl ProductType {
    pub fn label(&self) -> &str {
        match self {
            ProductType::WholeBlood => "Whole Blood",
            ProductType::Plasma => "Plasma",
            ProductType::Platelets => "Platelets",
            ProductType::RedBloodCells => "Red Blood Cells",
            ProductType::Other(label) => label,
        }
    }
}

impl From<String> for ProductType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Whole Blood" => ProductType::WholeBlood,
            "Plasma" => ProductType::Plasma,
            "Platelets" => ProductType::Platelets,
            "Red Blood Cells" => ProductType::RedBloodCells,
            _ => ProductType::Other(label),
        }
    }
}

impl From<ProductType> for String {
    fn from(product: ProductType) -> Self {
        match product {
            ProductType::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

impl FromStr for ProductType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ProductType::from(s.trim().to_string()))
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blood_group_canonical_order() {
        let labels: Vec<&str> = BloodGroup::ALL.iter().map(|g| g.as_str()).collect();
        assert_eq!(labels, vec!["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"]);
    }

    #[test]
    fn test_blood_group_from_str() {
        assert_eq!("O+".parse::<BloodGroup>(), Ok(BloodGroup::OPositive));
        assert_eq!("ab-".parse::<BloodGroup>(), Ok(BloodGroup::AbNegative));
        assert_eq!("B\u{2212}".parse::<BloodGroup>(), Ok(BloodGroup::BNegative));
        assert!("C+".parse::<BloodGroup>().is_err());
        assert!("".parse::<BloodGroup>().is_err());
    }

    #[test]
    fn test_blood_group_wire_format() {
        let json = serde_json::to_string(&BloodGroup::AbPositive).unwrap();
        assert_eq!(json, "\"AB+\"");
        let parsed: BloodGroup = serde_json::from_str("\"O-\"").unwrap();
        assert_eq!(parsed, BloodGroup::ONegative);
    }

    #[test]
    fn test_blood_group_rh() {
        assert_eq!(BloodGroup::APositive.rh(), Antigen::Positive);
        assert_eq!(BloodGroup::ONegative.rh(), Antigen::Negative);
        assert_eq!(BloodGroup::AbNegative.rh(), Antigen::Negative);
    }

    #[test]
    fn test_product_type_unknown_label_preserved() {
        let parsed: ProductType = serde_json::from_str("\"Cryoprecipitate\"").unwrap();
        assert_eq!(parsed, ProductType::Other("Cryoprecipitate".to_string()));
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"Cryoprecipitate\"");
    }

    #[test]
    fn test_product_type_known_labels() {
        let parsed: ProductType = serde_json::from_str("\"Red Blood Cells\"").unwrap();
        assert_eq!(parsed, ProductType::RedBloodCells);
        assert_eq!(serde_json::to_string(&ProductType::WholeBlood).unwrap(), "\"Whole Blood\"");
    }

    #[test]
    fn test_antigen_from_str() {
        assert_eq!("Negative".parse::<Antigen>(), Ok(Antigen::Negative));
        assert_eq!("pos".parse::<Antigen>(), Ok(Antigen::Positive));
        assert!("maybe".parse::<Antigen>().is_err());
    }
}
