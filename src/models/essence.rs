// src/models/essence.rs
// DOCUMENTATION: What a photo depicts
// PURPOSE: Replace the basic_key string + three nullable foreign keys with one tagged value

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Kind of essence a photo is tagged with (the `basic_key` column)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EssenceKind {
    #[default]
    Item,
    City,
    Country,
}

impl EssenceKind {
    /// Lookup order used when a bare name is resolved across collections
    pub const NAME_PRIORITY: [EssenceKind; 3] =
        [EssenceKind::Country, EssenceKind::City, EssenceKind::Item];

    pub fn as_str(&self) -> &'static str {
        match self {
            EssenceKind::Item => "item",
            EssenceKind::City => "city",
            EssenceKind::Country => "country",
        }
    }

    /// Foreign key column on `photos` pointing at this kind
    pub fn photo_column(&self) -> &'static str {
        match self {
            EssenceKind::Item => "item_id",
            EssenceKind::City => "city_id",
            EssenceKind::Country => "country_id",
        }
    }
}

impl fmt::Display for EssenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown essence kind '{0}'")]
pub struct UnknownEssenceKind(pub String);

/// Stored photo columns that do not describe exactly one essence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EssenceMismatch {
    #[error(transparent)]
    UnknownKind(#[from] UnknownEssenceKind),

    #[error("basic_key '{basic_key}' disagrees with references (item: {item_id:?}, city: {city_id:?}, country: {country_id:?})")]
    References {
        basic_key: EssenceKind,
        item_id: Option<Uuid>,
        city_id: Option<Uuid>,
        country_id: Option<Uuid>,
    },
}

impl FromStr for EssenceKind {
    type Err = UnknownEssenceKind;

    /// Exact match on the stored discriminator values
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "item" => Ok(EssenceKind::Item),
            "city" => Ok(EssenceKind::City),
            "country" => Ok(EssenceKind::Country),
            other => Err(UnknownEssenceKind(other.to_string())),
        }
    }
}

/// The single subject a photo depicts, carrying the referenced record's id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Essence {
    Item(Uuid),
    City(Uuid),
    Country(Uuid),
}

impl Essence {
    pub fn kind(&self) -> EssenceKind {
        match self {
            Essence::Item(_) => EssenceKind::Item,
            Essence::City(_) => EssenceKind::City,
            Essence::Country(_) => EssenceKind::Country,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Essence::Item(id) | Essence::City(id) | Essence::Country(id) => *id,
        }
    }

    /// Split into the `(basic_key, item_id, city_id, country_id)` column values
    pub fn to_columns(&self) -> (&'static str, Option<Uuid>, Option<Uuid>, Option<Uuid>) {
        match *self {
            Essence::Item(id) => ("item", Some(id), None, None),
            Essence::City(id) => ("city", None, Some(id), None),
            Essence::Country(id) => ("country", None, None, Some(id)),
        }
    }

    /// Rebuild from stored columns
    /// DOCUMENTATION: Exactly one reference must be set and it must match
    /// `basic_key`; anything else is an `EssenceMismatch`.
    pub fn from_columns(
        basic_key: &str,
        item_id: Option<Uuid>,
        city_id: Option<Uuid>,
        country_id: Option<Uuid>,
    ) -> Result<Self, EssenceMismatch> {
        let kind = basic_key.parse::<EssenceKind>()?;

        match (kind, item_id, city_id, country_id) {
            (EssenceKind::Item, Some(id), None, None) => Ok(Essence::Item(id)),
            (EssenceKind::City, None, Some(id), None) => Ok(Essence::City(id)),
            (EssenceKind::Country, None, None, Some(id)) => Ok(Essence::Country(id)),
            _ => Err(EssenceMismatch::References {
                basic_key: kind,
                item_id,
                city_id,
                country_id,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("item".parse::<EssenceKind>(), Ok(EssenceKind::Item));
        assert_eq!("city".parse::<EssenceKind>(), Ok(EssenceKind::City));
        assert_eq!("country".parse::<EssenceKind>(), Ok(EssenceKind::Country));
        assert!("person".parse::<EssenceKind>().is_err());
        assert!("City".parse::<EssenceKind>().is_err());
        assert!("".parse::<EssenceKind>().is_err());
    }

    #[test]
    fn test_default_kind_is_item() {
        assert_eq!(EssenceKind::default(), EssenceKind::Item);
    }

    #[test]
    fn test_name_priority_order() {
        assert_eq!(
            EssenceKind::NAME_PRIORITY,
            [EssenceKind::Country, EssenceKind::City, EssenceKind::Item]
        );
    }

    #[test]
    fn test_columns_agree_with_kind() {
        let id = Uuid::new_v4();
        let (key, item, city, country) = Essence::City(id).to_columns();

        assert_eq!(key, "city");
        assert_eq!(item, None);
        assert_eq!(city, Some(id));
        assert_eq!(country, None);
        assert_eq!(key, Essence::City(id).kind().as_str());
    }

    #[test]
    fn test_from_columns_rejects_mismatch() {
        let id = Uuid::new_v4();

        assert_eq!(
            Essence::from_columns("country", None, None, Some(id)),
            Ok(Essence::Country(id))
        );
        // Reference does not match discriminator
        assert_eq!(
            Essence::from_columns("item", None, Some(id), None),
            Err(EssenceMismatch::References {
                basic_key: EssenceKind::Item,
                item_id: None,
                city_id: Some(id),
                country_id: None,
            })
        );
        // No reference at all
        assert!(matches!(
            Essence::from_columns("item", None, None, None),
            Err(EssenceMismatch::References { .. })
        ));
        // Two references
        assert!(matches!(
            Essence::from_columns("city", Some(id), Some(id), None),
            Err(EssenceMismatch::References { .. })
        ));
        // Unknown discriminator
        assert_eq!(
            Essence::from_columns("tag", Some(id), None, None),
            Err(EssenceMismatch::UnknownKind(UnknownEssenceKind(
                "tag".to_string()
            )))
        );
    }

    #[test]
    fn test_mismatch_messages() {
        assert_eq!(
            UnknownEssenceKind("person".to_string()).to_string(),
            "unknown essence kind 'person'"
        );

        let err = Essence::from_columns("country", None, None, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "basic_key 'country' disagrees with references (item: None, city: None, country: None)"
        );
    }

    #[test]
    fn test_serde_shape() {
        let id = Uuid::nil();
        let json = serde_json::to_value(Essence::Country(id)).unwrap();

        assert_eq!(json["kind"], "country");
        assert_eq!(json["id"], id.to_string());

        let back: Essence = serde_json::from_value(json).unwrap();
        assert_eq!(back, Essence::Country(id));
    }
}
