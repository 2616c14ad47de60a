//! Trip records and their wire translation.
//!
//! A [`Trip`] is read-only once loaded: the catalogue hands out shared references and the
//! matcher only ever reads fields. Conversion to [`TripRecord`] happens at the API boundary.

use api_shared::TripRecord;
use serde::{Deserialize, Deserializer, Serialize};
use trips_types::NonEmptyText;

/// A travel listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    /// Stable identifier. Catalogue files may spell this `eid` and may use a number.
    #[serde(alias = "eid", deserialize_with = "string_or_number")]
    pub id: String,
    pub title: NonEmptyText,
    #[serde(default)]
    pub description: String,
    /// Labels in source order; order carries no meaning for matching.
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub url: String,
}

impl Trip {
    /// Text fields searched by the matcher, in the order they are tried.
    pub fn searchable_text(&self) -> impl Iterator<Item = &str> {
        [self.title.as_str(), self.description.as_str()]
            .into_iter()
            .chain(self.tags.iter().map(String::as_str))
    }
}

impl From<&Trip> for TripRecord {
    fn from(trip: &Trip) -> Self {
        TripRecord {
            id: trip.id.clone(),
            title: trip.title.as_str().to_owned(),
            description: trip.description.clone(),
            tags: trip.tags.clone(),
            photos: trip.photos.clone(),
            url: trip.url.clone(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Text(text) if text.trim().is_empty() => {
            Err(serde::de::Error::custom("trip id cannot be empty"))
        }
        RawId::Text(text) => Ok(text),
        RawId::Number(number) => Ok(number.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_eid_alias_and_numeric_ids() {
        let trip: Trip = serde_yaml::from_str(
            r#"
eid: 12
title: Old Town Walk
"#,
        )
        .expect("parse trip");
        assert_eq!(trip.id, "12");
        assert!(trip.tags.is_empty());
        assert!(trip.photos.is_empty());
    }

    #[test]
    fn rejects_blank_title() {
        let err = serde_yaml::from_str::<Trip>("id: a\ntitle: '  '\n").expect_err("blank title");
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn searchable_text_covers_title_description_and_tags() {
        let trip = Trip {
            id: "1".into(),
            title: NonEmptyText::new("Beach Trip").unwrap(),
            description: "Warm water".into(),
            tags: vec!["sun".into(), "sand".into()],
            photos: vec![],
            url: String::new(),
        };
        let fields: Vec<&str> = trip.searchable_text().collect();
        assert_eq!(fields, vec!["Beach Trip", "Warm water", "sun", "sand"]);
    }

    #[test]
    fn converts_to_wire_record() {
        let trip = Trip {
            id: "9".into(),
            title: NonEmptyText::new("Mountain Hike").unwrap(),
            description: "Up we go".into(),
            tags: vec!["cold".into()],
            photos: vec!["https://img.example.com/1.jpg".into()],
            url: "https://trips.example.com/9".into(),
        };
        let record = TripRecord::from(&trip);
        assert_eq!(record.id, "9");
        assert_eq!(record.title, "Mountain Hike");
        assert_eq!(record.tags, vec!["cold"]);
        assert_eq!(record.photos.len(), 1);
    }
}
