//! Occurrence counts per field value
//!
//! Counts keep the order in which values were first seen. "Most frequent"
//! picks the highest count and, on ties, the value seen first, so the answer
//! is stable for a given input order rather than alphabetical.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::models::Vehicle;

/// Label used for vehicles with no value for the grouped field
pub const UNSPECIFIED: &str = "N/A";

/// Field a report can be grouped by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupField {
    #[default]
    Category,
    Make,
    Model,
}

impl GroupField {
    /// Value of this field for a vehicle, if present
    pub fn value<'a>(&self, vehicle: &'a Vehicle) -> Option<&'a str> {
        let raw = match self {
            Self::Category => vehicle.category.as_deref(),
            Self::Make => Some(vehicle.make.as_str()),
            Self::Model => Some(vehicle.model.as_str()),
        };
        raw.map(str::trim).filter(|s| !s.is_empty())
    }
}

impl fmt::Display for GroupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category => write!(f, "category"),
            Self::Make => write!(f, "make"),
            Self::Model => write!(f, "model"),
        }
    }
}

/// A distinct value and how often it occurred
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    pub value: String,
    pub count: usize,
}

/// Counts in first-seen order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupCounts {
    field: GroupField,
    entries: Vec<GroupCount>,
}

impl GroupCounts {
    /// Count vehicles per value of `field`; missing values count as [`UNSPECIFIED`]
    pub fn by<'a, I>(field: GroupField, vehicles: I) -> Self
    where
        I: IntoIterator<Item = &'a Vehicle>,
    {
        let mut entries: Vec<GroupCount> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for vehicle in vehicles {
            let value = field.value(vehicle).unwrap_or(UNSPECIFIED);
            match index.get(value) {
                Some(&i) => entries[i].count += 1,
                None => {
                    index.insert(value.to_string(), entries.len());
                    entries.push(GroupCount {
                        value: value.to_string(),
                        count: 1,
                    });
                }
            }
        }

        Self { field, entries }
    }

    pub fn field(&self) -> GroupField {
        self.field
    }

    /// Entries in first-seen order
    pub fn entries(&self) -> &[GroupCount] {
        &self.entries
    }

    /// Highest count; ties go to the value seen first
    pub fn most_frequent(&self) -> Option<&GroupCount> {
        self.entries.iter().fold(None, |best, entry| match best {
            Some(b) if b.count >= entry.count => Some(b),
            _ => Some(entry),
        })
    }

    /// Entries ordered by count, ties kept in first-seen order
    pub fn ranked(&self) -> Vec<&GroupCount> {
        let mut ranked: Vec<&GroupCount> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn vehicle(make: &str, model: &str, category: Option<&str>) -> Vehicle {
        let mut v = Vehicle::new(make, model, 2020, Money::zero());
        v.category = category.map(String::from);
        v
    }

    #[test]
    fn test_counts_in_first_seen_order() {
        let vehicles = vec![
            vehicle("Fiat", "Uno", Some("hatch")),
            vehicle("VW", "Gol", Some("hatch")),
            vehicle("Jeep", "Compass", Some("suv")),
        ];
        let counts = GroupCounts::by(GroupField::Make, &vehicles);
        let values: Vec<_> = counts.entries().iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, vec!["Fiat", "VW", "Jeep"]);

        let categories = GroupCounts::by(GroupField::Category, &vehicles);
        assert_eq!(categories.most_frequent().unwrap().value, "hatch");
        assert_eq!(categories.most_frequent().unwrap().count, 2);
    }

    #[test]
    fn test_tie_goes_to_first_encountered() {
        let vehicles = vec![
            vehicle("A", "m", Some("suv")),
            vehicle("B", "m", Some("sedan")),
            vehicle("C", "m", Some("sedan")),
            vehicle("D", "m", Some("suv")),
        ];
        let counts = GroupCounts::by(GroupField::Category, &vehicles);
        assert_eq!(counts.most_frequent().unwrap().value, "suv");

        let reversed: Vec<_> = vehicles.iter().rev().cloned().collect();
        let counts = GroupCounts::by(GroupField::Category, &reversed);
        assert_eq!(counts.most_frequent().unwrap().value, "suv");

        let sedan_first = vec![vehicles[1].clone(), vehicles[0].clone(), vehicles[3].clone(), vehicles[2].clone()];
        let counts = GroupCounts::by(GroupField::Category, &sedan_first);
        assert_eq!(counts.most_frequent().unwrap().value, "sedan");
    }

    #[test]
    fn test_missing_values_are_unspecified() {
        let vehicles = vec![vehicle("A", "m", None), vehicle("B", "m", Some("  "))];
        let counts = GroupCounts::by(GroupField::Category, &vehicles);
        assert_eq!(counts.entries().len(), 1);
        assert_eq!(counts.entries()[0].value, UNSPECIFIED);
        assert_eq!(counts.entries()[0].count, 2);
    }

    #[test]
    fn test_empty_input() {
        let counts = GroupCounts::by(GroupField::Model, std::iter::empty());
        assert!(counts.is_empty());
        assert!(counts.most_frequent().is_none());
    }

    #[test]
    fn test_ranked_is_stable() {
        let vehicles = vec![
            vehicle("A", "x", None),
            vehicle("B", "y", None),
            vehicle("B", "z", None),
            vehicle("C", "w", None),
        ];
        let counts = GroupCounts::by(GroupField::Make, &vehicles);
        let ranked: Vec<_> = counts.ranked().iter().map(|e| e.value.as_str()).collect();
        assert_eq!(ranked, vec!["B", "A", "C"]);
    }
}
