//! Filter evaluation
//!
//! Values are compared in their native types: numbers as `f64`, flags as
//! `bool` (`false < true`). A record that does not carry the filtered field
//! never matches.

use crate::model::{NearEarthObject, OrbitPath, RecordKind};
use crate::planner::{Filter, FilterField, FilterValue};

/// A record a filter can read fields from
pub trait Filterable {
    /// Kind of this record
    const KIND: RecordKind;

    /// Returns the value of `field`, or None if this kind has no such field
    fn field_value(&self, field: FilterField) -> Option<FilterValue>;
}

impl Filterable for NearEarthObject {
    const KIND: RecordKind = RecordKind::Object;

    fn field_value(&self, field: FilterField) -> Option<FilterValue> {
        match field {
            FilterField::Diameter => Some(FilterValue::Number(self.diameter_min_km())),
            FilterField::IsHazardous => {
                Some(FilterValue::Flag(self.is_potentially_hazardous_asteroid()))
            }
            FilterField::Distance => None,
        }
    }
}

impl Filterable for OrbitPath {
    const KIND: RecordKind = RecordKind::Path;

    fn field_value(&self, field: FilterField) -> Option<FilterValue> {
        match field {
            FilterField::Distance => Some(FilterValue::Number(self.miss_distance_kilometers())),
            FilterField::Diameter | FilterField::IsHazardous => None,
        }
    }
}

impl Filter {
    /// Checks a single record
    pub fn matches<T: Filterable>(&self, record: &T) -> bool {
        if self.field().owner() != T::KIND {
            return false;
        }

        match (record.field_value(self.field()), self.value()) {
            (Some(FilterValue::Number(actual)), FilterValue::Number(literal)) => {
                self.op().compare(&actual, &literal)
            }
            (Some(FilterValue::Flag(actual)), FilterValue::Flag(literal)) => {
                self.op().compare(&actual, &literal)
            }
            _ => false,
        }
    }

    /// Keeps the records that match, preserving order
    pub fn apply<'a, T: Filterable>(&self, records: Vec<&'a T>) -> Vec<&'a T> {
        records
            .into_iter()
            .filter(|record| self.matches(*record))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neo(name: &str, hazardous: bool, diameter: f64) -> NearEarthObject {
        NearEarthObject::new("1", name, hazardous, diameter, diameter * 2.0)
    }

    fn filter(raw: &str) -> Filter {
        Filter::parse(raw).unwrap().unwrap()
    }

    #[test]
    fn test_numeric_comparison_is_native() {
        let small = neo("small", false, 9.0);
        let large = neo("large", false, 10.0);

        // Textual comparison would rank "9" above "10".
        let kept = filter("diameter:>:9.5").apply(vec![&small, &large]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name(), "large");
    }

    #[test]
    fn test_apply_preserves_order() {
        let a = neo("a", false, 3.0);
        let b = neo("b", false, 1.0);
        let c = neo("c", false, 2.0);

        let kept = filter("diameter:>=:2").apply(vec![&a, &b, &c]);
        let names: Vec<&str> = kept.iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_hazard_flag() {
        let safe = neo("safe", false, 1.0);
        let danger = neo("danger", true, 1.0);

        let kept = filter("is_hazardous:=:True").apply(vec![&safe, &danger]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name(), "danger");

        let kept = filter("is_hazardous:>=:false").apply(vec![&safe, &danger]);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_distance_applies_to_paths() {
        let near = OrbitPath::new("X", "2020-01-01", 500.0, 0);
        let far = OrbitPath::new("X", "2020-01-02", 50_000.0, 1);

        let kept = filter("distance:>=:10000").apply(vec![&near, &far]);
        assert_eq!(kept, vec![&far]);
    }

    #[test]
    fn test_field_of_other_kind_never_matches() {
        let object = neo("x", true, 1.0);
        assert!(!filter("distance:>=:0").matches(&object));

        let path = OrbitPath::new("X", "2020-01-01", 500.0, 0);
        assert!(!filter("diameter:>=:0").matches(&path));
    }

    #[test]
    fn test_equality_on_numbers() {
        let exact = neo("exact", false, 0.25);
        assert!(filter("diameter:=:0.25").matches(&exact));
        assert!(!filter("diameter:=:0.250001").matches(&exact));
    }
}
