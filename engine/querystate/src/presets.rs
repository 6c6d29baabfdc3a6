//! Schemas for the convention-listing views.
//!
//! The filter schema and exactly one layout schema are synchronised into the
//! same query string, so field names are distinct across all of them.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::error::QueryStateError;
use crate::field::{scalar, scalar_with_default};
use crate::schema::{schema, Schema};
use crate::types::{array, boolean, float, int, one_of, string, tuple};
use crate::value::Value;

/// Continent codes accepted by the `continents` filter. `XX` marks a
/// convention whose country has no known continent.
pub const CONTINENTS: [&str; 7] = ["NA", "EU", "AS", "SA", "OC", "AF", "XX"];

/// Sort keys of the list layout.
pub const SORT_BY: [&str; 4] = ["date", "name", "attendees", "followed"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
    Filter,
    List,
    Calendar,
    Map,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::Filter, Preset::List, Preset::Calendar, Preset::Map];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Filter => "filter",
            Preset::List => "list",
            Preset::Calendar => "calendar",
            Preset::Map => "map",
        }
    }

    pub fn schema(self) -> Schema {
        match self {
            Preset::Filter => filter_options(),
            Preset::List => list_layout_options(),
            Preset::Calendar => calendar_layout_options(),
            Preset::Map => map_layout_options(),
        }
    }
}

impl Display for Preset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = QueryStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| QueryStateError::UnknownPreset(s.to_string()))
    }
}

/// Search text, attendance toggles, continents and duration bounds.
pub fn filter_options() -> Schema {
    schema([
        ("q", scalar_with_default(string(), "")),
        ("attending", scalar_with_default(boolean(), false)),
        ("followed", scalar_with_default(boolean(), false)),
        (
            "continents",
            scalar_with_default(array(one_of(CONTINENTS), " "), Value::array(CONTINENTS)),
        ),
        ("minDays", scalar_with_default(int(), 1)),
        ("maxDays", scalar_with_default(int(), 7)),
    ])
}

pub fn list_layout_options() -> Schema {
    schema([
        ("sort", scalar_with_default(one_of(SORT_BY), "date")),
        ("desc", scalar_with_default(boolean(), false)),
    ])
}

pub fn calendar_layout_options() -> Schema {
    schema([("inYourTimeZone", scalar_with_default(boolean(), false))])
}

/// Map viewport; absent until the user pans or zooms.
pub fn map_layout_options() -> Schema {
    schema([(
        "center",
        scalar(tuple(
            [("lat", float()), ("lng", float()), ("zoom", float())],
            " ",
        )),
    )])
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::codec::{defaults, equals, parse, serialize};
    use crate::query::QueryParams;
    use crate::record::FieldValue;

    #[test]
    fn preset_names_round_trip() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().expect("preset"), preset);
        }
        assert!(matches!(
            "grid".parse::<Preset>(),
            Err(QueryStateError::UnknownPreset(name)) if name == "grid"
        ));
    }

    #[test]
    fn field_names_are_distinct_across_presets() {
        let mut seen = HashSet::new();
        for preset in Preset::ALL {
            for name in preset.schema().names() {
                assert!(seen.insert(name.to_string()), "duplicate field {name}");
            }
        }
    }

    #[test]
    fn filter_continents_default_is_elided() {
        let schema = filter_options();
        let all = QueryParams::parse("continents=NA+EU+AS+SA+OC+AF+XX");
        let record = parse(&schema, &all);
        assert!(equals(&schema, &record, &defaults(&schema)));
        assert!(serialize(&schema, &record).is_empty());
    }

    #[test]
    fn filter_continents_unknown_code_falls_back() {
        let schema = filter_options();
        let record = parse(&schema, &QueryParams::parse("continents=EU+ZZ"));
        assert_eq!(record.scalar("continents"), Some(&Value::array(CONTINENTS)));

        let record = parse(&schema, &QueryParams::parse("continents=AN"));
        assert_eq!(record.scalar("continents"), Some(&Value::array(CONTINENTS)));

        let record = parse(&schema, &QueryParams::parse("continents=EU+NA"));
        assert_eq!(record.scalar("continents"), Some(&Value::array(["EU", "NA"])));
    }

    #[test]
    fn filter_continents_accept_unknown_marker() {
        let schema = filter_options();
        let record = parse(&schema, &QueryParams::parse("continents=XX"));
        assert_eq!(record.scalar("continents"), Some(&Value::array(["XX"])));
        assert_eq!(
            serialize(&schema, &record).to_query_string(),
            "continents=XX"
        );
    }

    #[test]
    fn filter_continents_default_keeps_declared_order() {
        let schema = filter_options();
        let mut record = defaults(&schema);
        record.set(
            "continents",
            FieldValue::Scalar(Some(Value::array(["NA", "EU", "AS", "SA", "OC", "AF"]))),
        );
        assert_eq!(
            serialize(&schema, &record).to_query_string(),
            "continents=NA+EU+AS+SA+OC+AF"
        );
    }

    #[test]
    fn map_center_is_absent_by_default() {
        let schema = map_layout_options();
        assert!(defaults(&schema).get("center").expect("center").is_absent());

        let record = parse(&schema, &QueryParams::parse("center=51.5+-0.12+9"));
        assert_eq!(
            record.scalar("center"),
            Some(&Value::tuple([("lat", 51.5), ("lng", -0.12), ("zoom", 9.0)]))
        );
        assert_eq!(
            serialize(&schema, &record).to_query_string(),
            "center=51.5+-0.12+9"
        );
    }
}
