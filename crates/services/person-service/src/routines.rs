//! Stored routine bindings.
//!
//! Every count operation a repository exposes is resolved through an explicit
//! table of `(datasource, operation) -> routine name` entries. The table is
//! built once at startup; malformed or empty routine names are rejected there,
//! so a running service only ever sees well-formed names. Operations that have
//! no entry at all fail when invoked.

use std::collections::BTreeMap;
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use common::{AppError, AppResult};
use domain::{
    Datasource, DEFAULT_PERSON_COUNT_2_ROUTINE, DEFAULT_PERSON_COUNT_ROUTINE, OP_PERSON_COUNT,
    OP_PERSON_COUNT_2, OP_PERSON_COUNT_3,
};

/// `name` or `schema.name`, plain SQL identifiers only.
static ROUTINE_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
        .expect("routine name pattern is valid")
});

/// Count operations backed by stored routines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CountRoutine {
    PersonCount,
    PersonCount2,
    /// Declared on the primary datasource only, with no routine bound by default.
    PersonCount3,
}

impl CountRoutine {
    pub const ALL: [CountRoutine; 3] = [
        CountRoutine::PersonCount,
        CountRoutine::PersonCount2,
        CountRoutine::PersonCount3,
    ];

    /// Operation name as used in bindings and error messages
    pub fn operation(&self) -> &'static str {
        match self {
            CountRoutine::PersonCount => OP_PERSON_COUNT,
            CountRoutine::PersonCount2 => OP_PERSON_COUNT_2,
            CountRoutine::PersonCount3 => OP_PERSON_COUNT_3,
        }
    }

    /// Routine bound when configuration does not say otherwise
    pub fn default_routine(&self) -> Option<&'static str> {
        match self {
            CountRoutine::PersonCount => Some(DEFAULT_PERSON_COUNT_ROUTINE),
            CountRoutine::PersonCount2 => Some(DEFAULT_PERSON_COUNT_2_ROUTINE),
            CountRoutine::PersonCount3 => None,
        }
    }

    /// Whether a repository for `datasource` exposes this operation at all
    pub fn is_supported_on(&self, datasource: Datasource) -> bool {
        match self {
            CountRoutine::PersonCount3 => datasource == Datasource::Primary,
            _ => true,
        }
    }

    /// Environment variable that overrides the binding, e.g. `PRIMARY_GET_PERSON_COUNT_2_ROUTINE`
    pub fn env_key(&self, datasource: Datasource) -> String {
        format!(
            "{}_{}_ROUTINE",
            datasource.env_prefix(),
            self.operation().to_ascii_uppercase()
        )
    }
}

impl fmt::Display for CountRoutine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation())
    }
}

/// A validated, optionally schema-qualified routine name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineName(String);

impl RoutineName {
    /// Validate a raw routine name.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        ROUTINE_NAME_PATTERN
            .is_match(trimmed)
            .then(|| RoutineName(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoutineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A declared binding, as it comes from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineBinding {
    pub datasource: Datasource,
    pub routine: CountRoutine,
    pub name: String,
}

impl RoutineBinding {
    pub fn new(datasource: Datasource, routine: CountRoutine, name: impl Into<String>) -> Self {
        Self {
            datasource,
            routine,
            name: name.into(),
        }
    }
}

/// Validated routine table for all datasources.
#[derive(Debug, Clone, Default)]
pub struct RoutineTable {
    entries: BTreeMap<(Datasource, CountRoutine), RoutineName>,
}

impl RoutineTable {
    /// Bindings used when nothing is configured: both working counts on both datasources.
    pub fn default_bindings() -> Vec<RoutineBinding> {
        Datasource::ALL
            .iter()
            .flat_map(|&datasource| {
                CountRoutine::ALL.iter().filter_map(move |&routine| {
                    routine
                        .default_routine()
                        .map(|name| RoutineBinding::new(datasource, routine, name))
                })
            })
            .collect()
    }

    /// Build and validate the table.
    ///
    /// Fails on an empty or malformed routine name, on a binding for an
    /// operation the datasource does not expose, and on duplicate bindings.
    pub fn from_bindings(bindings: impl IntoIterator<Item = RoutineBinding>) -> AppResult<Self> {
        let mut entries = BTreeMap::new();

        for binding in bindings {
            let RoutineBinding {
                datasource,
                routine,
                name,
            } = binding;

            if !routine.is_supported_on(datasource) {
                return Err(AppError::config(format!(
                    "'{}' is not available on the {} datasource",
                    routine, datasource
                )));
            }

            if name.trim().is_empty() {
                return Err(AppError::config(format!(
                    "Routine binding for '{}' on the {} datasource has an empty routine name",
                    routine, datasource
                )));
            }

            let resolved = RoutineName::parse(&name).ok_or_else(|| {
                AppError::config(format!(
                    "Routine name '{}' for '{}' on the {} datasource is not a valid identifier",
                    name, routine, datasource
                ))
            })?;

            if entries.insert((datasource, routine), resolved).is_some() {
                return Err(AppError::config(format!(
                    "'{}' is bound more than once on the {} datasource",
                    routine, datasource
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Bindings belonging to a single datasource.
    pub fn for_datasource(&self, datasource: Datasource) -> RoutineBindings {
        let entries = self
            .entries
            .iter()
            .filter(|((ds, _), _)| *ds == datasource)
            .map(|((_, routine), name)| (*routine, name.clone()))
            .collect();

        RoutineBindings {
            datasource,
            entries,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Resolved routines for one datasource, held by its repository.
#[derive(Debug, Clone)]
pub struct RoutineBindings {
    datasource: Datasource,
    entries: BTreeMap<CountRoutine, RoutineName>,
}

impl RoutineBindings {
    pub fn datasource(&self) -> Datasource {
        self.datasource
    }

    /// Look up the routine bound to `routine`.
    pub fn resolve(&self, routine: CountRoutine) -> AppResult<&RoutineName> {
        self.entries
            .get(&routine)
            .ok_or_else(|| AppError::unbound_routine(routine.operation(), self.datasource))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_table() -> RoutineTable {
        RoutineTable::from_bindings(RoutineTable::default_bindings()).unwrap()
    }

    #[test]
    fn defaults_bind_both_working_counts_everywhere() {
        let table = default_table();
        assert_eq!(table.len(), 4);

        for datasource in Datasource::ALL {
            let bindings = table.for_datasource(datasource);
            assert_eq!(
                bindings.resolve(CountRoutine::PersonCount).unwrap().as_str(),
                "public.get_person_count"
            );
            assert_eq!(
                bindings.resolve(CountRoutine::PersonCount2).unwrap().as_str(),
                "schema1.get_person_count"
            );
        }
    }

    #[test]
    fn third_count_is_unbound_by_default() {
        let bindings = default_table().for_datasource(Datasource::Primary);
        let err = bindings.resolve(CountRoutine::PersonCount3).unwrap_err();
        match err {
            AppError::RoutineResolution {
                operation,
                datasource,
            } => {
                assert_eq!(operation, "get_person_count_3");
                assert_eq!(datasource, Datasource::Primary);
            }
            other => panic!("expected resolution error, got {:?}", other),
        }
    }

    #[test]
    fn empty_routine_name_is_rejected_at_build_time() {
        let mut bindings = RoutineTable::default_bindings();
        bindings.push(RoutineBinding::new(
            Datasource::Primary,
            CountRoutine::PersonCount3,
            "",
        ));

        let err = RoutineTable::from_bindings(bindings).unwrap_err();
        assert!(matches!(err, AppError::Config(ref msg) if msg.contains("empty routine name")));
    }

    #[test]
    fn malformed_routine_name_is_rejected() {
        let err = RoutineTable::from_bindings(vec![RoutineBinding::new(
            Datasource::Secondary,
            CountRoutine::PersonCount,
            "public.get_person_count(); drop table person",
        )])
        .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn third_count_cannot_be_bound_on_secondary() {
        let err = RoutineTable::from_bindings(vec![RoutineBinding::new(
            Datasource::Secondary,
            CountRoutine::PersonCount3,
            "public.get_person_count",
        )])
        .unwrap_err();
        assert!(matches!(err, AppError::Config(ref msg) if msg.contains("not available")));
    }

    #[test]
    fn duplicate_binding_is_rejected() {
        let binding = RoutineBinding::new(
            Datasource::Primary,
            CountRoutine::PersonCount,
            "public.get_person_count",
        );
        let err = RoutineTable::from_bindings(vec![binding.clone(), binding]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn env_keys_follow_datasource_and_operation() {
        assert_eq!(
            CountRoutine::PersonCount2.env_key(Datasource::Secondary),
            "SECONDARY_GET_PERSON_COUNT_2_ROUTINE"
        );
    }

    #[test]
    fn routine_names_allow_optional_schema() {
        assert!(RoutineName::parse("get_person_count").is_some());
        assert!(RoutineName::parse(" schema1.get_person_count ").is_some());
        assert!(RoutineName::parse("a.b.c").is_none());
        assert!(RoutineName::parse("1abc").is_none());
    }
}
