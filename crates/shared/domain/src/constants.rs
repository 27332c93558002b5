//! Domain-level constants.
//!
//! Names shared between configuration, persistence and the web layer.

// =============================================================================
// Datasources
// =============================================================================

/// Name of the primary datasource
pub const DATASOURCE_PRIMARY: &str = "primary";

/// Name of the secondary datasource
pub const DATASOURCE_SECONDARY: &str = "secondary";

// =============================================================================
// Stored routines
// =============================================================================

/// Operation name of the first person count routine
pub const OP_PERSON_COUNT: &str = "get_person_count";

/// Operation name of the second person count routine
pub const OP_PERSON_COUNT_2: &str = "get_person_count_2";

/// Operation name of the third person count routine (primary only)
pub const OP_PERSON_COUNT_3: &str = "get_person_count_3";

/// Routine bound to `get_person_count` unless overridden
pub const DEFAULT_PERSON_COUNT_ROUTINE: &str = "public.get_person_count";

/// Routine bound to `get_person_count_2` unless overridden
pub const DEFAULT_PERSON_COUNT_2_ROUTINE: &str = "schema1.get_person_count";
