//! Centralized constants for the confkit workspace.
//!
//! Default values shared by the loader, the facade and the CLI.

// =============================================================================
// File Locations
// =============================================================================

/// Config file used by the facade when no explicit path has been set.
pub const DEFAULT_CONFIG_FILE: &str = "conf/conf.ini";

// =============================================================================
// Format Dispatch
// =============================================================================

/// Path suffix that selects the YAML backend.
pub const YAML_SUFFIX: &str = "yaml";

/// Path suffix that selects the INI backend without rewriting the path.
pub const INI_SUFFIX: &str = ".ini";

/// Name under which the unnamed leading section of an INI file is addressed.
pub const DEFAULT_SECTION: &str = "DEFAULT";

// =============================================================================
// Lookups
// =============================================================================

/// Delimiter used by the facade's array accessors.
pub const DEFAULT_ARRAY_DELIMITER: &str = " ";
