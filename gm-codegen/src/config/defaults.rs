//! Default configuration values - single source of truth

/// Default configuration file, looked up in the working directory
pub const CONFIG_FILE: &str = "config.ini";

/// Settings file section holding the generator keys
pub const SECTION: &str = "mysql";

/// Prefix for environment overrides (`GM_MYSQL__LINK`, ...)
pub const ENV_PREFIX: &str = "GM";

/// Whether debug logging is enabled by default
pub const DEBUG: bool = false;

/// Formatter value that disables the formatting step
pub const FORMATTER_NONE: &str = "none";

/// Package name used when the output directory has no final path segment
pub const PACKAGE_NAME: &str = "model";
