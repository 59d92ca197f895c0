//! Global constants used throughout the assetgraph codebase.
//!
//! Naming limits, file names, and environment variable names that are
//! shared across modules live here so the numbers stay discoverable.

/// Number of random characters appended to every infra ID.
pub const RANDOM_SUFFIX_LEN: usize = 5;

/// Alphabet the random infra ID suffix is drawn from.
///
/// Lowercase consonants and digits only. Vowels and look-alike characters
/// (`0`, `1`, `3`, `a`, `e`, `i`, `o`, `u`, `y`) are left out so generated
/// suffixes never spell words and survive case-insensitive systems.
pub const SUFFIX_ALPHABET: &[u8] = b"bcdfghjklmnpqrstvwxz2456789";

/// Default maximum infra ID length.
///
/// Resources named after the infra ID usually append suffixes like
/// `-int`, `-ext` or `-ctlp`, and most provider limits sit around 32
/// characters.
pub const DEFAULT_INFRA_ID_MAX_LEN: usize = 27;

/// Maximum infra ID length on GCP.
///
/// GCP instance names are prefixed with the infra ID and have a hard
/// API limit.
pub const GCP_INFRA_ID_MAX_LEN: usize = 12;

/// Smallest `max_len` the infra ID deriver accepts (separator + suffix).
pub const MIN_INFRA_ID_MAX_LEN: usize = RANDOM_SUFFIX_LEN + 1;

/// Default file name of the user-supplied install configuration.
pub const INSTALL_CONFIG_FILENAME: &str = "install-config.yaml";

/// Environment variable overriding the tool settings file location.
pub const CONFIG_PATH_ENV: &str = "ASSETGRAPH_CONFIG";

/// Directory (under the home directory) holding the tool settings file.
pub const CONFIG_DIR_NAME: &str = ".assetgraph";

/// File name of the tool settings file.
pub const CONFIG_FILENAME: &str = "config.toml";
