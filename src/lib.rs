pub mod services;
pub mod types;

/// Reserved prefix for scratch extraction directories, so they are
/// distinguishable from user files in the working directory.
pub const SCRATCH_DIR_PREFIX: &str = ".theme-extract-";
