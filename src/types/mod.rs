pub mod errors;
pub mod package;
pub mod theme;

pub use errors::{AcquireError, AcquireResult};
pub use package::{
    AcquisitionResult, Engines, Manifest, PackageInfo, PackageType, ThemeContribution,
};
pub use theme::{ScopeSelector, SemanticTokenStyle, ThemeDocument, TokenColorRule, TokenSettings};

#[cfg(test)]
#[path = "tests/theme_tests.rs"]
mod theme_tests;

#[cfg(test)]
#[path = "tests/package_tests.rs"]
mod package_tests;
