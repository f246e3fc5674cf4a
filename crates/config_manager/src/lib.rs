//! Configuration for TeamRoller.
//!
//! Settings are read from environment variables (optionally populated from a `.env`
//! file by the CLI) and validated up front, so invalid values are reported before
//! any remote call is made.

pub mod errors;
pub mod permission;
pub mod settings;
pub mod visibility;

pub use errors::{ConfigurationError, ConfigurationResult};
pub use permission::Permission;
pub use settings::{GitAuthor, RepositoryDefaults, RetrySettings, RosterSettings, Settings};
pub use visibility::RepositoryVisibility;
