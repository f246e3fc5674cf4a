//! Git author identity used for commits the tooling makes on the operator's machine.

use config_manager::GitAuthor;
use git2::Config;
use tracing::info;

use crate::errors::TeamRollerResult;

#[cfg(test)]
#[path = "git_author_tests.rs"]
mod tests;

/// Writes `user.name` and `user.email` into the operator's global git configuration.
///
/// # Errors
///
/// Returns [`Error::GitConfig`](crate::Error::GitConfig) when no global
/// configuration file can be opened or written.
pub fn configure_global_git_author(author: &GitAuthor) -> TeamRollerResult<()> {
    let mut global = Config::open_default()?.open_global()?;
    apply_git_author(&mut global, author)?;
    info!(
        name = %author.name,
        email = %author.email,
        "Configured Git user"
    );
    Ok(())
}

/// Sets the author identity on an open configuration.
pub fn apply_git_author(config: &mut Config, author: &GitAuthor) -> Result<(), git2::Error> {
    config.set_str("user.name", &author.name)?;
    config.set_str("user.email", &author.email)?;
    Ok(())
}
