//! Repository naming convention.

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;

/// Derives the repository name for a team.
///
/// The team name is lowercased and every space becomes a hyphen. No other
/// characters are touched, so anything GitHub rejects is reported by GitHub.
///
/// ```rust
/// use team_roller_core::repository_name;
///
/// assert_eq!(repository_name("hackathon-", "Team Alpha"), "hackathon-team-alpha");
/// ```
pub fn repository_name(prefix: &str, team_name: &str) -> String {
    format!("{}{}", prefix, team_name.to_lowercase().replace(' ', "-"))
}
