//! Confirmation gate for destructive operations.

#[cfg(test)]
#[path = "confirm_tests.rs"]
mod tests;

/// Asks the operator to approve an action.
///
/// Implemented for any `Fn(&str) -> bool`, so tests can pass a closure and the CLI
/// can pass a stdin prompt.
pub trait Confirm {
    /// Shows `prompt` and returns true only when the operator approved.
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Returns true when an answer is exactly the word `yes`, in any letter case.
///
/// Surrounding whitespace is not stripped; callers reading a line remove the
/// line ending themselves.
pub fn is_affirmative(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("yes")
}
