use serde::Serialize;
use std::collections::HashMap;

/// Outcome of a successful [`PathPattern`](super::PathPattern) match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchingResult {
    variables: HashMap<String, String>,
    final_matching_group: String,
    final_capturing_group: String,
    number_of_variables: usize,
}

impl MatchingResult {
    pub fn new(
        variables: HashMap<String, String>,
        final_matching_group: String,
        final_capturing_group: String,
        number_of_variables: usize,
    ) -> Self {
        Self {
            variables,
            final_matching_group,
            final_capturing_group,
            number_of_variables,
        }
    }

    pub fn variables(&self) -> &HashMap<String, String> {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(String::as_str)
    }

    /// The unmatched suffix: empty, or starting with `/`.
    pub fn final_matching_group(&self) -> &str {
        &self.final_matching_group
    }

    /// Decides whether a match is exact (JSR-311 section 3.7.2, step 3.a.1).
    pub fn final_capturing_group(&self) -> &str {
        &self.final_capturing_group
    }

    pub fn number_of_variables(&self) -> usize {
        self.number_of_variables
    }

    pub fn is_final_capturing_group_empty_or_slash(&self) -> bool {
        self.final_capturing_group.is_empty() || self.final_capturing_group == "/"
    }

    pub fn into_variables(self) -> HashMap<String, String> {
        self.variables
    }
}
