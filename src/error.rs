use std::num::ParseIntError;

/// Failures of the dataset queries driven by user input.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("minimum percentage '{input}' is not a whole number")]
    InvalidPercent {
        input: String,
        #[source]
        source: ParseIntError,
    },
}

pub type QueryResult<T> = Result<T, QueryError>;

/// Failures of the "Submit an Insight" form.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Please fill all fields!")]
    MissingFields,
}
