use crate::error::SubmissionError;

use super::model::NameSet;

/// Shown after a successful submission.
pub const SUBMITTED_MESSAGE: &str = "Insight successfully submitted!";

/// The "Submit an Insight" form. Submissions are reviewed by hand and are
/// not stored by the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsightDraft {
    pub name: String,
    pub insight: String,
}

impl InsightDraft {
    /// Accept the draft for the plot built from `indicators`. Every field
    /// must be filled and at least one indicator plotted.
    pub fn submit(&self, indicators: &NameSet) -> Result<&'static str, SubmissionError> {
        if self.name.trim().is_empty() || self.insight.trim().is_empty() || indicators.is_empty()
        {
            return Err(SubmissionError::MissingFields);
        }
        log::info!(
            "Insight from {} about {} indicator(s) received",
            self.name.trim(),
            indicators.len()
        );
        Ok(SUBMITTED_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::*;

    fn draft(name: &str, insight: &str) -> InsightDraft {
        InsightDraft {
            name: name.to_string(),
            insight: insight.to_string(),
        }
    }

    #[test]
    fn complete_form_is_accepted() {
        let result = draft("Asha", "GDP doubled after 2005").submit(&names(&[GDP]));
        assert_eq!(result, Ok(SUBMITTED_MESSAGE));
    }

    #[test]
    fn any_missing_field_is_rejected() {
        let indicators = names(&[GDP]);
        assert_eq!(
            draft("", "text").submit(&indicators),
            Err(SubmissionError::MissingFields)
        );
        assert_eq!(
            draft("Asha", "   ").submit(&indicators),
            Err(SubmissionError::MissingFields)
        );
        assert_eq!(
            draft("Asha", "text").submit(&NameSet::new()),
            Err(SubmissionError::MissingFields)
        );
        assert_eq!(
            SubmissionError::MissingFields.to_string(),
            "Please fill all fields!"
        );
    }
}
