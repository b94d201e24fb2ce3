//! Cross-field validation of a parsed submission

use chrono::NaiveDate;
use tracing::debug;

use crate::form::age::age_on;
use crate::form::error::{FieldError, FormErrors};
use crate::form::schema::{AGE_MAX, AGE_MIN};
use crate::form::submission::Submission;

/// Check a submission against `today`
///
/// Two independent checks run on the age field: it must equal the age
/// derived from the birthdate, and it must lie within `[AGE_MIN, AGE_MAX]`.
/// Both always run, so an age can collect both errors at once.
pub fn validate(submission: &Submission, today: NaiveDate) -> Result<(), FormErrors> {
    let errors = check_age(submission, today);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(FormErrors::new(errors))
    }
}

/// Age checks, in reporting order
pub fn check_age(submission: &Submission, today: NaiveDate) -> Vec<FieldError> {
    let mut errors = Vec::new();
    let computed = age_on(submission.birth_date, today);

    debug!(
        birth_date = %submission.birth_date,
        %today,
        computed,
        submitted = submission.age,
        "checking age against birthdate"
    );

    if submission.age != computed {
        errors.push(FieldError::AgeMismatch {
            computed,
            submitted: submission.age,
        });
    }

    if submission.age < AGE_MIN || submission.age > AGE_MAX {
        errors.push(FieldError::AgeOutOfRange {
            value: submission.age,
            min: AGE_MIN,
            max: AGE_MAX,
        });
    }

    errors
}
