use super::errors::DomainError;
use super::product::ProductCandidate;

pub const NAME_REQUIRED: &str = "name of the product is mandatory";
pub const PRICE_NOT_POSITIVE: &str = "price of the product has to be a positive value";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid,
    /// Messages of every violated rule, joined with `", "`.
    Invalid(String),
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    pub fn into_result(self) -> Result<(), DomainError> {
        match self {
            ValidationOutcome::Valid => Ok(()),
            ValidationOutcome::Invalid(msg) => Err(DomainError::ValidationFailed(msg)),
        }
    }
}

struct Rule {
    message: &'static str,
    holds: fn(&ProductCandidate) -> bool,
}

// Evaluated in order, every rule every time.
const RULES: [Rule; 2] = [
    Rule {
        message: NAME_REQUIRED,
        holds: has_name,
    },
    Rule {
        message: PRICE_NOT_POSITIVE,
        holds: has_positive_price,
    },
];

fn has_name(candidate: &ProductCandidate) -> bool {
    !candidate.name.trim().is_empty()
}

// NaN compares false, so it is rejected too.
fn has_positive_price(candidate: &ProductCandidate) -> bool {
    candidate.price > 0.0
}

pub fn validate(candidate: &ProductCandidate) -> ValidationOutcome {
    let violations: Vec<&str> = RULES
        .iter()
        .filter(|rule| !(rule.holds)(candidate))
        .map(|rule| rule.message)
        .collect();

    if violations.is_empty() {
        ValidationOutcome::Valid
    } else {
        ValidationOutcome::Invalid(violations.join(", "))
    }
}
