//! Domain error types.
//!
//! These errors represent validation failures and data inconsistencies
//! in the domain layer. They are distinct from provider/IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// Itinerary has no legs
    #[error("itinerary must have at least one leg")]
    EmptyItinerary,

    /// Leg `i` does not end where leg `i + 1` starts
    #[error("leg {0} does not connect to the following leg")]
    LegsNotContiguous(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::EmptyItinerary;
        assert_eq!(err.to_string(), "itinerary must have at least one leg");

        let err = DomainError::LegsNotContiguous(2);
        assert_eq!(
            err.to_string(),
            "leg 2 does not connect to the following leg"
        );
    }
}
