//! Error conversion glue between the domain value objects and the services.
//!
//! The domain layer must not depend on service error types, so the
//! conversion lives here and is only compiled with the `server` feature.

use crate::domain::types::TypeConstraintError;
use crate::services::ServiceError;

/// Path segments that fail to parse into identifiers or slugs address nothing.
impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        log::warn!("Rejected path segment: {val}");
        ServiceError::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entry::EntryKind;
    use crate::domain::types::RecordId;
    use crate::services::ServiceResult;

    fn parse(id: &str, kind: &str) -> ServiceResult<(RecordId, EntryKind)> {
        Ok((RecordId::new(id)?, kind.parse()?))
    }

    #[test]
    fn malformed_segments_are_not_found() {
        assert!(matches!(parse(" ", "gather"), Err(ServiceError::NotFound)));
        assert!(matches!(parse("P1", "bogus"), Err(ServiceError::NotFound)));
        assert!(parse("P1", "gather").is_ok());
    }
}
