//! Identifier parsing.
//!
//! Ids arrive as opaque strings (path segments, JSON fields). A malformed id
//! is a validation failure, distinct from a well-formed id that matches
//! nothing.

use crate::error::CoreError;
use crate::types::DbId;

/// Parse a client-supplied identifier.
pub fn parse_id(raw: &str) -> Result<DbId, CoreError> {
    DbId::parse_str(raw).map_err(|_| CoreError::Validation(format!("Invalid id '{raw}'")))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn accepts_hyphenated_uuid() {
        let id = uuid::Uuid::now_v7();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn rejects_malformed_ids() {
        assert_matches!(parse_id("not-an-id"), Err(CoreError::Validation(_)));
        assert_matches!(parse_id(""), Err(CoreError::Validation(_)));
        // A 24-char hex object id from a document database is not accepted.
        assert_matches!(
            parse_id("64b7f0c2a1e4d3b2c1a09f8e"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn rejects_ids_with_surrounding_whitespace() {
        let id = uuid::Uuid::now_v7();
        assert_matches!(parse_id(&format!(" {id} ")), Err(CoreError::Validation(_)));
        assert_matches!(parse_id(&format!("{id}\n")), Err(CoreError::Validation(_)));
    }
}
