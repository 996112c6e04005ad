use crate::error::{internal::InternalError, AppError};

/// Parses a u64 value from a stored string id
///
/// # Arguments
/// - `value` - The string to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed string to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
/// - `Err(AppError::InternalErr(ZeroStringId))` - The id is zero, which serenity
///   refuses to build ids from
pub fn parse_u64_from_string(value: &str) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId {
            value: value.to_string(),
            source: e,
        })?;

    if result == 0 {
        return Err(InternalError::ZeroStringId {
            value: value.to_string(),
        }
        .into());
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expected: Ok with the numeric snowflake
    #[test]
    fn parses_snowflake() {
        assert_eq!(
            parse_u64_from_string("1133490207036952576").unwrap(),
            1133490207036952576
        );
    }

    /// Expected: Err(InternalErr) for non-numeric text
    #[test]
    fn rejects_non_numeric_id() {
        let result = parse_u64_from_string("not-an-id");

        assert!(matches!(
            result,
            Err(AppError::InternalErr(InternalError::ParseStringId { .. }))
        ));
    }

    /// Expected: Err(InternalErr) for a zero id
    #[test]
    fn rejects_zero_id() {
        let result = parse_u64_from_string("0");

        assert!(matches!(
            result,
            Err(AppError::InternalErr(InternalError::ZeroStringId { .. }))
        ));
    }
}
