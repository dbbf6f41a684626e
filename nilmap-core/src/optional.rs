//! Optional holder helper

/// Allocate a present optional holder around `value`
pub fn to_optional<T>(value: T) -> Option<T> {
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_optional() {
        assert_eq!(to_optional("Value"), Some("Value"));
        assert_eq!(to_optional(8i8), Some(8));
    }
}
