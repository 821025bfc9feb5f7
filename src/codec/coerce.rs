use crate::error::CodecError;
use crate::schema::LeafType;
use crate::value::ParamValue;

/// The only raw input that coerces to boolean `true`.
pub const TRUE_LITERAL: &str = "true";

/// Converts an already trimmed, non-empty raw string into its declared kind.
///
/// `integer` accepts base-10 signed 64-bit literals, `float` accepts finite decimal or
/// exponential literals, `boolean` is `true` for exactly `"true"` and `false` for any
/// other input. `string` and unrecognised kinds pass the input through.
pub fn coerce(path: &str, raw: &str, leaf_type: &LeafType) -> Result<ParamValue, CodecError> {
    let failure = || CodecError::Coercion {
        path: path.to_string(),
        raw: raw.to_string(),
        expected: leaf_type.clone(),
    };

    match leaf_type {
        LeafType::Integer => raw
            .parse::<i64>()
            .map(ParamValue::Integer)
            .map_err(|_| failure()),
        LeafType::Float => match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(ParamValue::Float(n)),
            _ => Err(failure()),
        },
        LeafType::Boolean => Ok(ParamValue::Boolean(raw == TRUE_LITERAL)),
        LeafType::String | LeafType::Other(_) => Ok(ParamValue::String(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_strict_base_ten() {
        assert_eq!(
            coerce("a", "-17", &LeafType::Integer).unwrap(),
            ParamValue::Integer(-17)
        );
        assert_eq!(
            coerce("a", "+5", &LeafType::Integer).unwrap(),
            ParamValue::Integer(5)
        );
        assert!(coerce("a", "42abc", &LeafType::Integer).is_err());
        assert!(coerce("a", "0x10", &LeafType::Integer).is_err());
        assert!(coerce("a", "1.5", &LeafType::Integer).is_err());
        assert!(coerce("a", "99999999999999999999", &LeafType::Integer).is_err());
    }

    #[test]
    fn floats_accept_exponents_but_not_infinities() {
        assert_eq!(
            coerce("a", "1e3", &LeafType::Float).unwrap(),
            ParamValue::Float(1000.0)
        );
        assert_eq!(
            coerce("a", "-0.25", &LeafType::Float).unwrap(),
            ParamValue::Float(-0.25)
        );
        assert!(coerce("a", "inf", &LeafType::Float).is_err());
        assert!(coerce("a", "NaN", &LeafType::Float).is_err());
        assert!(coerce("a", "fast", &LeafType::Float).is_err());
    }

    #[test]
    fn boolean_truth_is_exact_match() {
        assert_eq!(
            coerce("a", "true", &LeafType::Boolean).unwrap(),
            ParamValue::Boolean(true)
        );
        for raw in ["false", "True", "TRUE", "1", "yes"] {
            assert_eq!(
                coerce("a", raw, &LeafType::Boolean).unwrap(),
                ParamValue::Boolean(false),
                "'{}' must coerce to false",
                raw
            );
        }
    }

    #[test]
    fn unknown_kinds_pass_through() {
        let kind = LeafType::Other("datetime".to_string());
        assert_eq!(
            coerce("a", "2024-01-01T00:00:00Z", &kind).unwrap(),
            ParamValue::String("2024-01-01T00:00:00Z".to_string())
        );
    }

    #[test]
    fn failure_names_path_and_raw_value() {
        let err = coerce("Device.Port", "abc", &LeafType::Integer).unwrap_err();
        assert_eq!(
            err,
            CodecError::Coercion {
                path: "Device.Port".to_string(),
                raw: "abc".to_string(),
                expected: LeafType::Integer,
            }
        );
    }
}
