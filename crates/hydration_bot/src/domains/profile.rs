//! Parsing of `sex;age;weight;height` profile text.

use crate::error::ValidationError;
use crate::types::Profile;

/// Parse and validate raw profile text such as `male;30;75;180`.
///
/// Fields are trimmed. Age must be a positive integer, weight and height
/// positive finite numbers, and sex any non-empty label; the sex label is
/// interpreted later, by the calorie formula, not rejected here.
pub fn validate(raw: &str) -> Result<Profile, ValidationError> {
    let fields: Vec<&str> = raw.split(';').map(str::trim).collect();
    let [sex, age, weight, height] = fields.as_slice() else {
        return Err(ValidationError::malformed_profile(format!(
            "expected 4 fields separated by ';', got {}",
            fields.len()
        )));
    };

    if sex.is_empty() {
        return Err(ValidationError::malformed_profile("sex is empty"));
    }
    let age = age
        .parse::<u32>()
        .ok()
        .filter(|a| *a > 0)
        .ok_or_else(|| {
            ValidationError::malformed_profile(format!("age `{age}` is not a positive integer"))
        })?;
    let weight_kg = parse_positive(weight, "weight")?;
    let height_cm = parse_positive(height, "height")?;

    Ok(Profile {
        sex: sex.to_string(),
        age,
        weight_kg,
        height_cm,
    })
}

fn parse_positive(value: &str, field: &str) -> Result<f64, ValidationError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or_else(|| {
            ValidationError::malformed_profile(format!("{field} `{value}` is not a positive number"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GoalConfig;
    use crate::domains::goals::{calorie_goal, water_goal};
    use crate::error::ValidationErrorKind;

    #[test]
    fn accepts_well_formed_profile() {
        let p = validate("male;30;75;180").expect("valid");
        assert_eq!(p.sex, "male");
        assert_eq!(p.age, 30);
        assert_eq!(p.weight_kg, 75.0);
        assert_eq!(p.height_cm, 180.0);
    }

    #[test]
    fn trims_fields_and_accepts_fractions() {
        let p = validate(" Female ; 41 ; 62.5 ; 168.2 ").expect("valid");
        assert_eq!(p.sex, "Female");
        assert_eq!(p.weight_kg, 62.5);
        assert_eq!(p.height_cm, 168.2);
    }

    #[test]
    fn rejects_non_integer_age() {
        let err = validate("male;thirty;75;180").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MalformedProfile);
        let err = validate("male;30.5;75;180").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MalformedProfile);
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(validate("male;30;75").is_err());
        assert!(validate("male;30;75;180;extra").is_err());
        assert!(validate("").is_err());
    }

    #[test]
    fn rejects_bad_numbers() {
        for raw in [
            "male;30;heavy;180",
            "male;30;75;tall",
            "male;0;75;180",
            "male;30;-75;180",
            "male;30;75;NaN",
            "male;30;inf;180",
            ";30;75;180",
        ] {
            let err = validate(raw).unwrap_err();
            assert_eq!(err.kind, ValidationErrorKind::MalformedProfile, "{raw}");
        }
    }

    #[test]
    fn any_sex_label_is_accepted() {
        assert!(validate("nonbinary;25;60;170").is_ok());
    }

    #[test]
    fn validated_profiles_feed_the_calculators() {
        let cfg = GoalConfig::default();
        for raw in ["male;30;75;180", "f;18;45.5;150", "MALE;90;120;199.9"] {
            let p = validate(raw).expect("valid");
            let w = water_goal(&cfg, p.weight_kg, 0, 20.0);
            let c = calorie_goal(&cfg, p.weight_kg, p.height_cm, p.age, &p.sex, "low");
            assert!(w > 0);
            assert!(c > 0);
        }
    }
}
