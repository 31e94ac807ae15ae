use lazy_static::lazy_static;
use regex::Regex;
use validator::Validate;

use crate::dto::user_dto::UserPayload;
use crate::models::user::{Gender, NewUser, UserStatus};

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref MOBILE_RE: Regex = Regex::new(r"^[0-9]{10}$").unwrap();
}

/// First rule a user payload violates. Rules are checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationRule {
    #[error("First name, last name, email, mobile, gender, and location are required")]
    MissingRequiredField,
    #[error("Invalid email format")]
    InvalidEmailFormat,
    #[error("Mobile must be exactly 10 digits")]
    InvalidMobileFormat,
    #[error("Gender must be Male or Female")]
    InvalidGender,
    #[error("Status must be Active or Inactive")]
    InvalidStatus,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn is_valid_mobile(mobile: &str) -> bool {
    MOBILE_RE.is_match(mobile)
}

/// Normalises and checks a create/update payload, producing the record fields
/// to persist. Create and update share this path so they can never diverge.
pub fn validate_user_payload(payload: UserPayload) -> Result<NewUser, ValidationRule> {
    let payload = payload.normalized();

    if payload.validate().is_err() {
        return Err(ValidationRule::MissingRequiredField);
    }
    if !is_valid_email(&payload.email) {
        return Err(ValidationRule::InvalidEmailFormat);
    }
    if !is_valid_mobile(&payload.mobile) {
        return Err(ValidationRule::InvalidMobileFormat);
    }

    let gender = payload
        .gender
        .as_deref()
        .map(|g| g.parse::<Gender>().map_err(|_| ValidationRule::InvalidGender))
        .transpose()?;
    let status = payload
        .status
        .as_deref()
        .map(|s| s.parse::<UserStatus>().map_err(|_| ValidationRule::InvalidStatus))
        .transpose()?
        .unwrap_or_default();
    let gender = gender.ok_or(ValidationRule::MissingRequiredField)?;

    Ok(NewUser {
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email.to_lowercase(),
        mobile: payload.mobile,
        gender,
        status,
        profile: payload.profile.unwrap_or_default(),
        location: payload.location,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> UserPayload {
        UserPayload {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "Ada@Example.com".into(),
            mobile: "0123456789".into(),
            gender: Some("Female".into()),
            status: None,
            profile: None,
            location: "London".into(),
        }
    }

    #[test]
    fn accepts_complete_payload_and_normalises() {
        let user = validate_user_payload(UserPayload {
            first_name: "  Ada ".into(),
            email: " Ada@Example.com ".into(),
            ..payload()
        })
        .unwrap();
        assert_eq!(user.first_name, "Ada");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.mobile, "0123456789");
        assert_eq!(user.gender, Gender::Female);
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.profile, "");
    }

    #[test]
    fn each_required_field_is_enforced() {
        let cases = [
            UserPayload { first_name: String::new(), ..payload() },
            UserPayload { last_name: "   ".into(), ..payload() },
            UserPayload { email: String::new(), ..payload() },
            UserPayload { mobile: String::new(), ..payload() },
            UserPayload { location: "\t".into(), ..payload() },
            UserPayload { gender: None, ..payload() },
        ];
        for case in cases {
            assert_eq!(
                validate_user_payload(case),
                Err(ValidationRule::MissingRequiredField)
            );
        }
    }

    #[test]
    fn missing_field_wins_over_format_errors() {
        let result = validate_user_payload(UserPayload {
            location: String::new(),
            email: "nope".into(),
            mobile: "12".into(),
            ..payload()
        });
        assert_eq!(result, Err(ValidationRule::MissingRequiredField));
    }

    #[test]
    fn email_shape() {
        for bad in ["plain", "a@b", "a b@c.d", "@c.d", "a@@c.d", "a@.", "a@b."] {
            assert!(!is_valid_email(bad), "{bad} should be rejected");
        }
        for good in ["a@b.c", "first.last+tag@mail.example.org", "x@sub.domain.io"] {
            assert!(is_valid_email(good), "{good} should be accepted");
        }
        assert_eq!(
            validate_user_payload(UserPayload { email: "a@b".into(), ..payload() }),
            Err(ValidationRule::InvalidEmailFormat)
        );
    }

    #[test]
    fn mobile_must_be_ten_digits() {
        for bad in ["123456789", "12345678901", "12345abcde", "12345 6789", "+123456789"] {
            assert_eq!(
                validate_user_payload(UserPayload { mobile: bad.into(), ..payload() }),
                Err(ValidationRule::InvalidMobileFormat),
                "{bad}"
            );
        }
    }

    #[test]
    fn enumerations_are_checked_in_order() {
        assert_eq!(
            validate_user_payload(UserPayload {
                gender: Some("Other".into()),
                status: Some("Gone".into()),
                ..payload()
            }),
            Err(ValidationRule::InvalidGender)
        );
        assert_eq!(
            validate_user_payload(UserPayload { status: Some("active".into()), ..payload() }),
            Err(ValidationRule::InvalidStatus)
        );
        let user = validate_user_payload(UserPayload {
            status: Some("Inactive".into()),
            ..payload()
        })
        .unwrap();
        assert_eq!(user.status, UserStatus::Inactive);
    }

    #[test]
    fn empty_enumerations_count_as_absent() {
        assert_eq!(
            validate_user_payload(UserPayload { gender: Some(String::new()), ..payload() }),
            Err(ValidationRule::MissingRequiredField)
        );
        let user = validate_user_payload(UserPayload { status: Some(String::new()), ..payload() })
            .unwrap();
        assert_eq!(user.status, UserStatus::Active);
    }
}
