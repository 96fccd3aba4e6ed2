//! # Validation Module
//!
//! Input validation for the register/login forms and the checkout form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end                                                    │
//! │  └── Inline hints while typing ("Revisar" badge)                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Trim every field                                                  │
//! │  ├── Blank / minimum length checks                                     │
//! │  └── Returns the normalized input on success                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: AuthStore                                                    │
//! │  └── Duplicate username / credential checks                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::credential::normalize_username;
use crate::error::{ValidationError, ValidationResult};
use crate::MIN_PASSWORD_LENGTH;

// =============================================================================
// Field Validators
// =============================================================================

/// Trims `value` and fails if nothing is left.
///
/// ## Example
/// ```rust
/// use ateliux_core::validation::require;
///
/// assert_eq!(require("name", "  Ana ").unwrap(), "Ana");
/// assert!(require("name", "   ").is_err());
/// ```
pub fn require<'a>(field: &str, value: &'a str) -> ValidationResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(trimmed)
}

/// Trims `value` and fails if it has fewer than `min` characters.
pub fn require_min_len<'a>(field: &str, value: &'a str, min: usize) -> ValidationResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.chars().count() < min {
        return Err(ValidationError::too_short(field, min));
    }
    Ok(trimmed)
}

// =============================================================================
// Auth Forms
// =============================================================================

/// Sign-up form fields, as typed.
#[derive(Debug, Clone, Default)]
pub struct RegistrationInput {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub password: String,
}

/// Sign-up fields after trimming and username normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub password: String,
}

impl RegistrationInput {
    /// Checks the sign-up form.
    ///
    /// ## Rules
    /// - Every field must be non-blank after trimming
    /// - The trimmed password must have at least 6 characters
    pub fn validate(&self) -> ValidationResult<ValidRegistration> {
        let username = require("username", &self.username)?;
        let first_name = require("first name", &self.first_name)?;
        let last_name = require("last name", &self.last_name)?;
        let phone = require("phone", &self.phone)?;
        let password = require("password", &self.password)?;
        let password = require_min_len("password", password, MIN_PASSWORD_LENGTH)?;

        Ok(ValidRegistration {
            username: normalize_username(username),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone: phone.to_string(),
            password: password.to_string(),
        })
    }
}

/// Login form fields, as typed.
#[derive(Debug, Clone, Default)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Login fields after trimming and username normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLogin {
    pub username: String,
    pub password: String,
}

impl LoginInput {
    pub fn validate(&self) -> ValidationResult<ValidLogin> {
        let username = require("username", &self.username)?;
        let password = require("password", &self.password)?;

        Ok(ValidLogin {
            username: normalize_username(username),
            password: password.to_string(),
        })
    }
}

// =============================================================================
// Checkout Form
// =============================================================================

/// Contact and delivery details from the checkout page.
#[derive(Debug, Clone)]
pub struct CheckoutForm {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub zip: String,
    pub address: String,
    pub number: String,
    pub complement: String,
    pub notes: String,
    pub billing: BillingAddress,
}

/// Where the invoice goes.
#[derive(Debug, Clone, Default)]
pub enum BillingAddress {
    #[default]
    SameAsShipping,
    Separate {
        name: String,
        zip: String,
        address: String,
    },
}

impl Default for CheckoutForm {
    fn default() -> Self {
        CheckoutForm {
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            country: "Brasil".to_string(),
            state: String::new(),
            city: String::new(),
            zip: String::new(),
            address: String::new(),
            number: String::new(),
            complement: String::new(),
            notes: String::new(),
            billing: BillingAddress::default(),
        }
    }
}

impl CheckoutForm {
    /// Returns the first failing rule, in form order.
    pub fn validate(&self) -> ValidationResult<()> {
        self.validate_contact()?;
        self.validate_shipping()?;
        self.validate_billing()
    }

    /// Email: contains `@` and has at least 6 characters.
    pub fn validate_contact(&self) -> ValidationResult<()> {
        let email = require_min_len("email", &self.email, 6)?;
        if !email.contains('@') {
            return Err(ValidationError::invalid_format("email", "must contain '@'"));
        }
        Ok(())
    }

    pub fn validate_shipping(&self) -> ValidationResult<()> {
        require_min_len("first name", &self.first_name, 2)?;
        require_min_len("last name", &self.last_name, 2)?;
        require_min_len("phone", &self.phone, 8)?;
        require_min_len("state", &self.state, 2)?;
        require_min_len("city", &self.city, 2)?;
        require_min_len("zip", &self.zip, 5)?;
        require_min_len("address", &self.address, 5)?;
        require_min_len("number", &self.number, 1)?;
        Ok(())
    }

    pub fn validate_billing(&self) -> ValidationResult<()> {
        if let BillingAddress::Separate { name, zip, address } = &self.billing {
            require_min_len("billing name", name, 3)?;
            require_min_len("billing zip", zip, 5)?;
            require_min_len("billing address", address, 5)?;
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegistrationInput {
        RegistrationInput {
            username: "  Ana ".to_string(),
            first_name: " Ana".to_string(),
            last_name: "Lima ".to_string(),
            phone: "11 99999-0000".to_string(),
            password: " secret1 ".to_string(),
        }
    }

    fn checkout_form() -> CheckoutForm {
        CheckoutForm {
            email: "ana@example.com".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Lima".to_string(),
            phone: "11999990000".to_string(),
            state: "SP".to_string(),
            city: "Santos".to_string(),
            zip: "11010-000".to_string(),
            address: "Rua das Flores".to_string(),
            number: "42".to_string(),
            ..CheckoutForm::default()
        }
    }

    #[test]
    fn test_registration_normalizes_fields() {
        let valid = registration().validate().unwrap();
        assert_eq!(valid.username, "ana");
        assert_eq!(valid.first_name, "Ana");
        assert_eq!(valid.last_name, "Lima");
        assert_eq!(valid.password, "secret1");
    }

    #[test]
    fn test_registration_blank_field() {
        let mut input = registration();
        input.phone = "   ".to_string();
        assert_eq!(input.validate(), Err(ValidationError::required("phone")));
    }

    #[test]
    fn test_registration_short_password() {
        let mut input = registration();
        input.password = "  abc12  ".to_string();
        assert_eq!(
            input.validate(),
            Err(ValidationError::too_short("password", MIN_PASSWORD_LENGTH))
        );
    }

    #[test]
    fn test_login_requires_both_fields() {
        let input = LoginInput {
            username: "ana".to_string(),
            password: " ".to_string(),
        };
        assert_eq!(input.validate(), Err(ValidationError::required("password")));

        let input = LoginInput {
            username: " ANA ".to_string(),
            password: "x".to_string(),
        };
        assert_eq!(input.validate().unwrap().username, "ana");
    }

    #[test]
    fn test_checkout_form_valid() {
        assert!(checkout_form().is_valid());
    }

    #[test]
    fn test_checkout_form_email_rules() {
        let mut form = checkout_form();
        form.email = "a@b".to_string();
        assert!(form.validate_contact().is_err());

        form.email = "ana.example.com".to_string();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_checkout_form_shipping_rules() {
        let mut form = checkout_form();
        form.zip = "1101".to_string();
        assert_eq!(form.validate(), Err(ValidationError::too_short("zip", 5)));

        let mut form = checkout_form();
        form.number = " ".to_string();
        assert_eq!(form.validate(), Err(ValidationError::too_short("number", 1)));
    }

    #[test]
    fn test_checkout_form_separate_billing() {
        let mut form = checkout_form();
        form.billing = BillingAddress::Separate {
            name: "Al".to_string(),
            zip: "11010".to_string(),
            address: "Rua A, 1".to_string(),
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::too_short("billing name", 3))
        );

        form.billing = BillingAddress::Separate {
            name: "Ana Lima".to_string(),
            zip: "11010".to_string(),
            address: "Rua A, 1".to_string(),
        };
        assert!(form.is_valid());
    }
}
