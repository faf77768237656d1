//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, trimmed
//! names, normalized document numbers and plates) so that once a value
//! reaches the domain layer it can be treated as trusted.
use std::{ops::Deref, str::FromStr};

use phonenumber::{Mode, parse};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateEmail;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
    /// Phone number did not meet expected format.
    #[error("invalid phone number")]
    InvalidPhone,
    /// Document number is not 7 to 11 digits.
    #[error("invalid document number")]
    InvalidDocument,
    /// License plate matches neither the legacy nor the Mercosur layout.
    #[error("invalid license plate")]
    InvalidPlate,
    /// Quantity or amount is below zero.
    #[error("value cannot be negative")]
    Negative,
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(OrderId, "Unique identifier for an order.");
id_newtype!(ShipmentId, "Unique identifier for a shipment grouping orders.");
id_newtype!(ProductId, "Unique identifier for a catalog product.");
id_newtype!(CategoryId, "Unique identifier for a product category.");
id_newtype!(VehicleId, "Unique identifier for a fleet vehicle.");
id_newtype!(MaintenanceId, "Unique identifier for a maintenance record.");
id_newtype!(
    RegistrationRequestId,
    "Unique identifier for a registration request."
);

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?;
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(ProductName, "Catalog product name.");
non_empty_string_newtype!(ProductCode, "Catalog product code (SKU).");
non_empty_string_newtype!(BusinessName, "Legal name of a registering business.");
non_empty_string_newtype!(
    RejectionReason,
    "Reason attached to a rejected registration request."
);
non_empty_string_newtype!(
    MaintenanceDescription,
    "Free text describing the work performed during a maintenance."
);

/// Lower-cased and validated email address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = email.into().trim().to_lowercase();
        if normalized.validate_email() {
            Ok(Self(normalized))
        } else {
            Err(TypeConstraintError::InvalidEmail)
        }
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Normalizes a phone number string to E.164 format.
///
/// Numbers without an explicit country code are parsed as Argentine.
pub fn normalize_phone_to_e164(value: &str) -> Result<String, TypeConstraintError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    let parsed = parse(Some(phonenumber::country::Id::AR), trimmed)
        .map_err(|_| TypeConstraintError::InvalidPhone)?;
    Ok(parsed.format().mode(Mode::E164).to_string())
}

/// Normalized phone number wrapper (expected E.164).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Constructs a phone number ensuring it is valid and normalizes to E.164 format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_phone_to_e164(&value.into())?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for PhoneNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

/// DNI or CUIT number stored as bare digits.
///
/// Separators (`-`, `.`, spaces) are stripped on construction.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentNumber(String);

impl DocumentNumber {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let raw = value.into();
        let digits: String = raw
            .chars()
            .filter(|c| !matches!(c, '-' | '.' | ' '))
            .collect();
        if !(7..=11).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(TypeConstraintError::InvalidDocument);
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DocumentNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for DocumentNumber {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DocumentNumber> for String {
    fn from(value: DocumentNumber) -> Self {
        value.0
    }
}

/// Upper-cased vehicle plate in legacy (`ABC123`) or Mercosur (`AB123CD`) layout.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct LicensePlate(String);

impl LicensePlate {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let plate: String = value
            .into()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();

        let bytes = plate.as_bytes();
        let letters = |range: std::ops::Range<usize>| {
            bytes[range].iter().all(|b| b.is_ascii_uppercase())
        };
        let digits =
            |range: std::ops::Range<usize>| bytes[range].iter().all(|b| b.is_ascii_digit());

        let legacy = bytes.len() == 6 && letters(0..3) && digits(3..6);
        let mercosur = bytes.len() == 7 && letters(0..2) && digits(2..5) && letters(5..7);

        if legacy || mercosur {
            Ok(Self(plate))
        } else {
            Err(TypeConstraintError::InvalidPlate)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for LicensePlate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LicensePlate {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for LicensePlate {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LicensePlate> for String {
    fn from(value: LicensePlate) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_reject_non_positive_values() {
        assert_eq!(OrderId::new(0), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(ShipmentId::new(-2), Err(TypeConstraintError::NonPositiveId));
        assert_eq!(ProductId::new(7).map(ProductId::get), Ok(7));
    }

    #[test]
    fn ids_deserialize_through_validation() {
        let id: OrderId = serde_json::from_str("12").unwrap();
        assert_eq!(id.get(), 12);
        assert!(serde_json::from_str::<OrderId>("0").is_err());
    }

    #[test]
    fn document_number_strips_separators() {
        let doc = DocumentNumber::new("20-12345678-9").unwrap();
        assert_eq!(doc.as_str(), "20123456789");
        assert_eq!(
            DocumentNumber::new("12ab567"),
            Err(TypeConstraintError::InvalidDocument)
        );
        assert_eq!(
            DocumentNumber::new("123"),
            Err(TypeConstraintError::InvalidDocument)
        );
    }

    #[test]
    fn license_plate_accepts_both_layouts() {
        assert_eq!(LicensePlate::new("abc 123").unwrap().as_str(), "ABC123");
        assert_eq!(LicensePlate::new("ae123cd").unwrap().as_str(), "AE123CD");
        assert_eq!(
            LicensePlate::new("A1B2C3"),
            Err(TypeConstraintError::InvalidPlate)
        );
    }

    #[test]
    fn email_is_normalized() {
        let email = Email::new("  Ventas@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "ventas@example.com");
        assert_eq!(Email::new("nope"), Err(TypeConstraintError::InvalidEmail));
    }

    #[test]
    fn phone_is_normalized_to_e164() {
        let phone = PhoneNumber::new(" +54 11 4555-1234 ").unwrap();
        assert_eq!(phone.as_str(), "+541145551234");
        assert_eq!(PhoneNumber::new("  "), Err(TypeConstraintError::EmptyString));

        let decoded: PhoneNumber = serde_json::from_str("\"+54 11 4555-1234\"").unwrap();
        assert_eq!(decoded, phone);
    }

    #[test]
    fn names_are_trimmed() {
        let name = ProductName::new("  Yerba mate ").unwrap();
        assert_eq!(&*name, "Yerba mate");
        assert_eq!(ProductName::new("   "), Err(TypeConstraintError::EmptyString));
    }
}
