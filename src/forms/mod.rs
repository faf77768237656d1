//! Client-side forms and the typed payloads they convert into.
//!
//! Validation happens here, before any request is built; a form that fails
//! to convert never reaches the network.

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use thiserror::Error;
use validator::ValidationErrors;

pub mod filters;
pub mod orders;
pub mod products;
pub mod registration_requests;
pub mod vehicles;

/// Errors that can occur when processing form data.
///
/// Messages are shown to the user as-is.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Revise los datos ingresados: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Identificador inválido")]
    InvalidId,

    #[error("Estado inválido")]
    InvalidStatus,

    #[error("No se puede pasar de {from} a {to}")]
    InvalidTransition {
        from: &'static str,
        to: &'static str,
    },

    #[error("El nombre no puede estar vacío")]
    InvalidName,

    #[error("El código no puede estar vacío")]
    InvalidCode,

    #[error("Patente inválida")]
    InvalidPlate,

    #[error("Fecha inválida")]
    InvalidDate,

    #[error("La cantidad no puede ser negativa")]
    NegativeQuantity,

    #[error("La variante {0} está repetida")]
    DuplicateVariant(String),

    #[error("Debe indicar el motivo del rechazo")]
    MissingReason,

    #[error("Importe inválido")]
    InvalidAmount,
}

/// Converts a submitted amount to cents precision.
///
/// `NaN`, infinities and values outside the decimal range are rejected.
pub(crate) fn parse_amount(amount: f64) -> Result<Decimal, FormError> {
    Decimal::from_f64(amount)
        .map(|amount| amount.round_dp(2))
        .ok_or(FormError::InvalidAmount)
}
