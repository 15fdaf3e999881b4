//! Custom `validator` rules shared by the request DTOs.

use rust_decimal::Decimal;
use std::borrow::Cow;
use validator::ValidationError;

/// 99999999.99, the largest value a NUMERIC(10,2) column holds.
const PRECIO_MAXIMO: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

pub(crate) fn precio_valido(precio: &Decimal) -> Result<(), ValidationError> {
    if *precio < Decimal::new(1, 2) {
        let mut err = ValidationError::new("precio_minimo");
        err.message = Some(Cow::Borrowed("El precio debe ser mayor que cero"));
        return Err(err);
    }
    if *precio > PRECIO_MAXIMO {
        let mut err = ValidationError::new("precio_maximo");
        err.message = Some(Cow::Borrowed("El precio no puede exceder 99999999.99"));
        return Err(err);
    }
    Ok(())
}
