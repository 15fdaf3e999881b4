//! Query strings shared by several endpoints.

use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

/// `?nombre=`
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NombreQuery {
    /// Name or name fragment
    pub nombre: String,
}
