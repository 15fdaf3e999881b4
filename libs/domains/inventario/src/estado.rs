use strum::Display;

/// Soft-delete state. `Inactivo` is terminal.
///
/// Stored as the `activo` boolean column and exposed as `activo` in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Estado {
    #[default]
    Activo,
    Inactivo,
}

impl Estado {
    pub fn is_activo(self) -> bool {
        self == Estado::Activo
    }

    /// `None` matches every row.
    pub fn matches(filter: Option<Estado>, estado: Estado) -> bool {
        filter.is_none_or(|f| f == estado)
    }
}

impl From<bool> for Estado {
    fn from(activo: bool) -> Self {
        if activo {
            Estado::Activo
        } else {
            Estado::Inactivo
        }
    }
}

impl From<Estado> for bool {
    fn from(estado: Estado) -> Self {
        estado.is_activo()
    }
}
