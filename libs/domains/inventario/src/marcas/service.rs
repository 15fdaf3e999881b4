use axum_helpers::{PageParams, PageResponse};
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use super::models::{CreateMarca, Marca, MarcaSimple, UpdateMarca};
use super::repository::MarcaRepository;
use crate::error::{Entidad, InventarioError, InventarioResult};
use crate::estado::Estado;

/// Business rules for brands; same contract as categories plus country search.
#[derive(Clone)]
pub struct MarcaService<R: MarcaRepository> {
    repository: Arc<R>,
}

impl<R: MarcaRepository> MarcaService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(nombre = %input.nombre))]
    pub async fn create(&self, input: CreateMarca) -> InventarioResult<Marca> {
        input
            .validate()
            .map_err(|e| InventarioError::Validation(e.to_string()))?;

        if self.repository.exists_by_nombre(&input.nombre).await? {
            return Err(InventarioError::duplicate_name(Entidad::Marca, input.nombre));
        }

        self.repository.create(input).await
    }

    pub async fn get_by_id(&self, id: i32) -> InventarioResult<Marca> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or_else(|| InventarioError::not_found(Entidad::Marca, id))
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: UpdateMarca) -> InventarioResult<Marca> {
        input
            .validate()
            .map_err(|e| InventarioError::Validation(e.to_string()))?;

        let mut marca = self.get_by_id(id).await?;

        let renamed = input.nombre.as_ref().filter(|nombre| **nombre != marca.nombre);
        if let Some(nombre) = renamed {
            if self.repository.exists_by_nombre(nombre).await? {
                return Err(InventarioError::duplicate_name(Entidad::Marca, nombre.clone()));
            }
        }

        marca.apply_update(input);
        self.repository.save(&marca).await
    }

    /// Soft delete; deleting an inactive brand succeeds without writing.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> InventarioResult<()> {
        let mut marca = self.get_by_id(id).await?;
        if !marca.estado.is_activo() {
            return Ok(());
        }

        marca.estado = Estado::Inactivo;
        self.repository.save(&marca).await?;
        tracing::info!(marca_id = id, "Deactivated marca");
        Ok(())
    }

    pub async fn list(&self) -> InventarioResult<Vec<Marca>> {
        self.repository.list(None).await
    }

    pub async fn list_paged(&self, params: PageParams) -> InventarioResult<PageResponse<Marca>> {
        self.repository.list_paged(params).await
    }

    pub async fn list_active_simple(&self) -> InventarioResult<Vec<MarcaSimple>> {
        let activas = self.repository.list(Some(Estado::Activo)).await?;
        Ok(activas.into_iter().map(MarcaSimple::from).collect())
    }

    pub async fn search_by_nombre(&self, fragment: &str) -> InventarioResult<Vec<Marca>> {
        self.repository.search_by_nombre(fragment).await
    }

    pub async fn search_by_pais(&self, fragment: &str) -> InventarioResult<Vec<Marca>> {
        self.repository.search_by_pais(fragment).await
    }

    pub async fn exists_by_nombre(&self, nombre: &str) -> InventarioResult<bool> {
        self.repository.exists_by_nombre(nombre).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marcas::repository::MockMarcaRepository;
    use chrono::Utc;

    fn marca(id: i32, nombre: &str) -> Marca {
        Marca {
            id,
            nombre: nombre.to_string(),
            descripcion: None,
            pais_origen: None,
            estado: Estado::Activo,
            fecha_creacion: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_persists_when_name_is_free() {
        let mut mock_repo = MockMarcaRepository::new();
        mock_repo.expect_exists_by_nombre().returning(|_| Ok(false));
        mock_repo
            .expect_create()
            .times(1)
            .returning(|input| Ok(Marca::new(1, input)));

        let service = MarcaService::new(mock_repo);
        let created = service
            .create(CreateMarca {
                nombre: "Gloria".into(),
                descripcion: None,
                pais_origen: Some("Perú".into()),
            })
            .await
            .unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.estado, Estado::Activo);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let mut mock_repo = MockMarcaRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));

        let service = MarcaService::new(mock_repo);
        let err = service.update(7, UpdateMarca::default()).await.unwrap_err();

        assert_eq!(err.to_string(), "No existe marca con id: 7");
    }

    #[tokio::test]
    async fn test_update_changes_only_given_fields() {
        let mut mock_repo = MockMarcaRepository::new();
        mock_repo
            .expect_get_by_id()
            .returning(|id| Ok(Some(marca(id, "Acme"))));
        mock_repo
            .expect_exists_by_nombre()
            .withf(|nombre| nombre == "Acme Pro")
            .returning(|_| Ok(false));
        mock_repo.expect_save().returning(|m| Ok(m.clone()));

        let service = MarcaService::new(mock_repo);
        let updated = service
            .update(
                3,
                UpdateMarca {
                    nombre: Some("Acme Pro".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.nombre, "Acme Pro");
        assert_eq!(updated.pais_origen, None);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut mock_repo = MockMarcaRepository::new();
        mock_repo.expect_get_by_id().returning(|_| Ok(None));
        mock_repo.expect_save().never();

        let service = MarcaService::new(mock_repo);
        let result = service.delete(5).await;

        assert!(matches!(result, Err(InventarioError::NotFound { .. })));
    }
}
