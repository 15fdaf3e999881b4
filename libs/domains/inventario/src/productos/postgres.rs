use async_trait::async_trait;
use axum_helpers::{PageParams, PageResponse};
use database::BaseRepository;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use super::entity;
use super::models::{CreateProducto, Producto};
use super::repository::ProductoRepository;
use crate::error::{Entidad, InventarioError, InventarioResult, map_unique};
use crate::estado::Estado;
use crate::search::contains_ignore_case;
use crate::{categorias, marcas};

#[derive(Clone)]
pub struct PgProductoRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgProductoRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn ordered(query: Select<entity::Entity>) -> Select<entity::Entity> {
        query
            .order_by_asc(entity::Column::Nombre)
            .order_by_asc(entity::Column::Id)
    }

    async fn fetch(&self, query: Select<entity::Entity>) -> InventarioResult<Vec<Producto>> {
        let models = Self::ordered(query).all(self.base.db()).await?;
        Ok(models.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl ProductoRepository for PgProductoRepository {
    async fn create(&self, input: CreateProducto) -> InventarioResult<Producto> {
        let codigo = input.codigo.clone();
        let model = self
            .base
            .insert(entity::ActiveModel::from(input))
            .await
            .map_err(|e| map_unique(e, || InventarioError::DuplicateCode(codigo)))?;

        tracing::info!(producto_id = model.id, codigo = %model.codigo, "Created producto");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> InventarioResult<Option<Producto>> {
        Ok(self.base.find_by_id(id).await?.map(Into::into))
    }

    async fn get_by_codigo(&self, codigo: &str) -> InventarioResult<Option<Producto>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Codigo.eq(codigo))
            .one(self.base.db())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn save(&self, producto: &Producto) -> InventarioResult<Producto> {
        let model = self
            .base
            .update(entity::ActiveModel::from(producto))
            .await
            .map_err(|e| map_unique(e, || InventarioError::DuplicateCode(producto.codigo.clone())))?;

        tracing::info!(producto_id = model.id, activo = model.activo, "Saved producto");
        Ok(model.into())
    }

    async fn list(&self, estado: Option<Estado>) -> InventarioResult<Vec<Producto>> {
        let mut query = entity::Entity::find();
        if let Some(estado) = estado {
            query = query.filter(entity::Column::Activo.eq(estado.is_activo()));
        }
        self.fetch(query).await
    }

    async fn list_paged(&self, params: PageParams) -> InventarioResult<PageResponse<Producto>> {
        let paginator = Self::ordered(entity::Entity::find()).paginate(self.base.db(), params.size);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(params.page).await?;

        Ok(PageResponse::new(
            models.into_iter().map(Into::into).collect(),
            params,
            total,
        ))
    }

    async fn search_by_nombre(&self, fragment: &str) -> InventarioResult<Vec<Producto>> {
        self.fetch(entity::Entity::find().filter(contains_ignore_case("productos", "nombre", fragment)))
            .await
    }

    async fn list_by_categoria(&self, categoria_id: i32) -> InventarioResult<Vec<Producto>> {
        self.fetch(entity::Entity::find().filter(entity::Column::CategoriaId.eq(categoria_id)))
            .await
    }

    async fn list_by_marca(&self, marca_id: i32) -> InventarioResult<Vec<Producto>> {
        self.fetch(entity::Entity::find().filter(entity::Column::MarcaId.eq(marca_id)))
            .await
    }

    async fn list_by_categoria_nombre(&self, nombre: &str) -> InventarioResult<Vec<Producto>> {
        self.fetch(
            entity::Entity::find()
                .inner_join(categorias::entity::Entity)
                .filter(categorias::entity::Column::Nombre.eq(nombre)),
        )
        .await
    }

    async fn list_by_marca_nombre(&self, nombre: &str) -> InventarioResult<Vec<Producto>> {
        self.fetch(
            entity::Entity::find()
                .inner_join(marcas::entity::Entity)
                .filter(marcas::entity::Column::Nombre.eq(nombre)),
        )
        .await
    }

    async fn list_by_precio(&self, min: Decimal, max: Decimal) -> InventarioResult<Vec<Producto>> {
        self.fetch(entity::Entity::find().filter(entity::Column::Precio.between(min, max)))
            .await
    }

    async fn list_con_stock(&self) -> InventarioResult<Vec<Producto>> {
        self.fetch(entity::Entity::find().filter(entity::Column::Stock.gt(0)))
            .await
    }

    async fn exists_by_codigo(&self, codigo: &str) -> InventarioResult<bool> {
        let count = entity::Entity::find()
            .filter(entity::Column::Codigo.eq(codigo))
            .count(self.base.db())
            .await?;
        Ok(count > 0)
    }

    async fn adjust_stock(&self, id: i32, delta: i32) -> InventarioResult<Producto> {
        // UPDATE productos SET stock = stock + $delta
        // WHERE id = $id AND stock >= -$delta AND stock <= i32::MAX - $delta
        let mut update = entity::Entity::update_many()
            .col_expr(
                entity::Column::Stock,
                Expr::cust_with_values(r#""stock" + $1"#, [delta]),
            )
            .filter(entity::Column::Id.eq(id));
        update = if delta < 0 {
            update.filter(entity::Column::Stock.gte(-i64::from(delta)))
        } else {
            update.filter(entity::Column::Stock.lte(i64::from(i32::MAX) - i64::from(delta)))
        };
        let result = update.exec(self.base.db()).await?;

        let current = self
            .base
            .find_by_id(id)
            .await?
            .ok_or_else(|| InventarioError::not_found(Entidad::Producto, id))?;

        if result.rows_affected == 0 {
            return Err(if delta < 0 {
                InventarioError::InsufficientStock {
                    disponible: current.stock,
                    solicitado: -i64::from(delta),
                }
            } else {
                InventarioError::stock_overflow()
            });
        }

        tracing::info!(producto_id = id, delta, stock = current.stock, "Adjusted stock");
        Ok(current.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(stock: i32) -> entity::Model {
        entity::Model {
            id: 7,
            codigo: "BEB-001".to_string(),
            nombre: "Agua".to_string(),
            descripcion: None,
            precio: Decimal::new(150, 2),
            stock,
            categoria_id: 1,
            marca_id: 1,
            activo: true,
            fecha_creacion: chrono::Utc::now().into(),
        }
    }

    fn repo_after_update(rows_affected: u64, stock: i32) -> PgProductoRepository {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected,
            }])
            .append_query_results([vec![model(stock)]])
            .into_connection();
        PgProductoRepository::new(db)
    }

    #[tokio::test]
    async fn test_adjust_stock_returns_updated_row() {
        let repo = repo_after_update(1, 8);

        let producto = repo.adjust_stock(7, 3).await.unwrap();
        assert_eq!(producto.stock, 8);
    }

    #[tokio::test]
    async fn test_rejected_decrement_is_insufficient_stock() {
        let repo = repo_after_update(0, 3);

        let err = repo.adjust_stock(7, -5).await.unwrap_err();
        assert!(matches!(
            err,
            InventarioError::InsufficientStock { disponible: 3, solicitado: 5 }
        ));
    }

    #[tokio::test]
    async fn test_rejected_increment_near_limit_is_validation_error() {
        let repo = repo_after_update(0, i32::MAX - 1);

        let err = repo.adjust_stock(7, 5).await.unwrap_err();
        assert!(matches!(err, InventarioError::Validation(_)));
        assert!(err.to_string().contains("excede el máximo"));
    }
}
