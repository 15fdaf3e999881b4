use sea_orm_migration::{prelude::*, schema::*};

use super::m20250101_000001_create_categorias::Categorias;
use super::m20250101_000002_create_marcas::Marcas;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Productos::Table)
                    .if_not_exists()
                    .col(pk_auto(Productos::Id))
                    .col(string_len(Productos::Codigo, 50).unique_key())
                    .col(string_len(Productos::Nombre, 100))
                    .col(string_len_null(Productos::Descripcion, 255))
                    .col(decimal_len(Productos::Precio, 10, 2))
                    .col(integer(Productos::Stock).default(0))
                    .col(integer(Productos::CategoriaId))
                    .col(integer(Productos::MarcaId))
                    .col(boolean(Productos::Activo).default(true))
                    .col(
                        timestamp_with_time_zone(Productos::FechaCreacion)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_productos_categoria_id")
                            .from(Productos::Table, Productos::CategoriaId)
                            .to(Categorias::Table, Categorias::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_productos_marca_id")
                            .from(Productos::Table, Productos::MarcaId)
                            .to(Marcas::Table, Marcas::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Last line of defence for concurrent stock adjustments
        manager
            .get_connection()
            .execute_unprepared(
                "ALTER TABLE productos ADD CONSTRAINT chk_productos_stock CHECK (stock >= 0)",
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_productos_categoria_id")
                    .table(Productos::Table)
                    .col(Productos::CategoriaId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_productos_marca_id")
                    .table(Productos::Table)
                    .col(Productos::MarcaId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Productos::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Productos {
    Table,
    Id,
    Codigo,
    Nombre,
    Descripcion,
    Precio,
    Stock,
    CategoriaId,
    MarcaId,
    Activo,
    FechaCreacion,
}
