use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categorias::Table)
                    .if_not_exists()
                    .col(pk_auto(Categorias::Id))
                    .col(string_len(Categorias::Nombre, 100).unique_key())
                    .col(string_len_null(Categorias::Descripcion, 255))
                    .col(boolean(Categorias::Activo).default(true))
                    .col(
                        timestamp_with_time_zone(Categorias::FechaCreacion)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Categorias::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Categorias {
    Table,
    Id,
    Nombre,
    Descripcion,
    Activo,
    FechaCreacion,
}
