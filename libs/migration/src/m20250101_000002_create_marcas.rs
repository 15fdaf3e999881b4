use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Marcas::Table)
                    .if_not_exists()
                    .col(pk_auto(Marcas::Id))
                    .col(string_len(Marcas::Nombre, 100).unique_key())
                    .col(string_len_null(Marcas::Descripcion, 255))
                    .col(string_len_null(Marcas::PaisOrigen, 100))
                    .col(boolean(Marcas::Activo).default(true))
                    .col(
                        timestamp_with_time_zone(Marcas::FechaCreacion)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Marcas::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Marcas {
    Table,
    Id,
    Nombre,
    Descripcion,
    PaisOrigen,
    Activo,
    FechaCreacion,
}
