use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Gallery {
    Table,
    Id,
    Title,
    Category,
    Filename,
    Filepath,
    Size,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Gallery::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Gallery::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Gallery::Title).string_len(255).null())
                    .col(ColumnDef::new(Gallery::Category).string_len(100).null())
                    .col(ColumnDef::new(Gallery::Filename).string_len(255).null())
                    .col(ColumnDef::new(Gallery::Filepath).string_len(512).null())
                    .col(ColumnDef::new(Gallery::Size).big_integer().null())
                    .col(
                        ColumnDef::new(Gallery::CreatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Gallery::UpdatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Gallery::Table).to_owned())
            .await
    }
}
