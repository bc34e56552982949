use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Lead columns keep the camelCase names the public form posts.
#[derive(DeriveIden)]
enum RecruitAndPartner {
    Table,
    Id,
    #[sea_orm(iden = "fullName")]
    FullName,
    Email,
    Title,
    Company,
    #[sea_orm(iden = "connectionType")]
    ConnectionType,
    Comments,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RecruitAndPartner::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecruitAndPartner::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RecruitAndPartner::FullName)
                            .string_len(255)
                            .null(),
                    )
                    .col(ColumnDef::new(RecruitAndPartner::Email).string_len(255).null())
                    .col(ColumnDef::new(RecruitAndPartner::Title).string_len(255).null())
                    .col(
                        ColumnDef::new(RecruitAndPartner::Company)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(RecruitAndPartner::ConnectionType)
                            .string_len(100)
                            .null(),
                    )
                    .col(ColumnDef::new(RecruitAndPartner::Comments).text().null())
                    .col(
                        ColumnDef::new(RecruitAndPartner::CreatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(RecruitAndPartner::UpdatedAt)
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
            .drop_table(Table::drop().table(RecruitAndPartner::Table).to_owned())
            .await
    }
}
