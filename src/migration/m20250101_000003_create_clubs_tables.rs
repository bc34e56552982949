use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Clubs {
    Table,
    Id,
    Title,
    Date,
    Category,
    Description,
    Image,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ClubTags {
    Table,
    Id,
    ClubId,
    Tag,
}

#[derive(DeriveIden)]
enum ClubGallery {
    Table,
    Id,
    ClubId,
    ImageUrl,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clubs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clubs::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Clubs::Title).string_len(255).null())
                    .col(ColumnDef::new(Clubs::Date).string_len(50).null())
                    .col(ColumnDef::new(Clubs::Category).string_len(100).null())
                    .col(ColumnDef::new(Clubs::Description).text().null())
                    .col(ColumnDef::new(Clubs::Image).string_len(512).null())
                    .col(
                        ColumnDef::new(Clubs::CreatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Clubs::UpdatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClubTags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClubTags::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClubTags::ClubId).integer().not_null())
                    .col(ColumnDef::new(ClubTags::Tag).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_club_tags_club_id")
                    .table(ClubTags::Table)
                    .col(ClubTags::ClubId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClubGallery::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClubGallery::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClubGallery::ClubId).integer().not_null())
                    .col(
                        ColumnDef::new(ClubGallery::ImageUrl)
                            .string_len(512)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_club_gallery_club_id")
                    .table(ClubGallery::Table)
                    .col(ClubGallery::ClubId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClubGallery::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClubTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clubs::Table).to_owned())
            .await
    }
}
