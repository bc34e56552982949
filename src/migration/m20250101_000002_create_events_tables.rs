use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Events {
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
enum EventTags {
    Table,
    Id,
    EventId,
    Tag,
}

#[derive(DeriveIden)]
enum EventGallery {
    Table,
    Id,
    EventId,
    ImageUrl,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::Title).string_len(255).null())
                    .col(ColumnDef::new(Events::Date).string_len(50).null())
                    .col(ColumnDef::new(Events::Category).string_len(100).null())
                    .col(ColumnDef::new(Events::Description).text().null())
                    .col(ColumnDef::new(Events::Image).string_len(512).null())
                    .col(
                        ColumnDef::new(Events::CreatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Events::UpdatedAt)
                            .date_time()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // No foreign keys: children are removed in the same transaction as the parent.
        manager
            .create_table(
                Table::create()
                    .table(EventTags::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventTags::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EventTags::EventId).integer().not_null())
                    .col(ColumnDef::new(EventTags::Tag).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_tags_event_id")
                    .table(EventTags::Table)
                    .col(EventTags::EventId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EventGallery::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventGallery::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EventGallery::EventId).integer().not_null())
                    .col(
                        ColumnDef::new(EventGallery::ImageUrl)
                            .string_len(512)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_event_gallery_event_id")
                    .table(EventGallery::Table)
                    .col(EventGallery::EventId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventGallery::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(EventTags::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await
    }
}
