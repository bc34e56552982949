use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Faculty {
    Table,
    Id,
    Title,
    Category,
    Description,
    Link,
    FileName,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Placement {
    Table,
    Id,
    Title,
    Year,
    Category,
    Description,
    Link,
    LogoFile,
    FileName,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Recruiters {
    Table,
    Id,
    Title,
    Category,
    Description,
    FileName,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Testimonials {
    Table,
    Id,
    Name,
    Position,
    Testimonial,
    Link,
    FileName,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Banners {
    Table,
    Id,
    Title,
    Category,
    FileName,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum EduTours {
    Table,
    Id,
    Title,
    Category,
    Subcategory,
    Description,
    FileName,
    CreatedAt,
    UpdatedAt,
}

fn id(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

fn string(col: impl IntoIden, len: u32) -> ColumnDef {
    ColumnDef::new(col).string_len(len).null().to_owned()
}

fn text(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col).text().null().to_owned()
}

fn stamp(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .date_time()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Faculty::Table)
                    .if_not_exists()
                    .col(id(Faculty::Id))
                    .col(string(Faculty::Title, 255))
                    .col(string(Faculty::Category, 100))
                    .col(text(Faculty::Description))
                    .col(string(Faculty::Link, 512))
                    .col(string(Faculty::FileName, 512))
                    .col(stamp(Faculty::CreatedAt))
                    .col(stamp(Faculty::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Placement::Table)
                    .if_not_exists()
                    .col(id(Placement::Id))
                    .col(string(Placement::Title, 255))
                    .col(string(Placement::Year, 20))
                    .col(string(Placement::Category, 100))
                    .col(text(Placement::Description))
                    .col(string(Placement::Link, 512))
                    .col(string(Placement::LogoFile, 512))
                    .col(string(Placement::FileName, 512))
                    .col(stamp(Placement::CreatedAt))
                    .col(stamp(Placement::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Recruiters::Table)
                    .if_not_exists()
                    .col(id(Recruiters::Id))
                    .col(string(Recruiters::Title, 255))
                    .col(string(Recruiters::Category, 100))
                    .col(text(Recruiters::Description))
                    .col(string(Recruiters::FileName, 512))
                    .col(stamp(Recruiters::CreatedAt))
                    .col(stamp(Recruiters::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Testimonials::Table)
                    .if_not_exists()
                    .col(id(Testimonials::Id))
                    .col(string(Testimonials::Name, 255))
                    .col(string(Testimonials::Position, 255))
                    .col(text(Testimonials::Testimonial))
                    .col(string(Testimonials::Link, 512))
                    .col(string(Testimonials::FileName, 512))
                    .col(stamp(Testimonials::CreatedAt))
                    .col(stamp(Testimonials::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Banners::Table)
                    .if_not_exists()
                    .col(id(Banners::Id))
                    .col(string(Banners::Title, 255))
                    .col(string(Banners::Category, 100))
                    .col(string(Banners::FileName, 512))
                    .col(stamp(Banners::CreatedAt))
                    .col(stamp(Banners::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EduTours::Table)
                    .if_not_exists()
                    .col(id(EduTours::Id))
                    .col(string(EduTours::Title, 255))
                    .col(string(EduTours::Category, 100))
                    .col(string(EduTours::Subcategory, 100))
                    .col(text(EduTours::Description))
                    .col(string(EduTours::FileName, 512))
                    .col(stamp(EduTours::CreatedAt))
                    .col(stamp(EduTours::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EduTours::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Banners::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Testimonials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Recruiters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Placement::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Faculty::Table).to_owned())
            .await
    }
}
