use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create organizations table
        manager
            .create_table(
                Table::create()
                    .table(Organizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Organizations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Organizations::Organization).string().not_null())
                    .col(ColumnDef::new(Organizations::Products).text().not_null().default("[]"))
                    .col(ColumnDef::new(Organizations::MarketValue).big_integer().not_null())
                    .col(ColumnDef::new(Organizations::Address).string().not_null())
                    .col(ColumnDef::new(Organizations::Ceo).string().not_null())
                    .col(ColumnDef::new(Organizations::Country).string().not_null())
                    .col(ColumnDef::new(Organizations::Employees).text().not_null().default("[]"))
                    .col(ColumnDef::new(Organizations::NoOfEmployees).integer().not_null().default(0))
                    .col(ColumnDef::new(Organizations::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Organizations::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        // Lookups and deletes by organization name
        manager
            .create_index(
                Index::create()
                    .name("idx_organizations_organization")
                    .table(Organizations::Table)
                    .col(Organizations::Organization)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null().unique_key())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(ColumnDef::new(Users::CreatedAt).timestamp_with_time_zone().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp_with_time_zone().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Organizations::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Organizations {
    Table,
    Id,
    Organization,
    Products,
    MarketValue,
    Address,
    Ceo,
    Country,
    Employees,
    NoOfEmployees,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    Password,
    CreatedAt,
    UpdatedAt,
}
