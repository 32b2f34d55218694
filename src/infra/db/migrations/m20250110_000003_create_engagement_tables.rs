//! Migration: submissions, reactions, feedback, and subscribers.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Submissions::Title).string().not_null())
                    .col(ColumnDef::new(Submissions::Summary).text().not_null())
                    .col(ColumnDef::new(Submissions::Category).string().not_null())
                    .col(ColumnDef::new(Submissions::Department).string().not_null())
                    .col(ColumnDef::new(Submissions::Semester).small_integer().null())
                    .col(ColumnDef::new(Submissions::MediaUrl).string().null())
                    .col(ColumnDef::new(Submissions::ExternalLink).string().null())
                    .col(
                        ColumnDef::new(Submissions::SubmitterName)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::SubmitterEmail).string().null())
                    .col(
                        ColumnDef::new(Submissions::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Submissions::Pinned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Submissions::ModeratedBy).uuid().null())
                    .col(
                        ColumnDef::new(Submissions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Submissions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Moderation queue and spotlight both filter on these
        manager
            .create_index(
                Index::create()
                    .name("idx_submissions_status")
                    .table(Submissions::Table)
                    .col(Submissions::Status)
                    .col(Submissions::Pinned)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Reactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reactions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reactions::UserId).uuid().not_null())
                    .col(ColumnDef::new(Reactions::EntityType).string().not_null())
                    .col(ColumnDef::new(Reactions::EntityId).uuid().not_null())
                    .col(ColumnDef::new(Reactions::Reaction).string().not_null())
                    .col(
                        ColumnDef::new(Reactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Reactions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one reaction per user per entity; backs the toggle upsert
        manager
            .create_index(
                Index::create()
                    .name("uq_reactions_user_entity")
                    .table(Reactions::Table)
                    .col(Reactions::UserId)
                    .col(Reactions::EntityType)
                    .col(Reactions::EntityId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Feedback::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Feedback::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Feedback::UserId).uuid().null())
                    .col(ColumnDef::new(Feedback::Rating).small_integer().not_null())
                    .col(ColumnDef::new(Feedback::Review).text().null())
                    .col(
                        ColumnDef::new(Feedback::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subscribers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subscribers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Subscribers::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Subscribers::Name).string().not_null())
                    .col(ColumnDef::new(Subscribers::Phone).string().not_null())
                    .col(ColumnDef::new(Subscribers::Department).string().not_null())
                    .col(ColumnDef::new(Subscribers::Semester).small_integer().null())
                    .col(
                        ColumnDef::new(Subscribers::Confirmed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Subscribers::ConfirmToken).string().null())
                    .col(
                        ColumnDef::new(Subscribers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Confirmation looks subscribers up by token
        manager
            .create_index(
                Index::create()
                    .name("idx_subscribers_confirm_token")
                    .table(Subscribers::Table)
                    .col(Subscribers::ConfirmToken)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subscribers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Feedback::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Reactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Submissions {
    Table,
    Id,
    Title,
    Summary,
    Category,
    Department,
    Semester,
    MediaUrl,
    ExternalLink,
    SubmitterName,
    SubmitterEmail,
    Status,
    Pinned,
    ModeratedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Reactions {
    Table,
    Id,
    UserId,
    EntityType,
    EntityId,
    Reaction,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Feedback {
    Table,
    Id,
    UserId,
    Rating,
    Review,
    CreatedAt,
}

#[derive(Iden)]
enum Subscribers {
    Table,
    Id,
    Email,
    Name,
    Phone,
    Department,
    Semester,
    Confirmed,
    ConfirmToken,
    CreatedAt,
}
