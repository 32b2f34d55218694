//! Migration: departments (with seed data), issues, department issues,
//! newsletters, and the notice board.

use sea_orm_migration::prelude::*;
use uuid::Uuid;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Seed rows for the static department reference data.
const DEPARTMENTS: &[(&str, &str, &str, &str)] = &[
    (
        "Administrative",
        "Admin",
        "administrative",
        "administrative",
    ),
    ("Architecture", "Arch", "architecture", "engineering"),
    (
        "Automation and Robotics Engineering",
        "A&R",
        "automation-robotics",
        "engineering",
    ),
    (
        "Computer Engineering",
        "CE",
        "computer-engineering",
        "engineering",
    ),
    (
        "Electronics and Telecommunication",
        "E&TC",
        "electronics-telecommunication",
        "engineering",
    ),
    (
        "Information Technology",
        "IT",
        "information-technology",
        "technology",
    ),
    (
        "Mechanical Engineering",
        "Mech",
        "mechanical-engineering",
        "engineering",
    ),
    ("Applied Sciences", "AS", "applied-sciences", "science"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Departments::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Departments::Name).string().not_null())
                    .col(ColumnDef::new(Departments::ShortName).string().not_null())
                    .col(
                        ColumnDef::new(Departments::Slug)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Departments::Category).string().not_null())
                    .col(ColumnDef::new(Departments::Description).text().null())
                    .col(
                        ColumnDef::new(Departments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, short_name, slug, category) in DEPARTMENTS {
            let insert = Query::insert()
                .into_table(Departments::Table)
                .columns([
                    Departments::Id,
                    Departments::Name,
                    Departments::ShortName,
                    Departments::Slug,
                    Departments::Category,
                ])
                .values_panic([
                    Uuid::new_v4().into(),
                    (*name).into(),
                    (*short_name).into(),
                    (*slug).into(),
                    (*category).into(),
                ])
                .to_owned();
            manager.exec_stmt(insert).await?;
        }

        manager
            .create_table(
                Table::create()
                    .table(Issues::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Issues::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Issues::Year).integer().not_null())
                    .col(ColumnDef::new(Issues::Month).small_integer().not_null())
                    .col(ColumnDef::new(Issues::Title).string().not_null())
                    .col(ColumnDef::new(Issues::GlobalPdfUrl).string().null())
                    .col(
                        ColumnDef::new(Issues::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Issues::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(Issues::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Issues::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Natural key backing the upsert path
        manager
            .create_index(
                Index::create()
                    .name("uq_issues_year_month")
                    .table(Issues::Table)
                    .col(Issues::Year)
                    .col(Issues::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(DepartmentIssues::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DepartmentIssues::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(DepartmentIssues::IssueId).uuid().not_null())
                    .col(
                        ColumnDef::new(DepartmentIssues::DepartmentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(DepartmentIssues::Summary).text().null())
                    .col(ColumnDef::new(DepartmentIssues::PdfUrl).string().null())
                    .col(
                        ColumnDef::new(DepartmentIssues::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(DepartmentIssues::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(DepartmentIssues::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(DepartmentIssues::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_department_issues_issue")
                            .from(DepartmentIssues::Table, DepartmentIssues::IssueId)
                            .to(Issues::Table, Issues::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_department_issues_department")
                            .from(DepartmentIssues::Table, DepartmentIssues::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One contribution per department per issue
        manager
            .create_index(
                Index::create()
                    .name("uq_department_issues_issue_department")
                    .table(DepartmentIssues::Table)
                    .col(DepartmentIssues::IssueId)
                    .col(DepartmentIssues::DepartmentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Newsletters::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Newsletters::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Newsletters::Title).string().not_null())
                    .col(ColumnDef::new(Newsletters::Description).text().null())
                    .col(ColumnDef::new(Newsletters::Year).integer().not_null())
                    .col(ColumnDef::new(Newsletters::Month).small_integer().not_null())
                    .col(ColumnDef::new(Newsletters::IssueDate).date().not_null())
                    .col(ColumnDef::new(Newsletters::PdfUrl).string().null())
                    .col(
                        ColumnDef::new(Newsletters::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Newsletters::CreatedBy).uuid().null())
                    .col(
                        ColumnDef::new(Newsletters::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Newsletters::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_newsletters_published_created")
                    .table(Newsletters::Table)
                    .col(Newsletters::IsPublished)
                    .col(Newsletters::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(NoticeBoard::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NoticeBoard::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(NoticeBoard::Title).string().not_null())
                    .col(ColumnDef::new(NoticeBoard::Body).text().not_null())
                    .col(ColumnDef::new(NoticeBoard::LinkUrl).string().null())
                    .col(
                        ColumnDef::new(NoticeBoard::Pinned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(NoticeBoard::PublishedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(NoticeBoard::ExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(NoticeBoard::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(NoticeBoard::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notice_board_published_at")
                    .table(NoticeBoard::Table)
                    .col(NoticeBoard::PublishedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NoticeBoard::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Newsletters::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DepartmentIssues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Issues::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Departments {
    Table,
    Id,
    Name,
    ShortName,
    Slug,
    Category,
    Description,
    CreatedAt,
}

#[derive(Iden)]
enum Issues {
    Table,
    Id,
    Year,
    Month,
    Title,
    GlobalPdfUrl,
    PublishedAt,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum DepartmentIssues {
    Table,
    Id,
    IssueId,
    DepartmentId,
    Summary,
    PdfUrl,
    PublishedAt,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Newsletters {
    Table,
    Id,
    Title,
    Description,
    Year,
    Month,
    IssueDate,
    PdfUrl,
    IsPublished,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum NoticeBoard {
    Table,
    Id,
    Title,
    Body,
    LinkUrl,
    Pinned,
    PublishedAt,
    ExpiresAt,
    CreatedAt,
    UpdatedAt,
}
