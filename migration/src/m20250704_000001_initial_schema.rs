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
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Organizations::Name).string().not_null())
                    .col(
                        ColumnDef::new(Organizations::Timezone)
                            .string()
                            .not_null()
                            .default("UTC"),
                    )
                    .col(
                        ColumnDef::new(Organizations::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Organizations::WeeklyReconciliationEnabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Organizations::ReconWeekday).small_integer())
                    .col(ColumnDef::new(Organizations::ReconHour).small_integer())
                    .col(ColumnDef::new(Organizations::ReconWindowMinutes).small_integer())
                    .col(ColumnDef::new(Organizations::SweepHour).small_integer())
                    .col(ColumnDef::new(Organizations::SweepWindowMinutes).small_integer())
                    .col(ColumnDef::new(Organizations::LookbackDays).small_integer())
                    .col(ColumnDef::new(Organizations::ExpiryDays).small_integer())
                    .col(
                        ColumnDef::new(Organizations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Organizations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create workday_summaries table
        manager
            .create_table(
                Table::create()
                    .table(WorkdaySummaries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkdaySummaries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WorkdaySummaries::OrgId).uuid().not_null())
                    .col(
                        ColumnDef::new(WorkdaySummaries::EmployeeId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WorkdaySummaries::Day).date().not_null())
                    .col(
                        ColumnDef::new(WorkdaySummaries::WorkedMinutes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(WorkdaySummaries::Status).string().not_null())
                    .col(
                        ColumnDef::new(WorkdaySummaries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(WorkdaySummaries::UpdatedAt)
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
                    .name("uq_workday_org_employee_day")
                    .table(WorkdaySummaries::Table)
                    .col(WorkdaySummaries::OrgId)
                    .col(WorkdaySummaries::EmployeeId)
                    .col(WorkdaySummaries::Day)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create overtime_candidates table
        manager
            .create_table(
                Table::create()
                    .table(OvertimeCandidates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OvertimeCandidates::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(OvertimeCandidates::OrgId).uuid().not_null())
                    .col(
                        ColumnDef::new(OvertimeCandidates::EmployeeId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(OvertimeCandidates::Day).date().not_null())
                    .col(ColumnDef::new(OvertimeCandidates::WorkdayId).uuid())
                    .col(
                        ColumnDef::new(OvertimeCandidates::Minutes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(OvertimeCandidates::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OvertimeCandidates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(OvertimeCandidates::UpdatedAt)
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
                    .name("uq_candidate_org_employee_day")
                    .table(OvertimeCandidates::Table)
                    .col(OvertimeCandidates::OrgId)
                    .col(OvertimeCandidates::EmployeeId)
                    .col(OvertimeCandidates::Day)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create time_bank_movements table
        manager
            .create_table(
                Table::create()
                    .table(TimeBankMovements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimeBankMovements::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TimeBankMovements::OrgId).uuid().not_null())
                    .col(
                        ColumnDef::new(TimeBankMovements::EmployeeId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimeBankMovements::WorkdayId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TimeBankMovements::Origin).string().not_null())
                    .col(
                        ColumnDef::new(TimeBankMovements::Minutes)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimeBankMovements::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Idempotency contract: at most one movement per (workday, origin)
        manager
            .create_index(
                Index::create()
                    .name("uq_movement_workday_origin")
                    .table(TimeBankMovements::Table)
                    .col(TimeBankMovements::WorkdayId)
                    .col(TimeBankMovements::Origin)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create overwork_authorizations table
        manager
            .create_table(
                Table::create()
                    .table(OverworkAuthorizations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(OverworkAuthorizations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(OverworkAuthorizations::OrgId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OverworkAuthorizations::EmployeeId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OverworkAuthorizations::Day)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OverworkAuthorizations::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(OverworkAuthorizations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(OverworkAuthorizations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Create alerts table
        manager
            .create_table(
                Table::create()
                    .table(Alerts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Alerts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Alerts::OrgId).uuid().not_null())
                    .col(ColumnDef::new(Alerts::EmployeeId).uuid().not_null())
                    .col(ColumnDef::new(Alerts::Day).date().not_null())
                    .col(ColumnDef::new(Alerts::AlertType).string().not_null())
                    .col(ColumnDef::new(Alerts::Status).string().not_null())
                    .col(
                        ColumnDef::new(Alerts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Alerts::UpdatedAt)
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
                    .name("uq_alert_org_employee_day_type")
                    .table(Alerts::Table)
                    .col(Alerts::OrgId)
                    .col(Alerts::EmployeeId)
                    .col(Alerts::Day)
                    .col(Alerts::AlertType)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create scheduled_jobs table
        manager
            .create_table(
                Table::create()
                    .table(ScheduledJobs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScheduledJobs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScheduledJobs::JobType).string().not_null())
                    .col(ColumnDef::new(ScheduledJobs::Status).string().not_null())
                    .col(ColumnDef::new(ScheduledJobs::Payload).json().not_null())
                    .col(
                        ColumnDef::new(ScheduledJobs::AttemptCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ScheduledJobs::MaxRetries)
                            .integer()
                            .not_null()
                            .default(3),
                    )
                    .col(ColumnDef::new(ScheduledJobs::ScheduledAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ScheduledJobs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ScheduledJobs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(ScheduledJobs::StartedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(ScheduledJobs::CompletedAt).timestamp_with_time_zone())
                    .col(ColumnDef::new(ScheduledJobs::LockToken).uuid())
                    .col(ColumnDef::new(ScheduledJobs::LockExpiresAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScheduledJobs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Alerts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OverworkAuthorizations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TimeBankMovements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(OvertimeCandidates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WorkdaySummaries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Organizations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Organizations {
    Table,
    Id,
    Name,
    Timezone,
    Active,
    WeeklyReconciliationEnabled,
    ReconWeekday,
    ReconHour,
    ReconWindowMinutes,
    SweepHour,
    SweepWindowMinutes,
    LookbackDays,
    ExpiryDays,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum WorkdaySummaries {
    Table,
    Id,
    OrgId,
    EmployeeId,
    Day,
    WorkedMinutes,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum OvertimeCandidates {
    Table,
    Id,
    OrgId,
    EmployeeId,
    Day,
    WorkdayId,
    Minutes,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TimeBankMovements {
    Table,
    Id,
    OrgId,
    EmployeeId,
    WorkdayId,
    Origin,
    Minutes,
    CreatedAt,
}

#[derive(DeriveIden)]
enum OverworkAuthorizations {
    Table,
    Id,
    OrgId,
    EmployeeId,
    Day,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Alerts {
    Table,
    Id,
    OrgId,
    EmployeeId,
    Day,
    AlertType,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ScheduledJobs {
    Table,
    Id,
    JobType,
    Status,
    Payload,
    AttemptCount,
    MaxRetries,
    ScheduledAt,
    CreatedAt,
    UpdatedAt,
    StartedAt,
    CompletedAt,
    LockToken,
    LockExpiresAt,
}
