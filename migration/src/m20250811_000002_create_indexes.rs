use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_type_status")
                    .table(ScheduledJobs::Table)
                    .col(ScheduledJobs::JobType)
                    .col(ScheduledJobs::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_candidates_org_day")
                    .table(OvertimeCandidates::Table)
                    .col(OvertimeCandidates::OrgId)
                    .col(OvertimeCandidates::Day)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_workdays_org_day")
                    .table(WorkdaySummaries::Table)
                    .col(WorkdaySummaries::OrgId)
                    .col(WorkdaySummaries::Day)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_authorizations_org_status")
                    .table(OverworkAuthorizations::Table)
                    .col(OverworkAuthorizations::OrgId)
                    .col(OverworkAuthorizations::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_jobs_type_status")
                    .table(ScheduledJobs::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_candidates_org_day")
                    .table(OvertimeCandidates::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_workdays_org_day")
                    .table(WorkdaySummaries::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_authorizations_org_status")
                    .table(OverworkAuthorizations::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum ScheduledJobs {
    Table,
    JobType,
    Status,
}

#[derive(DeriveIden)]
enum OvertimeCandidates {
    Table,
    OrgId,
    Day,
}

#[derive(DeriveIden)]
enum WorkdaySummaries {
    Table,
    OrgId,
    Day,
}

#[derive(DeriveIden)]
enum OverworkAuthorizations {
    Table,
    OrgId,
    Status,
}
