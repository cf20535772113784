use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建员工表
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employees::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Employees::EmpCode)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Employees::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Employees::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Employees::DisplayName).string().null())
                    .col(ColumnDef::new(Employees::Role).string().not_null())
                    .col(ColumnDef::new(Employees::Status).string().not_null())
                    .col(ColumnDef::new(Employees::Level).string().not_null())
                    .col(
                        ColumnDef::new(Employees::WarningCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Employees::Approver1).string().null())
                    .col(ColumnDef::new(Employees::Approver2).string().null())
                    .col(ColumnDef::new(Employees::Approver3).string().null())
                    .col(ColumnDef::new(Employees::Manager).string().null())
                    .col(ColumnDef::new(Employees::Gm).string().null())
                    .col(ColumnDef::new(Employees::LastLogin).big_integer().null())
                    .col(
                        ColumnDef::new(Employees::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Employees::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建题目表
        manager
            .create_table(
                Table::create()
                    .table(Questions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Questions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Questions::Content).text().not_null())
                    .col(ColumnDef::new(Questions::Weight).double().not_null())
                    .col(
                        ColumnDef::new(Questions::MaxScore)
                            .double()
                            .not_null()
                            .default(5.0),
                    )
                    .col(
                        ColumnDef::new(Questions::ApplicableLevel)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Questions::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Questions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Questions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建考核单表
        manager
            .create_table(
                Table::create()
                    .table(Assessments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assessments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assessments::EmployeeId).big_integer().null())
                    .col(ColumnDef::new(Assessments::Title).string().not_null())
                    .col(ColumnDef::new(Assessments::TargetLevel).string().not_null())
                    .col(ColumnDef::new(Assessments::Status).string().not_null())
                    .col(ColumnDef::new(Assessments::CurrentStage).string().null())
                    .col(ColumnDef::new(Assessments::Appr1Status).string().null())
                    .col(ColumnDef::new(Assessments::Appr1Date).big_integer().null())
                    .col(ColumnDef::new(Assessments::Appr1Note).text().null())
                    .col(ColumnDef::new(Assessments::Appr2Status).string().null())
                    .col(ColumnDef::new(Assessments::Appr2Date).big_integer().null())
                    .col(ColumnDef::new(Assessments::Appr2Note).text().null())
                    .col(ColumnDef::new(Assessments::Appr3Status).string().null())
                    .col(ColumnDef::new(Assessments::Appr3Date).big_integer().null())
                    .col(ColumnDef::new(Assessments::Appr3Note).text().null())
                    .col(ColumnDef::new(Assessments::MgrStatus).string().null())
                    .col(ColumnDef::new(Assessments::MgrDate).big_integer().null())
                    .col(ColumnDef::new(Assessments::MgrNote).text().null())
                    .col(ColumnDef::new(Assessments::GmStatus).string().null())
                    .col(ColumnDef::new(Assessments::GmDate).big_integer().null())
                    .col(ColumnDef::new(Assessments::GmNote).text().null())
                    .col(ColumnDef::new(Assessments::RejectionStage).string().null())
                    .col(ColumnDef::new(Assessments::RejectionReason).text().null())
                    .col(ColumnDef::new(Assessments::FinalScore).double().null())
                    .col(
                        ColumnDef::new(Assessments::SubmittedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Assessments::CompletedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Assessments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assessments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assessments::Table, Assessments::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建作答记录表
        manager
            .create_table(
                Table::create()
                    .table(Responses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Responses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Responses::AssessmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Responses::QuestionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Responses::Weight).double().not_null())
                    .col(ColumnDef::new(Responses::SelfScore).double().null())
                    .col(ColumnDef::new(Responses::SelfComment).text().null())
                    .col(ColumnDef::new(Responses::Appr1Score).double().null())
                    .col(ColumnDef::new(Responses::Appr1Comment).text().null())
                    .col(ColumnDef::new(Responses::Appr2Score).double().null())
                    .col(ColumnDef::new(Responses::Appr2Comment).text().null())
                    .col(ColumnDef::new(Responses::Appr3Score).double().null())
                    .col(ColumnDef::new(Responses::Appr3Comment).text().null())
                    .col(ColumnDef::new(Responses::MgrScore).double().null())
                    .col(ColumnDef::new(Responses::MgrComment).text().null())
                    .col(ColumnDef::new(Responses::GmScore).double().null())
                    .col(ColumnDef::new(Responses::GmComment).text().null())
                    .col(
                        ColumnDef::new(Responses::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Responses::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Responses::Table, Responses::AssessmentId)
                            .to(Assessments::Table, Assessments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Responses::Table, Responses::QuestionId)
                            .to(Questions::Table, Questions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建通知表
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Notifications::EmployeeId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::Kind).string().not_null())
                    .col(ColumnDef::new(Notifications::Title).string().not_null())
                    .col(ColumnDef::new(Notifications::Content).text().null())
                    .col(
                        ColumnDef::new(Notifications::AssessmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::IsRead)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notifications::Table, Notifications::EmployeeId)
                            .to(Employees::Table, Employees::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notifications::Table, Notifications::AssessmentId)
                            .to(Assessments::Table, Assessments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 作答记录唯一索引：同一考核单同一题目只允许一行
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uniq_responses_assessment_question")
                    .table(Responses::Table)
                    .col(Responses::AssessmentId)
                    .col(Responses::QuestionId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 考核单表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assessments_employee_id")
                    .table(Assessments::Table)
                    .col(Assessments::EmployeeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assessments_current_stage")
                    .table(Assessments::Table)
                    .col(Assessments::CurrentStage)
                    .to_owned(),
            )
            .await?;

        // 题目表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_questions_applicable_level")
                    .table(Questions::Table)
                    .col(Questions::ApplicableLevel)
                    .to_owned(),
            )
            .await?;

        // 通知表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notifications_employee_id")
                    .table(Notifications::Table)
                    .col(Notifications::EmployeeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Responses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assessments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Questions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Employees {
    Table,
    Id,
    EmpCode,
    Email,
    PasswordHash,
    DisplayName,
    Role,
    Status,
    Level,
    WarningCount,
    Approver1,
    Approver2,
    Approver3,
    Manager,
    Gm,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Questions {
    Table,
    Id,
    Content,
    Weight,
    MaxScore,
    ApplicableLevel,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assessments {
    Table,
    Id,
    EmployeeId,
    Title,
    TargetLevel,
    Status,
    CurrentStage,
    Appr1Status,
    Appr1Date,
    Appr1Note,
    Appr2Status,
    Appr2Date,
    Appr2Note,
    Appr3Status,
    Appr3Date,
    Appr3Note,
    MgrStatus,
    MgrDate,
    MgrNote,
    GmStatus,
    GmDate,
    GmNote,
    RejectionStage,
    RejectionReason,
    FinalScore,
    SubmittedAt,
    CompletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Responses {
    Table,
    Id,
    AssessmentId,
    QuestionId,
    Weight,
    SelfScore,
    SelfComment,
    Appr1Score,
    Appr1Comment,
    Appr2Score,
    Appr2Comment,
    Appr3Score,
    Appr3Comment,
    MgrScore,
    MgrComment,
    GmScore,
    GmComment,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Notifications {
    Table,
    Id,
    EmployeeId,
    Kind,
    Title,
    Content,
    AssessmentId,
    IsRead,
    CreatedAt,
}
