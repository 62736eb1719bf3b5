use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::Name).string().not_null())
                    .col(
                        ColumnDef::new(Students::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Students::Enrollment)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::Phone).string().not_null())
                    .col(ColumnDef::new(Students::Grade).string().null())
                    .col(ColumnDef::new(Students::Status).string().not_null())
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建学期（bimester）成绩表
        manager
            .create_table(
                Table::create()
                    .table(BimesterGrades::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BimesterGrades::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BimesterGrades::StudentId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BimesterGrades::StudentName).string().null())
                    .col(ColumnDef::new(BimesterGrades::Subject).string().not_null())
                    .col(ColumnDef::new(BimesterGrades::ClassId).string().not_null())
                    .col(ColumnDef::new(BimesterGrades::Bimester).integer().not_null())
                    .col(ColumnDef::new(BimesterGrades::Note1).double().null())
                    .col(ColumnDef::new(BimesterGrades::Note2).double().null())
                    .col(ColumnDef::new(BimesterGrades::Note3).double().null())
                    .col(ColumnDef::new(BimesterGrades::Average).double().not_null())
                    .col(ColumnDef::new(BimesterGrades::Status).string().not_null())
                    .col(
                        ColumnDef::new(BimesterGrades::GradedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建出勤表
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendance::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attendance::StudentId).string().not_null())
                    .col(ColumnDef::new(Attendance::ClassId).string().not_null())
                    .col(ColumnDef::new(Attendance::Date).string().not_null())
                    .col(ColumnDef::new(Attendance::Status).string().not_null())
                    .col(ColumnDef::new(Attendance::Observations).text().null())
                    .col(
                        ColumnDef::new(Attendance::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Attendance::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建联系留言表
        manager
            .create_table(
                Table::create()
                    .table(ContactMessages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContactMessages::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContactMessages::Name).string().not_null())
                    .col(ColumnDef::new(ContactMessages::Email).string().not_null())
                    .col(ColumnDef::new(ContactMessages::Phone).string().not_null())
                    .col(ColumnDef::new(ContactMessages::Message).text().not_null())
                    .col(ColumnDef::new(ContactMessages::Status).string().not_null())
                    .col(
                        ColumnDef::new(ContactMessages::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ContactMessages::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 成绩表：自然键唯一约束，供 upsert 使用
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_bimester_grades_natural_key")
                    .table(BimesterGrades::Table)
                    .col(BimesterGrades::StudentId)
                    .col(BimesterGrades::Subject)
                    .col(BimesterGrades::ClassId)
                    .col(BimesterGrades::Bimester)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bimester_grades_class_subject_bimester")
                    .table(BimesterGrades::Table)
                    .col(BimesterGrades::ClassId)
                    .col(BimesterGrades::Subject)
                    .col(BimesterGrades::Bimester)
                    .to_owned(),
            )
            .await?;

        // 出勤表：每个学生每天一条
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_attendance_student_date")
                    .table(Attendance::Table)
                    .col(Attendance::StudentId)
                    .col(Attendance::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_date_class")
                    .table(Attendance::Table)
                    .col(Attendance::Date)
                    .col(Attendance::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_contact_messages_created_at")
                    .table(ContactMessages::Table)
                    .col(ContactMessages::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_grade")
                    .table(Students::Table)
                    .col(Students::Grade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContactMessages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BimesterGrades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    Name,
    Email,
    Enrollment,
    Phone,
    Grade,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BimesterGrades {
    #[sea_orm(iden = "bimester_grades")]
    Table,
    Id,
    StudentId,
    StudentName,
    Subject,
    ClassId,
    Bimester,
    Note1,
    Note2,
    Note3,
    Average,
    Status,
    GradedAt,
}

#[derive(DeriveIden)]
enum Attendance {
    #[sea_orm(iden = "attendance")]
    Table,
    Id,
    StudentId,
    ClassId,
    Date,
    Status,
    Observations,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ContactMessages {
    #[sea_orm(iden = "contact_messages")]
    Table,
    Id,
    Name,
    Email,
    Phone,
    Message,
    Status,
    CreatedAt,
    UpdatedAt,
}
