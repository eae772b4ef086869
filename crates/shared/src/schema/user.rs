use sea_query::Iden;

#[derive(Debug, Iden)]
pub enum Users {
    Table,
    UserId,
    Username,
    Password,
    Role,
    Status,
    CreatedAt,
    UpdatedAt,
}
