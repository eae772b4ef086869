use sea_query::Iden;

#[derive(Debug, Iden)]
pub enum Logs {
    Table,
    LogId,
    UserId,
    Action,
    TableName,
    RecordId,
    OldValues,
    NewValues,
    IpAddress,
    UserAgent,
    CreatedAt,
}
