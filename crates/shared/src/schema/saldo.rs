use sea_query::Iden;

#[derive(Debug, Iden)]
pub enum Saldo {
    Table,
    SaldoId,
    UserId,
    TotalSaldo,
    CreatedAt,
    UpdatedAt,
}
