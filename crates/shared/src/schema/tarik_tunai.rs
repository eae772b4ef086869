use sea_query::Iden;

#[derive(Debug, Iden)]
pub enum TarikTunai {
    Table,
    TarikTunaiId,
    UserId,
    Tanggal,
    Bank,
    NominalTarik,
    BiayaTarik,
    Keterangan,
    Status,
    FotoStruk,
    CreatedAt,
}
