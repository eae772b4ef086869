use sea_query::Iden;

#[derive(Debug, Iden)]
pub enum TransferDebit {
    Table,
    TransferDebitId,
    UserId,
    Tanggal,
    Biaya,
    Keterangan,
    Status,
    FotoStruk,
    CreatedAt,
}
