use sea_query::Iden;

#[derive(Debug, Iden)]
pub enum TarikKredit {
    Table,
    TarikKreditId,
    UserId,
    Tanggal,
    NamaUser,
    Nominal,
    AdminFee,
    Sisa,
    Keterangan,
    FotoStruk,
    CreatedAt,
}
