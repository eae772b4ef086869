use sea_query::Iden;

#[derive(Debug, Iden)]
pub enum BiayaLain {
    Table,
    BiayaLainId,
    UserId,
    Tanggal,
    Biaya,
    Keterangan,
    FotoStruk,
    CreatedAt,
}
