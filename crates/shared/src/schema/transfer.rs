use sea_query::Iden;

#[derive(Debug, Iden)]
pub enum Transfer {
    Table,
    TransferId,
    UserId,
    Tanggal,
    BankTujuan,
    NomorRekening,
    NamaPemilik,
    Nominal,
    Biaya,
    Keterangan,
    Status,
    FotoStruk,
    CreatedAt,
    UpdatedAt,
}

#[derive(Debug, Iden)]
pub enum TransferFavorit {
    Table,
    FavoritId,
    UserId,
    BankTujuan,
    NomorRekening,
    NamaPemilik,
    CreatedAt,
}
