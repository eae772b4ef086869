use sea_query::Iden;

#[derive(Debug, Iden)]
pub enum Modal {
    Table,
    ModalId,
    UserId,
    ModalType,
    Nominal,
    CreatedAt,
    UpdatedAt,
}
