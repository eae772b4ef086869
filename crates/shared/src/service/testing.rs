//! In-memory stand-ins for the repositories, used by the service tests.

use async_trait::async_trait;
use bcrypt::BcryptError;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;

use crate::{
    abstract_trait::{
        ActivityLogServiceTrait, HashingTrait, ModalRepositoryTrait, SaldoRepositoryTrait,
        SetorRepositoryTrait, TarikTunaiRepositoryTrait, TransferDebitRepositoryTrait,
        TransferRepositoryTrait, UserRepositoryTrait,
    },
    domain::{
        balance::BalanceComponents,
        context::{ClientMeta, RequestContext, Role},
        request::{
            CreateModalRequest, CreateSetorRequest, CreateTarikTunaiRequest,
            CreateTransferDebitRequest, CreateTransferRequest, DateRange, FindAllLogRequest,
            LedgerStatus, NewActivityLog, PageWindow, UpdateTransferRequest,
            user::{NewUser, UserChanges},
        },
        response::{
            ApiResponsePagination, ErrorResponse, activity_log::ActivityLogResponse,
            pagination::Pagination,
        },
        scope::Scope,
    },
    model::{
        modal::{Modal, ModalWithUser},
        saldo::{Saldo, SaldoWithUser},
        tarik_tunai::{TarikTunai, TarikTunaiWithUser},
        transfer::{SETOR_ADMIN_BANK, Transfer, TransferFavorit, TransferWithUser},
        transfer_debit::{TransferDebit, TransferDebitWithUser},
        user::User,
    },
    utils::{AppError, Metrics, today},
};

pub(crate) fn metrics() -> Arc<Mutex<Metrics>> {
    Arc::new(Mutex::new(Metrics::new()))
}

pub(crate) fn ctx(role: Role, user_id: i32) -> RequestContext {
    RequestContext {
        user_id,
        username: format!("user{user_id}"),
        role,
        client: ClientMeta {
            ip_address: Some("10.0.0.7".into()),
            user_agent: Some("test".into()),
        },
    }
}

pub(crate) fn user(user_id: i32, username: &str, role: &str, status: &str) -> User {
    User {
        user_id,
        username: username.to_string(),
        password: format!("hashed:{username}-pw"),
        role: role.to_string(),
        status: status.to_string(),
        created_at: None,
        updated_at: None,
    }
}

#[derive(Default)]
pub(crate) struct RecordingActivityLog {
    pub entries: StdMutex<Vec<NewActivityLog>>,
}

impl RecordingActivityLog {
    pub fn actions(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|entry| format!("{}:{}", entry.action, entry.table_name))
            .collect()
    }
}

#[async_trait]
impl ActivityLogServiceTrait for RecordingActivityLog {
    async fn record(&self, entry: NewActivityLog) {
        self.entries.lock().unwrap().push(entry);
    }

    async fn get_logs(
        &self,
        _ctx: &RequestContext,
        _req: &FindAllLogRequest,
    ) -> Result<ApiResponsePagination<Vec<ActivityLogResponse>>, ErrorResponse> {
        Ok(ApiResponsePagination {
            status: "success".into(),
            message: "Activity logs retrieved successfully".into(),
            data: vec![],
            pagination: Pagination::new(PageWindow::new(1, 10), 0),
        })
    }
}

/// Hashes by prefixing, so tests can build stored passwords by hand.
pub(crate) struct PlainHashing;

#[async_trait]
impl HashingTrait for PlainHashing {
    async fn hash_password(&self, password: &str) -> Result<String, BcryptError> {
        Ok(format!("hashed:{password}"))
    }

    async fn compare_password(&self, hashed_password: &str, password: &str) -> Result<(), AppError> {
        if hashed_password == format!("hashed:{password}") {
            Ok(())
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeUserRepository {
    pub users: StdMutex<Vec<User>>,
}

impl FakeUserRepository {
    pub fn with(users: Vec<User>) -> Self {
        Self {
            users: StdMutex::new(users),
        }
    }
}

#[async_trait]
impl UserRepositoryTrait for FakeUserRepository {
    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user_id == id)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn username_taken(&self, username: &str, except_id: Option<i32>) -> Result<bool, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.username == username && Some(u.user_id) != except_id))
    }

    async fn count_owners(&self) -> Result<i64, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.role == "owner")
            .count() as i64)
    }

    async fn create_user(&self, input: &NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        let created = User {
            user_id: users.len() as i32 + 1,
            username: input.username.clone(),
            password: input.password_hash.clone(),
            role: input.role.as_str().to_string(),
            status: input.status.as_str().to_string(),
            created_at: None,
            updated_at: None,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn update_user(&self, id: i32, input: &UserChanges) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.user_id == id)
            .ok_or_else(|| AppError::NotFound(format!("User with id {id} not found")))?;

        user.username = input.username.clone();
        user.role = input.role.as_str().to_string();
        user.status = input.status.as_str().to_string();
        if let Some(hash) = &input.password_hash {
            user.password = hash.clone();
        }
        Ok(user.clone())
    }

    async fn delete_user(&self, id: i32) -> Result<(), AppError> {
        self.users.lock().unwrap().retain(|u| u.user_id != id);
        Ok(())
    }
}

/// Keeps one running balance per user, applying the transfer part of the
/// ledger rule on every write.
#[derive(Default)]
pub(crate) struct FakeTransferRepository {
    pub rows: StdMutex<Vec<Transfer>>,
    pub balances: StdMutex<Vec<(i32, i64)>>,
}

impl FakeTransferRepository {
    fn recompute(&self, user_id: i32) -> Saldo {
        let total: i64 = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.user_id == user_id)
            .map(|t| t.nominal + t.biaya)
            .sum();

        let mut balances = self.balances.lock().unwrap();
        balances.retain(|(id, _)| *id != user_id);
        balances.push((user_id, total));

        Saldo {
            saldo_id: user_id,
            user_id,
            total_saldo: total,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn seed(&self, transfer: Transfer) {
        self.rows.lock().unwrap().push(transfer);
    }
}

pub(crate) fn transfer(id: i32, user_id: i32, bank_tujuan: &str, nominal: i64) -> Transfer {
    Transfer {
        transfer_id: id,
        user_id,
        tanggal: today(),
        bank_tujuan: bank_tujuan.to_string(),
        nomor_rekening: "0011".into(),
        nama_pemilik: "Budi".into(),
        nominal,
        biaya: 0,
        keterangan: None,
        status: LedgerStatus::Pending.as_str().to_string(),
        foto_struk: None,
        created_at: None,
        updated_at: None,
    }
}

#[async_trait]
impl TransferRepositoryTrait for FakeTransferRepository {
    async fn find_all(
        &self,
        scope: Scope,
        _window: PageWindow,
        _range: DateRange,
        _search: Option<String>,
    ) -> Result<(Vec<TransferWithUser>, i64), AppError> {
        let rows: Vec<TransferWithUser> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.bank_tujuan != SETOR_ADMIN_BANK)
            .filter(|t| scope.user_id().is_none_or(|id| id == t.user_id))
            .map(|t| TransferWithUser {
                transfer: t.clone(),
                username: format!("user{}", t.user_id),
            })
            .collect();
        let total = rows.len() as i64;
        Ok((rows, total))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Transfer>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.transfer_id == id)
            .cloned())
    }

    async fn create(
        &self,
        user_id: i32,
        input: &CreateTransferRequest,
    ) -> Result<(Transfer, Saldo), AppError> {
        let created = {
            let mut rows = self.rows.lock().unwrap();
            let created = Transfer {
                tanggal: input.tanggal.unwrap_or_else(today),
                nomor_rekening: input.nomor_rekening.clone(),
                nama_pemilik: input.nama_pemilik.clone(),
                biaya: input.biaya.unwrap_or(0),
                ..transfer(rows.len() as i32 + 1, user_id, &input.bank_tujuan, input.nominal)
            };
            rows.push(created.clone());
            created
        };

        let saldo = self.recompute(user_id);
        Ok((created, saldo))
    }

    async fn update(
        &self,
        id: i32,
        input: &UpdateTransferRequest,
    ) -> Result<(Transfer, Saldo), AppError> {
        let updated = {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|t| t.transfer_id == id)
                .ok_or_else(|| AppError::NotFound(format!("Transfer with id {id} not found")))?;

            row.tanggal = input.tanggal;
            row.bank_tujuan = input.bank_tujuan.clone();
            row.nominal = input.nominal;
            row.biaya = input.biaya;
            row.status = input.status.as_str().to_string();
            row.clone()
        };

        let saldo = self.recompute(updated.user_id);
        Ok((updated, saldo))
    }

    async fn update_status(&self, id: i32, status: LedgerStatus) -> Result<Transfer, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|t| t.transfer_id == id)
            .ok_or_else(|| AppError::NotFound(format!("Transfer with id {id} not found")))?;

        row.status = status.as_str().to_string();
        Ok(row.clone())
    }

    async fn find_favorites(
        &self,
        _scope: Scope,
        _search: Option<String>,
        _limit: u64,
    ) -> Result<Vec<TransferFavorit>, AppError> {
        Ok(vec![])
    }
}

/// Every balance-relevant table for every user. Each write rebuilds the
/// writer's balance through [`BalanceComponents::total`], the same rule the
/// database routine applies.
#[derive(Default)]
pub(crate) struct FakeLedger {
    pub users: StdMutex<Vec<User>>,
    pub modals: StdMutex<Vec<Modal>>,
    pub setors: StdMutex<Vec<Transfer>>,
    pub debits: StdMutex<Vec<TransferDebit>>,
    pub withdrawals: StdMutex<Vec<TarikTunai>>,
    pub balances: StdMutex<Vec<Saldo>>,
}

impl FakeLedger {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: StdMutex::new(users),
            ..Default::default()
        }
    }

    /// Adds a deposit row without touching the stored balance, as a manual
    /// database edit would.
    pub fn seed_modal(&self, user_id: i32, nominal: i64) {
        let mut modals = self.modals.lock().unwrap();
        let id = modals.len() as i32 + 1;
        modals.push(modal(id, user_id, nominal));
    }

    pub fn set_balance(&self, user_id: i32, total_saldo: i64) {
        let mut balances = self.balances.lock().unwrap();
        balances.retain(|s| s.user_id != user_id);
        balances.push(Saldo {
            saldo_id: user_id,
            user_id,
            total_saldo,
            created_at: None,
            updated_at: None,
        });
    }

    pub fn balance_of(&self, user_id: i32) -> Option<i64> {
        self.balances
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.user_id == user_id)
            .map(|s| s.total_saldo)
    }

    fn components(&self, user_id: i32) -> BalanceComponents {
        let withdrawals = self.withdrawals.lock().unwrap();
        let mine = || withdrawals.iter().filter(|w| w.user_id == user_id);

        BalanceComponents {
            deposits: self
                .modals
                .lock()
                .unwrap()
                .iter()
                .filter(|m| m.user_id == user_id)
                .map(|m| m.nominal)
                .sum(),
            transfers: self
                .setors
                .lock()
                .unwrap()
                .iter()
                .filter(|t| t.user_id == user_id)
                .map(|t| t.nominal + t.biaya)
                .sum(),
            debit_fees: self
                .debits
                .lock()
                .unwrap()
                .iter()
                .filter(|d| d.user_id == user_id)
                .map(|d| d.biaya)
                .sum(),
            withdrawal_amounts: mine().map(|w| w.nominal_tarik).sum(),
            withdrawal_fees: mine().map(|w| w.biaya_tarik).sum(),
        }
    }

    fn rebuild(&self, user_id: i32) -> Result<Saldo, AppError> {
        let total = self
            .components(user_id)
            .total()
            .map_err(|_| AppError::BalanceOverflow(user_id))?;

        self.set_balance(user_id, total);

        Ok(Saldo {
            saldo_id: user_id,
            user_id,
            total_saldo: total,
            created_at: None,
            updated_at: None,
        })
    }
}

pub(crate) fn modal(id: i32, user_id: i32, nominal: i64) -> Modal {
    Modal {
        modal_id: id,
        user_id,
        modal_type: "brilink".into(),
        nominal,
        created_at: None,
        updated_at: None,
    }
}

fn in_scope(scope: Scope, user_id: i32) -> bool {
    scope.user_id().is_none_or(|id| id == user_id)
}

#[async_trait]
impl ModalRepositoryTrait for FakeLedger {
    async fn find_all(&self, scope: Scope) -> Result<Vec<Modal>, AppError> {
        Ok(self
            .modals
            .lock()
            .unwrap()
            .iter()
            .filter(|m| in_scope(scope, m.user_id))
            .cloned()
            .collect())
    }

    async fn find_history(&self, scope: Scope) -> Result<Vec<ModalWithUser>, AppError> {
        Ok(self
            .modals
            .lock()
            .unwrap()
            .iter()
            .filter(|m| in_scope(scope, m.user_id))
            .map(|m| ModalWithUser {
                modal: m.clone(),
                username: format!("user{}", m.user_id),
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Modal>, AppError> {
        Ok(self
            .modals
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.modal_id == id)
            .cloned())
    }

    async fn create(
        &self,
        user_id: i32,
        input: &CreateModalRequest,
    ) -> Result<(Modal, Saldo), AppError> {
        let created = {
            let mut modals = self.modals.lock().unwrap();
            let created = Modal {
                modal_type: input.modal_type.clone(),
                ..modal(modals.len() as i32 + 1, user_id, input.nominal)
            };
            modals.push(created.clone());
            created
        };

        let saldo = self.rebuild(user_id)?;
        Ok((created, saldo))
    }

    async fn update_nominal(&self, id: i32, nominal: i64) -> Result<(Modal, Saldo), AppError> {
        let updated = {
            let mut modals = self.modals.lock().unwrap();
            let row = modals
                .iter_mut()
                .find(|m| m.modal_id == id)
                .ok_or_else(|| AppError::NotFound(format!("Modal with id {id} not found")))?;
            row.nominal = nominal;
            row.clone()
        };

        let saldo = self.rebuild(updated.user_id)?;
        Ok((updated, saldo))
    }
}

#[async_trait]
impl SetorRepositoryTrait for FakeLedger {
    async fn find_all(&self, scope: Scope) -> Result<Vec<TransferWithUser>, AppError> {
        Ok(self
            .setors
            .lock()
            .unwrap()
            .iter()
            .filter(|t| in_scope(scope, t.user_id))
            .map(|t| TransferWithUser {
                transfer: t.clone(),
                username: format!("user{}", t.user_id),
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Transfer>, AppError> {
        Ok(self
            .setors
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.transfer_id == id)
            .cloned())
    }

    async fn create(
        &self,
        user_id: i32,
        input: &CreateSetorRequest,
    ) -> Result<(Transfer, Saldo), AppError> {
        let created = {
            let mut setors = self.setors.lock().unwrap();
            let created = Transfer {
                nomor_rekening: "-".into(),
                nama_pemilik: "ADMIN".into(),
                keterangan: input.keterangan.clone(),
                ..transfer(
                    setors.len() as i32 + 1,
                    user_id,
                    SETOR_ADMIN_BANK,
                    input.nominal,
                )
            };
            setors.push(created.clone());
            created
        };

        let saldo = self.rebuild(user_id)?;
        Ok((created, saldo))
    }

    async fn approve(
        &self,
        id: i32,
        status: LedgerStatus,
        nominal: Option<i64>,
    ) -> Result<(Transfer, Saldo), AppError> {
        let updated = {
            let mut setors = self.setors.lock().unwrap();
            let row = setors
                .iter_mut()
                .find(|t| t.transfer_id == id)
                .ok_or_else(|| AppError::NotFound(format!("Setor admin with id {id} not found")))?;
            row.status = status.as_str().to_string();
            if let Some(nominal) = nominal {
                row.nominal = nominal;
            }
            row.clone()
        };

        let saldo = self.rebuild(updated.user_id)?;
        Ok((updated, saldo))
    }
}

#[async_trait]
impl TransferDebitRepositoryTrait for FakeLedger {
    async fn find_all(
        &self,
        scope: Scope,
        _window: PageWindow,
        _range: DateRange,
    ) -> Result<(Vec<TransferDebitWithUser>, i64), AppError> {
        let rows: Vec<TransferDebitWithUser> = self
            .debits
            .lock()
            .unwrap()
            .iter()
            .filter(|d| in_scope(scope, d.user_id))
            .map(|d| TransferDebitWithUser {
                transfer_debit: d.clone(),
                username: format!("user{}", d.user_id),
            })
            .collect();
        let total = rows.len() as i64;
        Ok((rows, total))
    }

    async fn create(
        &self,
        user_id: i32,
        input: &CreateTransferDebitRequest,
    ) -> Result<(TransferDebit, Saldo), AppError> {
        let created = {
            let mut debits = self.debits.lock().unwrap();
            let created = TransferDebit {
                transfer_debit_id: debits.len() as i32 + 1,
                user_id,
                tanggal: input.tanggal.unwrap_or_else(today),
                biaya: input.biaya,
                keterangan: input.keterangan.clone(),
                status: LedgerStatus::Lunas.as_str().to_string(),
                foto_struk: input.foto_struk.clone(),
                created_at: None,
            };
            debits.push(created.clone());
            created
        };

        let saldo = self.rebuild(user_id)?;
        Ok((created, saldo))
    }
}

#[async_trait]
impl TarikTunaiRepositoryTrait for FakeLedger {
    async fn find_all(
        &self,
        scope: Scope,
        _range: DateRange,
    ) -> Result<Vec<TarikTunaiWithUser>, AppError> {
        Ok(self
            .withdrawals
            .lock()
            .unwrap()
            .iter()
            .filter(|w| in_scope(scope, w.user_id))
            .map(|w| TarikTunaiWithUser {
                tarik_tunai: w.clone(),
                username: format!("user{}", w.user_id),
            })
            .collect())
    }

    async fn create(
        &self,
        user_id: i32,
        input: &CreateTarikTunaiRequest,
    ) -> Result<(TarikTunai, Saldo), AppError> {
        let created = {
            let mut withdrawals = self.withdrawals.lock().unwrap();
            let created = TarikTunai {
                tarik_tunai_id: withdrawals.len() as i32 + 1,
                user_id,
                tanggal: input.tanggal.unwrap_or_else(today),
                bank: input.bank.clone(),
                nominal_tarik: input.nominal_tarik,
                biaya_tarik: input.biaya_tarik.unwrap_or(0),
                keterangan: input.keterangan.clone(),
                status: LedgerStatus::Lunas.as_str().to_string(),
                foto_struk: input.foto_struk.clone(),
                created_at: None,
            };
            withdrawals.push(created.clone());
            created
        };

        let saldo = self.rebuild(user_id)?;
        Ok((created, saldo))
    }
}

#[async_trait]
impl SaldoRepositoryTrait for FakeLedger {
    async fn recompute(&self, user_id: i32) -> Result<Saldo, AppError> {
        self.rebuild(user_id)
    }

    async fn find_by_user_id(&self, user_id: i32) -> Result<Option<Saldo>, AppError> {
        Ok(self
            .balances
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.user_id == user_id)
            .cloned())
    }

    async fn find_all_with_user(&self) -> Result<Vec<SaldoWithUser>, AppError> {
        let users = self.users.lock().unwrap().clone();

        Ok(users
            .into_iter()
            .map(|u| SaldoWithUser {
                total_saldo: self.balance_of(u.user_id).unwrap_or(0),
                user_id: u.user_id,
                username: u.username,
                role: u.role,
                status: u.status,
                updated_at: None,
            })
            .collect())
    }

    async fn total(&self, scope: Scope) -> Result<i64, AppError> {
        Ok(self
            .balances
            .lock()
            .unwrap()
            .iter()
            .filter(|s| in_scope(scope, s.user_id))
            .map(|s| s.total_saldo)
            .sum())
    }
}
