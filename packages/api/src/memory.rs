use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures::channel::oneshot;
use records::{
    NewUser, NewVaccinationRecord, NewVaccine, User, UserId, VaccinationRecord, Vaccine,
};

use crate::gateway::Gateway;
use crate::TransportError;

/// A single gateway call, used to script failures and delays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    ListUsers,
    GetUser(UserId),
    CreateUser,
    ListVaccines,
    CreateVaccine,
    ListRecords(UserId),
    CreateRecord(UserId),
}

/// In-memory Gateway for tests and offline demos.
///
/// Calls can be made to fail ([`fail`](Self::fail)) or to wait until released
/// ([`hold`](Self::hold)), which is how tests reproduce a slow backend.
#[derive(Clone, Debug, Default)]
pub struct MemoryGateway {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug, Default)]
struct Inner {
    users: Vec<User>,
    vaccines: Vec<Vaccine>,
    records: Vec<VaccinationRecord>,
    next_id: i64,
    failures: HashSet<Operation>,
    holds: HashMap<Operation, VecDeque<oneshot::Receiver<()>>>,
    calls: Vec<Operation>,
}

/// Releases one held call. Dropping it releases the call too.
#[derive(Debug)]
pub struct Release(oneshot::Sender<()>);

impl Release {
    pub fn release(self) {
        let _ = self.0.send(());
    }
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_vaccine(self, name: &str) -> Self {
        {
            let mut inner = self.lock();
            let id = inner.next_id();
            inner.vaccines.push(Vaccine {
                id,
                name: name.to_string(),
            });
        }
        self
    }

    pub fn with_user(self, name: &str) -> Self {
        {
            let mut inner = self.lock();
            let id = inner.next_id();
            inner.users.push(User {
                id,
                name: name.to_string(),
                age: None,
                gender: None,
                vaccination_records: Vec::new(),
            });
        }
        self
    }

    /// Insert a record as-is, keeping its identifier.
    pub fn with_record(self, record: VaccinationRecord) -> Self {
        {
            let mut inner = self.lock();
            inner.next_id = inner.next_id.max(record.id);
            inner.records.push(record);
        }
        self
    }

    pub fn users(&self) -> Vec<User> {
        self.lock().users.clone()
    }

    pub fn vaccines(&self) -> Vec<Vaccine> {
        self.lock().vaccines.clone()
    }

    /// Make every future call of `op` fail with a 500.
    pub fn fail(&self, op: Operation) {
        self.lock().failures.insert(op);
    }

    pub fn recover(&self, op: Operation) {
        self.lock().failures.remove(&op);
    }

    /// Hold the next call of `op` until the returned handle is released.
    pub fn hold(&self, op: Operation) -> Release {
        let (tx, rx) = oneshot::channel();
        self.lock().holds.entry(op).or_default().push_back(rx);
        Release(tx)
    }

    /// Every call made so far, in call order.
    pub fn calls(&self) -> Vec<Operation> {
        self.lock().calls.clone()
    }

    pub fn was_called(&self, op: Operation) -> bool {
        self.lock().calls.contains(&op)
    }

    async fn enter(&self, op: Operation) -> Result<(), TransportError> {
        let held = {
            let mut inner = self.lock();
            inner.calls.push(op);
            inner.holds.get_mut(&op).and_then(VecDeque::pop_front)
        };
        if let Some(rx) = held {
            let _ = rx.await;
        }
        if self.lock().failures.contains(&op) {
            return Err(TransportError::Status {
                status: 500,
                body: format!("{op:?} failed"),
            });
        }
        Ok(())
    }
}

fn not_found(what: &str) -> TransportError {
    TransportError::Status {
        status: 404,
        body: format!("{what} not found"),
    }
}

impl Gateway for MemoryGateway {
    async fn list_users(&self) -> Result<Vec<User>, TransportError> {
        self.enter(Operation::ListUsers).await?;
        Ok(self.lock().users.clone())
    }

    async fn get_user(&self, id: UserId) -> Result<User, TransportError> {
        self.enter(Operation::GetUser(id)).await?;
        let inner = self.lock();
        let mut user = inner
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| not_found("user"))?;
        user.vaccination_records = inner
            .records
            .iter()
            .filter(|r| r.user_id == id)
            .cloned()
            .collect();
        Ok(user)
    }

    async fn create_user(&self, user: &NewUser) -> Result<User, TransportError> {
        self.enter(Operation::CreateUser).await?;
        let mut inner = self.lock();
        let created = User {
            id: inner.next_id(),
            name: user.name.clone(),
            age: user.age,
            gender: user.gender.clone(),
            vaccination_records: Vec::new(),
        };
        inner.users.push(created.clone());
        Ok(created)
    }

    async fn list_vaccines(&self) -> Result<Vec<Vaccine>, TransportError> {
        self.enter(Operation::ListVaccines).await?;
        Ok(self.lock().vaccines.clone())
    }

    async fn create_vaccine(&self, vaccine: &NewVaccine) -> Result<Vaccine, TransportError> {
        self.enter(Operation::CreateVaccine).await?;
        let mut inner = self.lock();
        let created = Vaccine {
            id: inner.next_id(),
            name: vaccine.name.clone(),
        };
        inner.vaccines.push(created.clone());
        Ok(created)
    }

    async fn list_records(&self, user_id: UserId) -> Result<Vec<VaccinationRecord>, TransportError> {
        self.enter(Operation::ListRecords(user_id)).await?;
        Ok(self
            .lock()
            .records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_record(
        &self,
        user_id: UserId,
        record: &NewVaccinationRecord,
    ) -> Result<VaccinationRecord, TransportError> {
        self.enter(Operation::CreateRecord(user_id)).await?;
        let mut inner = self.lock();
        if !inner.users.iter().any(|u| u.id == user_id) {
            return Err(not_found("user"));
        }
        let created = VaccinationRecord {
            id: inner.next_id(),
            user_id,
            vaccine_id: record.vaccine_id,
            dose_number: record.dose_number,
            application_date: record.application_date.clone(),
            note: record.note.clone(),
        };
        inner.records.push(created.clone());
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_data_and_ids() {
        let gateway = MemoryGateway::new()
            .with_vaccine("BCG")
            .with_vaccine("Flu")
            .with_user("Ana");

        let vaccines = gateway.list_vaccines().await.unwrap();
        assert_eq!(vaccines.len(), 2);
        assert_eq!(vaccines[0].id, 1);

        let users = gateway.list_users().await.unwrap();
        assert_eq!(users[0].id, 3);

        let created = gateway.create_user(&NewUser::new("Bia")).await.unwrap();
        assert_eq!(created.id, 4);
        assert_eq!(gateway.users().len(), 2);
    }

    #[tokio::test]
    async fn test_records_are_scoped_to_user() {
        let gateway = MemoryGateway::new().with_vaccine("BCG").with_user("Ana").with_user("Bia");
        let record = NewVaccinationRecord {
            vaccine_id: 1,
            dose_number: 1,
            application_date: "2024-01-01".to_string(),
            note: None,
        };
        gateway.create_record(2, &record).await.unwrap();

        assert_eq!(gateway.list_records(2).await.unwrap().len(), 1);
        assert!(gateway.list_records(3).await.unwrap().is_empty());
        assert_eq!(gateway.get_user(2).await.unwrap().vaccination_records.len(), 1);
        assert_eq!(
            gateway.create_record(99, &record).await.unwrap_err().status(),
            Some(404)
        );
    }

    #[tokio::test]
    async fn test_injected_failure() {
        let gateway = MemoryGateway::new().with_vaccine("BCG");
        gateway.fail(Operation::ListVaccines);
        assert_eq!(gateway.list_vaccines().await.unwrap_err().status(), Some(500));

        gateway.recover(Operation::ListVaccines);
        assert!(gateway.list_vaccines().await.is_ok());
        assert_eq!(gateway.calls(), vec![Operation::ListVaccines, Operation::ListVaccines]);
    }

    #[tokio::test]
    async fn test_held_call_waits_for_release() {
        let gateway = MemoryGateway::new().with_vaccine("BCG");
        let release = gateway.hold(Operation::ListVaccines);

        let (vaccines, ()) = futures::join!(gateway.list_vaccines(), async move {
            release.release();
        });
        assert_eq!(vaccines.unwrap().len(), 1);
    }
}
