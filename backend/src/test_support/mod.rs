//! In-memory adapters for the driven ports.
//!
//! One [`InMemoryStore`] implements every repository port with the same
//! observable semantics as the Diesel adapters: scoped queries walk the
//! ownership chain, the employee/user unique constraint fires on insert,
//! deletes respect the same restrict/cascade rules, and patches leave
//! omitted fields untouched. Integration tests mount the full HTTP surface
//! on top of this store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::appointment::{self, Appointment, AppointmentPatch, NewAppointmentRecord};
use crate::domain::barbershop::{self, Barbershop, BarbershopPatch, NewBarbershop};
use crate::domain::breaking_time::{self, BreakingTime, BreakingTimePatch, NewBreakingTime};
use crate::domain::employee::{self, Employee, EmployeePatch, NewEmployeeRecord};
use crate::domain::id::{
    AppointmentId, BarbershopId, BreakingTimeId, EmployeeId, ScheduleId, ServiceOfferingId, UserId,
};
use crate::domain::offering::{self, NewServiceOffering, ServiceOffering, ServiceOfferingPatch};
use crate::domain::ports::{
    AppointmentRepository, AppointmentRepositoryError, BarbershopRepository,
    BarbershopRepositoryError, BreakingTimeRepository, BreakingTimeRepositoryError,
    EmployeeRepository, EmployeeRepositoryError, OfferingRepositoryError, ScheduleRepository,
    ScheduleRepositoryError, ServiceOfferingRepository, UserRepository, UserRepositoryError,
};
use crate::domain::schedule::Schedule;
use crate::domain::scope::ScopedRepository;
use crate::domain::user::{NewUser, User, UserCredentials};

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, UserCredentials>,
    barbershops: HashMap<Uuid, Barbershop>,
    employees: HashMap<Uuid, Employee>,
    offerings: HashMap<Uuid, ServiceOffering>,
    schedules: HashMap<Uuid, Schedule>,
    breaking_times: HashMap<Uuid, BreakingTime>,
    appointments: HashMap<Uuid, Appointment>,
}

impl Inner {
    fn shop_owned(&self, owner: UserId, shop: BarbershopId) -> bool {
        self.barbershops
            .get(&shop.as_uuid())
            .is_some_and(|s| s.owner_id == owner)
    }

    fn employee_reachable(&self, owner: UserId, id: EmployeeId) -> bool {
        self.employees
            .get(&id.as_uuid())
            .is_some_and(|e| self.shop_owned(owner, e.barbershop_id))
    }

    fn schedule_reachable(&self, owner: UserId, id: ScheduleId) -> bool {
        self.schedules
            .get(&id.as_uuid())
            .is_some_and(|s| self.employee_reachable(owner, s.employee_id))
    }

    fn offering_reachable(&self, owner: UserId, id: ServiceOfferingId) -> bool {
        self.offerings
            .get(&id.as_uuid())
            .is_some_and(|o| self.shop_owned(owner, o.barbershop_id))
    }

    fn appointment_reachable(&self, owner: UserId, id: AppointmentId) -> bool {
        self.appointments
            .get(&id.as_uuid())
            .is_some_and(|a| self.employee_reachable(owner, a.employee_id))
    }

    fn breaking_time_reachable(&self, owner: UserId, id: BreakingTimeId) -> bool {
        self.breaking_times
            .get(&id.as_uuid())
            .is_some_and(|b| self.schedule_reachable(owner, b.schedule_id))
    }
}

/// Shared in-memory store behind every port.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("in-memory store mutex poisoned")
    }

    /// Look up the schedule auto-created for an employee. Schedules have no
    /// HTTP surface, so tests reach for this directly.
    pub fn schedule_for_employee(&self, employee_id: EmployeeId) -> Option<Schedule> {
        let inner = self.lock();
        inner
            .schedules
            .values()
            .find(|s| s.employee_id == employee_id)
            .cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let mut inner = self.lock();
        if inner
            .users
            .values()
            .any(|stored| stored.user.email == user.email)
        {
            return Err(UserRepositoryError::duplicate_email());
        }

        let now = Utc::now();
        let created = User {
            id: UserId::random(),
            name: user.name,
            email: user.email,
            created_at: now,
            updated_at: now,
        };
        inner.users.insert(
            created.id.as_uuid(),
            UserCredentials {
                user: created.clone(),
                password_digest: user.password_digest,
            },
        );
        Ok(created)
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, UserRepositoryError> {
        let inner = self.lock();
        Ok(inner
            .users
            .values()
            .find(|stored| stored.user.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError> {
        let inner = self.lock();
        Ok(inner
            .users
            .get(&id.as_uuid())
            .map(|stored| stored.user.clone()))
    }
}

#[async_trait]
impl BarbershopRepository for InMemoryStore {
    async fn insert(
        &self,
        owner: UserId,
        shop: NewBarbershop,
    ) -> Result<Barbershop, BarbershopRepositoryError> {
        let mut inner = self.lock();
        let now = Utc::now();
        let created = Barbershop {
            id: BarbershopId::random(),
            owner_id: owner,
            name: shop.name,
            address: shop.address,
            address_number: shop.address_number,
            neighbourhood: shop.neighbourhood,
            landmark: shop.landmark,
            created_at: now,
            updated_at: now,
        };
        inner.barbershops.insert(created.id.as_uuid(), created.clone());
        Ok(created)
    }
}

#[async_trait]
impl ScopedRepository for InMemoryStore {
    const RESOURCE: &'static str = barbershop::RESOURCE;

    type Id = BarbershopId;
    type Entity = Barbershop;
    type Patch = BarbershopPatch;
    type Error = BarbershopRepositoryError;

    async fn find_for_owner(
        &self,
        owner: UserId,
        id: BarbershopId,
    ) -> Result<Option<Barbershop>, BarbershopRepositoryError> {
        let inner = self.lock();
        Ok(inner
            .barbershops
            .get(&id.as_uuid())
            .filter(|shop| shop.owner_id == owner)
            .cloned())
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<Barbershop>, BarbershopRepositoryError> {
        let inner = self.lock();
        let mut shops: Vec<Barbershop> = inner
            .barbershops
            .values()
            .filter(|shop| shop.owner_id == owner)
            .cloned()
            .collect();
        shops.sort_by_key(|shop| shop.created_at);
        Ok(shops)
    }

    async fn update_unscoped(
        &self,
        id: BarbershopId,
        patch: BarbershopPatch,
    ) -> Result<Option<Barbershop>, BarbershopRepositoryError> {
        let mut inner = self.lock();
        let Some(shop) = inner.barbershops.get_mut(&id.as_uuid()) else {
            return Ok(None);
        };
        if let Some(name) = patch.name {
            shop.name = name;
        }
        if let Some(address) = patch.address {
            shop.address = address;
        }
        if let Some(address_number) = patch.address_number {
            shop.address_number = address_number;
        }
        if let Some(neighbourhood) = patch.neighbourhood {
            shop.neighbourhood = neighbourhood;
        }
        if let Some(landmark) = patch.landmark {
            shop.landmark = Some(landmark);
        }
        shop.updated_at = Utc::now();
        Ok(Some(shop.clone()))
    }

    async fn update_for_owner(
        &self,
        owner: UserId,
        id: BarbershopId,
        patch: BarbershopPatch,
    ) -> Result<Option<Barbershop>, BarbershopRepositoryError> {
        if !self.lock().shop_owned(owner, id) {
            return Ok(None);
        }
        self.update_unscoped(id, patch).await
    }

    async fn delete_unscoped(&self, id: BarbershopId) -> Result<bool, BarbershopRepositoryError> {
        let mut inner = self.lock();
        let has_dependents = inner
            .employees
            .values()
            .any(|e| e.barbershop_id == id)
            || inner.offerings.values().any(|o| o.barbershop_id == id);
        if has_dependents {
            // Mirrors the RESTRICT foreign keys in the SQL schema.
            return Err(BarbershopRepositoryError::has_dependents());
        }
        Ok(inner.barbershops.remove(&id.as_uuid()).is_some())
    }

    async fn delete_for_owner(
        &self,
        owner: UserId,
        id: BarbershopId,
    ) -> Result<Option<Barbershop>, BarbershopRepositoryError> {
        let Some(shop) = ScopedRepository::find_for_owner(self, owner, id).await? else {
            return Ok(None);
        };
        if ScopedRepository::delete_unscoped(self, id).await? {
            Ok(Some(shop))
        } else {
            Ok(None)
        }
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryStore {
    async fn insert(
        &self,
        record: NewEmployeeRecord,
    ) -> Result<Employee, EmployeeRepositoryError> {
        let mut inner = self.lock();
        if inner
            .employees
            .values()
            .any(|e| e.user.id == record.user_id)
        {
            return Err(EmployeeRepositoryError::duplicate_user());
        }
        let Some(user) = inner
            .users
            .get(&record.user_id.as_uuid())
            .map(|stored| stored.user.clone())
        else {
            return Err(EmployeeRepositoryError::query("user row missing"));
        };

        let now = Utc::now();
        let created = Employee {
            id: EmployeeId::random(),
            user,
            barbershop_id: record.barbershop_id,
            role: record.role,
            phone_number: record.phone_number,
            created_at: now,
            updated_at: now,
        };
        inner.employees.insert(created.id.as_uuid(), created.clone());
        Ok(created)
    }

    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let inner = self.lock();
        Ok(inner
            .employees
            .values()
            .find(|e| e.user.id == user_id)
            .cloned())
    }

    async fn count_for_barbershop(
        &self,
        barbershop_id: BarbershopId,
    ) -> Result<u64, EmployeeRepositoryError> {
        let inner = self.lock();
        Ok(inner
            .employees
            .values()
            .filter(|e| e.barbershop_id == barbershop_id)
            .count() as u64)
    }
}

/// Marker wrapper so the one store can expose a second `ScopedRepository`
/// implementation per entity without overlapping impls.
macro_rules! scoped_view {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name(pub std::sync::Arc<InMemoryStore>);

        impl $name {
            fn store(&self) -> &InMemoryStore {
                &self.0
            }
        }
    };
}

scoped_view! {
    /// Employee-scoped view over the shared store.
    EmployeeView
}

scoped_view! {
    /// Service-offering-scoped view over the shared store.
    OfferingView
}

scoped_view! {
    /// Appointment-scoped view over the shared store.
    AppointmentView
}

scoped_view! {
    /// Breaking-time-scoped view over the shared store.
    BreakingTimeView
}

#[async_trait]
impl EmployeeRepository for EmployeeView {
    async fn insert(
        &self,
        record: NewEmployeeRecord,
    ) -> Result<Employee, EmployeeRepositoryError> {
        EmployeeRepository::insert(self.store(), record).await
    }

    async fn find_by_user(
        &self,
        user_id: UserId,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        self.store().find_by_user(user_id).await
    }

    async fn count_for_barbershop(
        &self,
        barbershop_id: BarbershopId,
    ) -> Result<u64, EmployeeRepositoryError> {
        EmployeeRepository::count_for_barbershop(self.store(), barbershop_id).await
    }
}

#[async_trait]
impl ScopedRepository for EmployeeView {
    const RESOURCE: &'static str = employee::RESOURCE;

    type Id = EmployeeId;
    type Entity = Employee;
    type Patch = EmployeePatch;
    type Error = EmployeeRepositoryError;

    async fn find_for_owner(
        &self,
        owner: UserId,
        id: EmployeeId,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let inner = self.store().lock();
        Ok(inner
            .employees
            .get(&id.as_uuid())
            .filter(|e| inner.shop_owned(owner, e.barbershop_id))
            .cloned())
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<Employee>, EmployeeRepositoryError> {
        let inner = self.store().lock();
        let mut employees: Vec<Employee> = inner
            .employees
            .values()
            .filter(|e| inner.shop_owned(owner, e.barbershop_id))
            .cloned()
            .collect();
        employees.sort_by_key(|e| e.created_at);
        Ok(employees)
    }

    async fn update_unscoped(
        &self,
        id: EmployeeId,
        patch: EmployeePatch,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let mut inner = self.store().lock();
        let Some(found) = inner.employees.get_mut(&id.as_uuid()) else {
            return Ok(None);
        };
        if let Some(role) = patch.role {
            found.role = role;
        }
        if let Some(phone_number) = patch.phone_number {
            found.phone_number = phone_number;
        }
        found.updated_at = Utc::now();
        Ok(Some(found.clone()))
    }

    async fn update_for_owner(
        &self,
        owner: UserId,
        id: EmployeeId,
        patch: EmployeePatch,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        if !self.store().lock().employee_reachable(owner, id) {
            return Ok(None);
        }
        self.update_unscoped(id, patch).await
    }

    async fn delete_unscoped(&self, id: EmployeeId) -> Result<bool, EmployeeRepositoryError> {
        let mut inner = self.store().lock();
        if inner.appointments.values().any(|a| a.employee_id == id) {
            // Appointments restrict their employee.
            return Err(EmployeeRepositoryError::has_dependents());
        }
        let removed = inner.employees.remove(&id.as_uuid()).is_some();
        if removed {
            // Schedules and their breaking times cascade.
            let schedule_ids: Vec<Uuid> = inner
                .schedules
                .iter()
                .filter(|(_, s)| s.employee_id == id)
                .map(|(key, _)| *key)
                .collect();
            for schedule_id in schedule_ids {
                inner.schedules.remove(&schedule_id);
                inner
                    .breaking_times
                    .retain(|_, b| b.schedule_id.as_uuid() != schedule_id);
            }
        }
        Ok(removed)
    }

    async fn delete_for_owner(
        &self,
        owner: UserId,
        id: EmployeeId,
    ) -> Result<Option<Employee>, EmployeeRepositoryError> {
        let Some(found) = self.find_for_owner(owner, id).await? else {
            return Ok(None);
        };
        if self.delete_unscoped(id).await? {
            Ok(Some(found))
        } else {
            Ok(None)
        }
    }
}

#[async_trait]
impl ServiceOfferingRepository for OfferingView {
    async fn insert(
        &self,
        offering: NewServiceOffering,
    ) -> Result<ServiceOffering, OfferingRepositoryError> {
        let mut inner = self.store().lock();
        let now = Utc::now();
        let created = ServiceOffering {
            id: ServiceOfferingId::random(),
            barbershop_id: offering.barbershop_id,
            service_name: offering.service_name,
            price: offering.price,
            time_taken: offering.time_taken,
            created_at: now,
            updated_at: now,
        };
        inner.offerings.insert(created.id.as_uuid(), created.clone());
        Ok(created)
    }

    async fn find_in_barbershop(
        &self,
        barbershop_id: BarbershopId,
        id: ServiceOfferingId,
    ) -> Result<Option<ServiceOffering>, OfferingRepositoryError> {
        let inner = self.store().lock();
        Ok(inner
            .offerings
            .get(&id.as_uuid())
            .filter(|o| o.barbershop_id == barbershop_id)
            .cloned())
    }

    async fn count_for_barbershop(
        &self,
        barbershop_id: BarbershopId,
    ) -> Result<u64, OfferingRepositoryError> {
        let inner = self.store().lock();
        Ok(inner
            .offerings
            .values()
            .filter(|o| o.barbershop_id == barbershop_id)
            .count() as u64)
    }
}

#[async_trait]
impl ScopedRepository for OfferingView {
    const RESOURCE: &'static str = offering::RESOURCE;

    type Id = ServiceOfferingId;
    type Entity = ServiceOffering;
    type Patch = ServiceOfferingPatch;
    type Error = OfferingRepositoryError;

    async fn find_for_owner(
        &self,
        owner: UserId,
        id: ServiceOfferingId,
    ) -> Result<Option<ServiceOffering>, OfferingRepositoryError> {
        let inner = self.store().lock();
        Ok(inner
            .offerings
            .get(&id.as_uuid())
            .filter(|o| inner.shop_owned(owner, o.barbershop_id))
            .cloned())
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<ServiceOffering>, OfferingRepositoryError> {
        let inner = self.store().lock();
        let mut offerings: Vec<ServiceOffering> = inner
            .offerings
            .values()
            .filter(|o| inner.shop_owned(owner, o.barbershop_id))
            .cloned()
            .collect();
        offerings.sort_by_key(|o| o.created_at);
        Ok(offerings)
    }

    async fn update_unscoped(
        &self,
        id: ServiceOfferingId,
        patch: ServiceOfferingPatch,
    ) -> Result<Option<ServiceOffering>, OfferingRepositoryError> {
        let mut inner = self.store().lock();
        let Some(found) = inner.offerings.get_mut(&id.as_uuid()) else {
            return Ok(None);
        };
        if let Some(service_name) = patch.service_name {
            found.service_name = service_name;
        }
        if let Some(price) = patch.price {
            found.price = price;
        }
        if let Some(time_taken) = patch.time_taken {
            found.time_taken = time_taken;
        }
        found.updated_at = Utc::now();
        Ok(Some(found.clone()))
    }

    async fn update_for_owner(
        &self,
        owner: UserId,
        id: ServiceOfferingId,
        patch: ServiceOfferingPatch,
    ) -> Result<Option<ServiceOffering>, OfferingRepositoryError> {
        if !self.store().lock().offering_reachable(owner, id) {
            return Ok(None);
        }
        self.update_unscoped(id, patch).await
    }

    async fn delete_unscoped(
        &self,
        id: ServiceOfferingId,
    ) -> Result<bool, OfferingRepositoryError> {
        let mut inner = self.store().lock();
        if inner.appointments.values().any(|a| a.service_id == id) {
            return Err(OfferingRepositoryError::has_dependents());
        }
        Ok(inner.offerings.remove(&id.as_uuid()).is_some())
    }

    async fn delete_for_owner(
        &self,
        owner: UserId,
        id: ServiceOfferingId,
    ) -> Result<Option<ServiceOffering>, OfferingRepositoryError> {
        let Some(found) = self.find_for_owner(owner, id).await? else {
            return Ok(None);
        };
        if self.delete_unscoped(id).await? {
            Ok(Some(found))
        } else {
            Ok(None)
        }
    }
}

#[async_trait]
impl ScheduleRepository for InMemoryStore {
    async fn insert(&self, employee_id: EmployeeId) -> Result<Schedule, ScheduleRepositoryError> {
        let mut inner = self.lock();
        let now = Utc::now();
        let created = Schedule {
            id: ScheduleId::random(),
            employee_id,
            created_at: now,
            updated_at: now,
        };
        inner.schedules.insert(created.id.as_uuid(), created.clone());
        Ok(created)
    }

    async fn find_for_owner(
        &self,
        owner: UserId,
        id: ScheduleId,
    ) -> Result<Option<Schedule>, ScheduleRepositoryError> {
        let inner = self.lock();
        Ok(inner
            .schedules
            .get(&id.as_uuid())
            .filter(|s| inner.employee_reachable(owner, s.employee_id))
            .cloned())
    }
}

#[async_trait]
impl AppointmentRepository for AppointmentView {
    async fn insert(
        &self,
        record: NewAppointmentRecord,
    ) -> Result<Appointment, AppointmentRepositoryError> {
        let mut inner = self.store().lock();
        let now = Utc::now();
        let created = Appointment {
            id: AppointmentId::random(),
            employee_id: record.employee_id,
            service_id: record.service_id,
            client_name: record.client_name,
            client_contact: record.client_contact,
            datetime: record.datetime,
            status: record.status,
            created_at: now,
            updated_at: now,
        };
        inner
            .appointments
            .insert(created.id.as_uuid(), created.clone());
        Ok(created)
    }
}

#[async_trait]
impl ScopedRepository for AppointmentView {
    const RESOURCE: &'static str = appointment::RESOURCE;

    type Id = AppointmentId;
    type Entity = Appointment;
    type Patch = AppointmentPatch;
    type Error = AppointmentRepositoryError;

    async fn find_for_owner(
        &self,
        owner: UserId,
        id: AppointmentId,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let inner = self.store().lock();
        Ok(inner
            .appointments
            .get(&id.as_uuid())
            .filter(|a| inner.employee_reachable(owner, a.employee_id))
            .cloned())
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        let inner = self.store().lock();
        let mut appointments: Vec<Appointment> = inner
            .appointments
            .values()
            .filter(|a| inner.employee_reachable(owner, a.employee_id))
            .cloned()
            .collect();
        appointments.sort_by_key(|a| a.datetime);
        Ok(appointments)
    }

    async fn update_unscoped(
        &self,
        id: AppointmentId,
        patch: AppointmentPatch,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let mut inner = self.store().lock();
        let Some(found) = inner.appointments.get_mut(&id.as_uuid()) else {
            return Ok(None);
        };
        if let Some(client_name) = patch.client_name {
            found.client_name = client_name;
        }
        if let Some(client_contact) = patch.client_contact {
            found.client_contact = client_contact;
        }
        if let Some(datetime) = patch.datetime {
            found.datetime = datetime;
        }
        if let Some(status) = patch.status {
            found.status = status;
        }
        found.updated_at = Utc::now();
        Ok(Some(found.clone()))
    }

    async fn update_for_owner(
        &self,
        owner: UserId,
        id: AppointmentId,
        patch: AppointmentPatch,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        if !self.store().lock().appointment_reachable(owner, id) {
            return Ok(None);
        }
        self.update_unscoped(id, patch).await
    }

    async fn delete_unscoped(&self, id: AppointmentId) -> Result<bool, AppointmentRepositoryError> {
        let mut inner = self.store().lock();
        Ok(inner.appointments.remove(&id.as_uuid()).is_some())
    }

    async fn delete_for_owner(
        &self,
        owner: UserId,
        id: AppointmentId,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let Some(found) = self.find_for_owner(owner, id).await? else {
            return Ok(None);
        };
        if self.delete_unscoped(id).await? {
            Ok(Some(found))
        } else {
            Ok(None)
        }
    }
}

#[async_trait]
impl BreakingTimeRepository for BreakingTimeView {
    async fn insert(
        &self,
        breaking_time: NewBreakingTime,
    ) -> Result<BreakingTime, BreakingTimeRepositoryError> {
        let mut inner = self.store().lock();
        let now = Utc::now();
        let created = BreakingTime {
            id: BreakingTimeId::random(),
            schedule_id: breaking_time.schedule_id,
            starting_time: breaking_time.starting_time,
            ending_time: breaking_time.ending_time,
            created_at: now,
            updated_at: now,
        };
        inner
            .breaking_times
            .insert(created.id.as_uuid(), created.clone());
        Ok(created)
    }
}

#[async_trait]
impl ScopedRepository for BreakingTimeView {
    const RESOURCE: &'static str = breaking_time::RESOURCE;

    type Id = BreakingTimeId;
    type Entity = BreakingTime;
    type Patch = BreakingTimePatch;
    type Error = BreakingTimeRepositoryError;

    async fn find_for_owner(
        &self,
        owner: UserId,
        id: BreakingTimeId,
    ) -> Result<Option<BreakingTime>, BreakingTimeRepositoryError> {
        let inner = self.store().lock();
        Ok(inner
            .breaking_times
            .get(&id.as_uuid())
            .filter(|b| inner.schedule_reachable(owner, b.schedule_id))
            .cloned())
    }

    async fn list_for_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<BreakingTime>, BreakingTimeRepositoryError> {
        let inner = self.store().lock();
        let mut breaking_times: Vec<BreakingTime> = inner
            .breaking_times
            .values()
            .filter(|b| inner.schedule_reachable(owner, b.schedule_id))
            .cloned()
            .collect();
        breaking_times.sort_by_key(|b| b.starting_time);
        Ok(breaking_times)
    }

    async fn update_unscoped(
        &self,
        id: BreakingTimeId,
        patch: BreakingTimePatch,
    ) -> Result<Option<BreakingTime>, BreakingTimeRepositoryError> {
        let mut inner = self.store().lock();
        let Some(found) = inner.breaking_times.get_mut(&id.as_uuid()) else {
            return Ok(None);
        };
        if let Some(starting_time) = patch.starting_time {
            found.starting_time = starting_time;
        }
        if let Some(ending_time) = patch.ending_time {
            found.ending_time = ending_time;
        }
        found.updated_at = Utc::now();
        Ok(Some(found.clone()))
    }

    async fn update_for_owner(
        &self,
        owner: UserId,
        id: BreakingTimeId,
        patch: BreakingTimePatch,
    ) -> Result<Option<BreakingTime>, BreakingTimeRepositoryError> {
        if !self.store().lock().breaking_time_reachable(owner, id) {
            return Ok(None);
        }
        self.update_unscoped(id, patch).await
    }

    async fn delete_unscoped(
        &self,
        id: BreakingTimeId,
    ) -> Result<bool, BreakingTimeRepositoryError> {
        let mut inner = self.store().lock();
        Ok(inner.breaking_times.remove(&id.as_uuid()).is_some())
    }

    async fn delete_for_owner(
        &self,
        owner: UserId,
        id: BreakingTimeId,
    ) -> Result<Option<BreakingTime>, BreakingTimeRepositoryError> {
        let Some(found) = self.find_for_owner(owner, id).await? else {
            return Ok(None);
        };
        if self.delete_unscoped(id).await? {
            Ok(Some(found))
        } else {
            Ok(None)
        }
    }
}
