//! Row models and row-to-domain conversions.
//!
//! Rows mirror the table definitions in [`super::schema`]; conversion
//! failures (unrecognised enum strings) surface as messages the repositories
//! map to query errors rather than panicking.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::appointment::{Appointment, AppointmentStatus};
use crate::domain::barbershop::Barbershop;
use crate::domain::breaking_time::{BreakingTime, TimeOfDay};
use crate::domain::employee::{Employee, EmployeeRole};
use crate::domain::id::{
    AppointmentId, BarbershopId, BreakingTimeId, EmployeeId, ScheduleId, ServiceOfferingId, UserId,
};
use crate::domain::offering::ServiceOffering;
use crate::domain::schedule::Schedule;
use crate::domain::user::{User, UserCredentials};

use super::schema::{
    appointments, barbershops, breaking_times, employees, schedules, services, users,
};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users, check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_digest: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRow {
    pub fn into_user(self) -> User {
        User {
            id: UserId::new(self.id),
            name: self.name,
            email: self.email,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn into_credentials(self) -> UserCredentials {
        let password_digest = self.password_digest.clone();
        UserCredentials {
            user: self.into_user(),
            password_digest,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: &'a str,
    pub password_digest: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = barbershops, check_for_backend(diesel::pg::Pg))]
pub struct BarbershopRow {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub address: String,
    pub address_number: String,
    pub neighbourhood: String,
    pub landmark: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BarbershopRow {
    pub fn into_domain(self) -> Barbershop {
        Barbershop {
            id: BarbershopId::new(self.id),
            owner_id: UserId::new(self.owner_id),
            name: self.name,
            address: self.address,
            address_number: self.address_number,
            neighbourhood: self.neighbourhood,
            landmark: self.landmark,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = barbershops)]
pub struct NewBarbershopRow<'a> {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: &'a str,
    pub address: &'a str,
    pub address_number: &'a str,
    pub neighbourhood: &'a str,
    pub landmark: Option<&'a str>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = barbershops)]
pub struct BarbershopChangeset<'a> {
    pub name: Option<&'a str>,
    pub address: Option<&'a str>,
    pub address_number: Option<&'a str>,
    pub neighbourhood: Option<&'a str>,
    pub landmark: Option<&'a str>,
    /// Always set, so a patch with every field omitted is still a valid
    /// changeset.
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = employees, check_for_backend(diesel::pg::Pg))]
pub struct EmployeeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub barbershop_id: Uuid,
    pub role: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmployeeRow {
    pub fn into_domain(self, user: UserRow) -> Result<Employee, String> {
        let role = EmployeeRole::from_str_opt(&self.role)
            .ok_or_else(|| format!("unrecognised employee role: {}", self.role))?;
        Ok(Employee {
            id: EmployeeId::new(self.id),
            user: user.into_user(),
            barbershop_id: BarbershopId::new(self.barbershop_id),
            role,
            phone_number: self.phone_number,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = employees)]
pub struct NewEmployeeRow<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub barbershop_id: Uuid,
    pub role: &'a str,
    pub phone_number: &'a str,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = employees)]
pub struct EmployeeChangeset<'a> {
    pub role: Option<&'a str>,
    pub phone_number: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = services, check_for_backend(diesel::pg::Pg))]
pub struct ServiceRow {
    pub id: Uuid,
    pub barbershop_id: Uuid,
    pub service_name: String,
    pub price: f64,
    pub time_taken: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceRow {
    pub fn into_domain(self) -> ServiceOffering {
        ServiceOffering {
            id: ServiceOfferingId::new(self.id),
            barbershop_id: BarbershopId::new(self.barbershop_id),
            service_name: self.service_name,
            price: self.price,
            time_taken: self.time_taken,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = services)]
pub struct NewServiceRow<'a> {
    pub id: Uuid,
    pub barbershop_id: Uuid,
    pub service_name: &'a str,
    pub price: f64,
    pub time_taken: i32,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = services)]
pub struct ServiceChangeset<'a> {
    pub service_name: Option<&'a str>,
    pub price: Option<f64>,
    pub time_taken: Option<i32>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = schedules, check_for_backend(diesel::pg::Pg))]
pub struct ScheduleRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScheduleRow {
    pub fn into_domain(self) -> Schedule {
        Schedule {
            id: ScheduleId::new(self.id),
            employee_id: EmployeeId::new(self.employee_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = schedules)]
pub struct NewScheduleRow {
    pub id: Uuid,
    pub employee_id: Uuid,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = breaking_times, check_for_backend(diesel::pg::Pg))]
pub struct BreakingTimeRow {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub starting_time: DateTime<Utc>,
    pub ending_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BreakingTimeRow {
    pub fn into_domain(self) -> BreakingTime {
        BreakingTime {
            id: BreakingTimeId::new(self.id),
            schedule_id: ScheduleId::new(self.schedule_id),
            starting_time: TimeOfDay::from_reference_datetime(self.starting_time),
            ending_time: TimeOfDay::from_reference_datetime(self.ending_time),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = breaking_times)]
pub struct NewBreakingTimeRow {
    pub id: Uuid,
    pub schedule_id: Uuid,
    pub starting_time: DateTime<Utc>,
    pub ending_time: DateTime<Utc>,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = breaking_times)]
pub struct BreakingTimeChangeset {
    pub starting_time: Option<DateTime<Utc>>,
    pub ending_time: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = appointments, check_for_backend(diesel::pg::Pg))]
pub struct AppointmentRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub service_id: Uuid,
    pub client_name: String,
    pub client_contact: String,
    pub datetime: DateTime<Utc>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AppointmentRow {
    pub fn into_domain(self) -> Result<Appointment, String> {
        let status = AppointmentStatus::from_str_opt(&self.status)
            .ok_or_else(|| format!("unrecognised appointment status: {}", self.status))?;
        Ok(Appointment {
            id: AppointmentId::new(self.id),
            employee_id: EmployeeId::new(self.employee_id),
            service_id: ServiceOfferingId::new(self.service_id),
            client_name: self.client_name,
            client_contact: self.client_contact,
            datetime: self.datetime,
            status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = appointments)]
pub struct NewAppointmentRow<'a> {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub service_id: Uuid,
    pub client_name: &'a str,
    pub client_contact: &'a str,
    pub datetime: DateTime<Utc>,
    pub status: &'a str,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = appointments)]
pub struct AppointmentChangeset<'a> {
    pub client_name: Option<&'a str>,
    pub client_contact: Option<&'a str>,
    pub datetime: Option<DateTime<Utc>>,
    pub status: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}
