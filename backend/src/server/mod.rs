//! Server composition root: configuration, migrations, and state wiring.

use std::sync::Arc;

use diesel::Connection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::domain::ports::PasswordScheme;
use crate::domain::{
    AccountService, AdvisoryScope, AppointmentService, AtomicScope, BarbershopService,
    BreakingTimeService, EmployeeService, MutationScope, ServiceOfferingService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::password::Sha256PasswordScheme;
use crate::outbound::persistence::{
    DbPool, DieselAppointmentRepository, DieselBarbershopRepository,
    DieselBreakingTimeRepository, DieselEmployeeRepository, DieselOfferingRepository,
    DieselScheduleRepository, DieselUserRepository,
};

pub mod config;

pub use config::{ConfigError, ScopeStrategyChoice, ServerConfig};

/// Embedded SQL migrations, applied at startup.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Apply pending migrations over a synchronous connection.
pub fn run_migrations(database_url: &str) -> Result<(), String> {
    let mut conn = diesel::pg::PgConnection::establish(database_url)
        .map_err(|err| format!("failed to connect for migrations: {err}"))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map(|applied| {
            tracing::info!(count = applied.len(), "applied pending migrations");
        })
        .map_err(|err| format!("failed to run migrations: {err}"))
}

struct Repositories {
    users: Arc<DieselUserRepository>,
    barbershops: Arc<DieselBarbershopRepository>,
    employees: Arc<DieselEmployeeRepository>,
    offerings: Arc<DieselOfferingRepository>,
    schedules: Arc<DieselScheduleRepository>,
    appointments: Arc<DieselAppointmentRepository>,
    breaking_times: Arc<DieselBreakingTimeRepository>,
}

impl Repositories {
    fn new(pool: &DbPool) -> Self {
        Self {
            users: Arc::new(DieselUserRepository::new(pool.clone())),
            barbershops: Arc::new(DieselBarbershopRepository::new(pool.clone())),
            employees: Arc::new(DieselEmployeeRepository::new(pool.clone())),
            offerings: Arc::new(DieselOfferingRepository::new(pool.clone())),
            schedules: Arc::new(DieselScheduleRepository::new(pool.clone())),
            appointments: Arc::new(DieselAppointmentRepository::new(pool.clone())),
            breaking_times: Arc::new(DieselBreakingTimeRepository::new(pool.clone())),
        }
    }
}

fn assemble<S, P>(repos: &Repositories, passwords: Arc<P>, scope: S) -> HttpState
where
    S: MutationScope + Clone + 'static,
    P: PasswordScheme + 'static,
{
    HttpState {
        accounts: Arc::new(AccountService::new(repos.users.clone(), passwords)),
        barbershops: Arc::new(BarbershopService::new(
            repos.barbershops.clone(),
            repos.employees.clone(),
            repos.offerings.clone(),
            scope.clone(),
        )),
        employees: Arc::new(EmployeeService::new(
            repos.employees.clone(),
            repos.barbershops.clone(),
            repos.users.clone(),
            repos.schedules.clone(),
            scope.clone(),
        )),
        offerings: Arc::new(ServiceOfferingService::new(
            repos.offerings.clone(),
            repos.barbershops.clone(),
            scope.clone(),
        )),
        appointments: Arc::new(AppointmentService::new(
            repos.appointments.clone(),
            repos.employees.clone(),
            repos.offerings.clone(),
            scope.clone(),
        )),
        breaking_times: Arc::new(BreakingTimeService::new(
            repos.breaking_times.clone(),
            repos.schedules.clone(),
            scope,
        )),
    }
}

/// Build the HTTP state against PostgreSQL with the configured ownership
/// strategy.
pub fn build_http_state(pool: &DbPool, strategy: ScopeStrategyChoice) -> HttpState {
    let repos = Repositories::new(pool);
    let passwords = Arc::new(Sha256PasswordScheme);
    match strategy {
        ScopeStrategyChoice::Advisory => assemble(&repos, passwords, AdvisoryScope),
        ScopeStrategyChoice::AtomicConditional => assemble(&repos, passwords, AtomicScope),
    }
}
