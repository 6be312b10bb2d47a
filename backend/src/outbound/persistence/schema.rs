//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation.

diesel::table! {
    /// Registered user accounts.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        /// Unique login identifier.
        email -> Varchar,
        password_digest -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Barbershops, each owned by one user.
    barbershops (id) {
        id -> Uuid,
        owner_id -> Uuid,
        name -> Varchar,
        address -> Varchar,
        address_number -> Varchar,
        neighbourhood -> Varchar,
        landmark -> Nullable<Varchar>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Employee bindings: one user, one barbershop.
    employees (id) {
        id -> Uuid,
        /// Unique: a user is an employee at most once, system-wide.
        user_id -> Uuid,
        barbershop_id -> Uuid,
        role -> Varchar,
        phone_number -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Services offered by a barbershop.
    services (id) {
        id -> Uuid,
        barbershop_id -> Uuid,
        service_name -> Varchar,
        price -> Float8,
        /// Duration in minutes.
        time_taken -> Int4,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Working schedules, 1:1 with employees.
    schedules (id) {
        id -> Uuid,
        employee_id -> Uuid,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Breaks inside a schedule, stored on the 1970-01-01 reference date.
    breaking_times (id) {
        id -> Uuid,
        schedule_id -> Uuid,
        starting_time -> Timestamptz,
        ending_time -> Timestamptz,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Booked appointments.
    appointments (id) {
        id -> Uuid,
        employee_id -> Uuid,
        service_id -> Uuid,
        client_name -> Varchar,
        client_contact -> Varchar,
        datetime -> Timestamptz,
        status -> Varchar,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(barbershops -> users (owner_id));
diesel::joinable!(employees -> users (user_id));
diesel::joinable!(employees -> barbershops (barbershop_id));
diesel::joinable!(services -> barbershops (barbershop_id));
diesel::joinable!(schedules -> employees (employee_id));
diesel::joinable!(breaking_times -> schedules (schedule_id));
diesel::joinable!(appointments -> employees (employee_id));
diesel::joinable!(appointments -> services (service_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    barbershops,
    employees,
    services,
    schedules,
    breaking_times,
    appointments,
);
