//! Identifier newtypes for the booking hierarchy.
//!
//! Every entity id wraps a UUID v4. The macro keeps the wrappers uniform:
//! copyable, serde-transparent, and displayable as the canonical hyphenated
//! form used in envelope messages.

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(uuid::Uuid);

        impl $name {
            /// Wrap an existing UUID.
            pub const fn new(id: uuid::Uuid) -> Self {
                Self(id)
            }

            /// Generate a fresh random identifier.
            pub fn random() -> Self {
                Self(uuid::Uuid::new_v4())
            }

            /// Access the underlying UUID.
            pub const fn as_uuid(self) -> uuid::Uuid {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl From<uuid::Uuid> for $name {
            fn from(id: uuid::Uuid) -> Self {
                Self(id)
            }
        }
    };
}

pub(crate) use define_id;

define_id! {
    /// Identifier of the authenticated principal (a [`crate::domain::User`]).
    UserId
}

define_id! {
    /// Identifier of a [`crate::domain::Barbershop`].
    BarbershopId
}

define_id! {
    /// Identifier of an [`crate::domain::Employee`].
    EmployeeId
}

define_id! {
    /// Identifier of a [`crate::domain::ServiceOffering`].
    ServiceOfferingId
}

define_id! {
    /// Identifier of an [`crate::domain::Appointment`].
    AppointmentId
}

define_id! {
    /// Identifier of a [`crate::domain::Schedule`].
    ScheduleId
}

define_id! {
    /// Identifier of a [`crate::domain::BreakingTime`].
    BreakingTimeId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_uuid_strings() {
        let id = BarbershopId::random();
        let json = serde_json::to_value(id).expect("serialize id");
        assert_eq!(json, serde_json::json!(id.as_uuid().to_string()));
    }

    #[test]
    fn display_matches_inner_uuid() {
        let raw = uuid::Uuid::new_v4();
        assert_eq!(EmployeeId::new(raw).to_string(), raw.to_string());
    }
}
