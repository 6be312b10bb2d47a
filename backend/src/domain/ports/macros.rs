//! Helper macro for domain port error enums.
//!
//! Port errors come in two shapes here: variants carrying a free-form
//! `message` from the adapter, and marker variants for constraint
//! violations the services translate into domain conflicts. The macro
//! derives `thiserror::Error` and emits a snake_case constructor per
//! variant so adapters never spell out struct literals.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $msg:ident : String } )? => $display:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($display)]
                $variant $( { $msg: String } )?,
            )*
        }

        impl $name {
            ::paste::paste! {
                $(
                    define_port_error!(@ctor [<$variant:snake>] $variant $( { $msg: String } )?);
                )*
            }
        }
    };

    (@ctor $fn_name:ident $variant:ident { $msg:ident : String }) => {
        pub fn $fn_name($msg: impl Into<String>) -> Self {
            Self::$variant {
                $msg: $msg.into(),
            }
        }
    };

    (@ctor $fn_name:ident $variant:ident) => {
        pub const fn $fn_name() -> Self {
            Self::$variant
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        /// Example error for macro coverage.
        pub enum ExamplePortError {
            Query { message: String } => "query failed: {message}",
            DuplicateThing => "thing already exists",
        }
    }

    #[test]
    fn message_variants_accept_str() {
        let err = ExamplePortError::query("timeout");
        assert_eq!(err.to_string(), "query failed: timeout");
    }

    #[test]
    fn marker_variants_have_const_constructors() {
        let err = ExamplePortError::duplicate_thing();
        assert_eq!(err.to_string(), "thing already exists");
    }
}
