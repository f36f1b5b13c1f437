//! `define_port_error!` declares a port error enum together with one
//! snake_case constructor per variant. Struct-variant constructors take
//! `impl Into<Field>` for every field, so callers can pass `&str` for
//! `String` fields.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@constructor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };

    (@constructor $variant:ident) => {
        ::paste::paste! {
            #[doc = "Build [`Self::" $variant "`]."]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@constructor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            #[doc = "Build [`Self::" $variant "`]."]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructor generation for unit, single-field and multi-field variants.
    define_port_error! {
        pub enum StorePortError {
            Offline => "store offline",
            Lookup { collection: String } => "lookup failed in {collection}",
            Batch { size: usize } => "batch of {size} rejected",
            Write { collection: String, size: usize } => "write to {collection} failed ({size})",
        }
    }

    #[test]
    fn unit_variants_get_nullary_constructors() {
        assert_eq!(StorePortError::offline(), StorePortError::Offline);
        assert_eq!(StorePortError::offline().to_string(), "store offline");
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = StorePortError::lookup("users");
        assert_eq!(err.to_string(), "lookup failed in users");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = StorePortError::batch(12_usize);
        assert_eq!(err.to_string(), "batch of 12 rejected");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = StorePortError::write("modules", 3_usize);
        assert_eq!(err.to_string(), "write to modules failed (3)");
    }
}
