//! `define_port_error!` builds `thiserror` enums for port failures together
//! with snake_case constructors for each variant.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
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
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Unreachable { message: String } => "store unreachable: {message}",
            Missing { id: i64 } => "missing row {id}",
            Rejected { message: String, id: i64 } => "row {id} rejected: {message}",
            Closed => "store closed",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SamplePortError::unreachable("refused");
        assert_eq!(err.to_string(), "store unreachable: refused");
    }

    #[test]
    fn non_string_fields_keep_their_type() {
        assert_eq!(SamplePortError::missing(7_i64).to_string(), "missing row 7");
    }

    #[test]
    fn mixed_and_unit_variants_build() {
        let err = SamplePortError::rejected("constraint", 3_i64);
        assert_eq!(err.to_string(), "row 3 rejected: constraint");
        assert_eq!(SamplePortError::closed(), SamplePortError::Closed);
    }
}
