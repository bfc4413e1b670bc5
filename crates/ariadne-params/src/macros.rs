//! Declarative field accessors.

/// Declares a typed parameter struct over a [`Resolver`](crate::Resolver).
///
/// Fields are grouped by the resource prefix they are declared under. For each
/// field the struct gets a `Field` constant, a read accessor, a writer
/// `set_<field>` and a `<field>_required` accessor. `field => alias` names the
/// accessors `alias` instead, for when two prefixes declare the same field.
///
/// The struct derefs to the wrapped `Resolver`, so `includes`, `bool`,
/// `user_condition` and `perform_async` are available on it too.
///
/// # Example
///
/// ```rust
/// use ariadne_params::{resource_params, ParameterBag, Resolver};
/// use serde_json::json;
///
/// resource_params! {
///     /// Parameters of request creation.
///     pub struct CreateParams {
///         request { branch, message }
///         repository { id => repository_id }
///     }
/// }
///
/// let mut bag = ParameterBag::new();
/// bag.insert("repository.id", json!("42"));
/// bag.insert("request", json!({"branch": "dev"}));
///
/// let mut params = CreateParams::from(Resolver::new(bag, "requests"));
/// assert_eq!(params.branch(), Some(json!("dev")));
/// assert_eq!(params.message(), None);
/// assert_eq!(params.repository_id(), Some(json!("42")));
/// assert_eq!(CreateParams::BRANCH.qualified(), "request.branch");
/// assert_eq!(CreateParams::FIELDS.len(), 3);
///
/// params.set_message(json!("hello"));
/// assert_eq!(params.message_required().unwrap(), json!("hello"));
/// ```
#[macro_export]
macro_rules! resource_params {
    (@accessor $name:ident, $prefix:ident, $field:ident) => {
        $crate::resource_params!(@impl $name, $prefix, $field, $field);
    };

    (@accessor $name:ident, $prefix:ident, $field:ident, $alias:ident) => {
        $crate::resource_params!(@impl $name, $prefix, $field, $alias);
    };

    (@impl $name:ident, $prefix:ident, $field:ident, $alias:ident) => {
        $crate::__private::paste! {
            impl $name {
                #[doc = concat!("The `", stringify!($prefix), ".", stringify!($field), "` field.")]
                pub const [<$alias:upper>]: $crate::Field =
                    $crate::Field::new(stringify!($prefix), stringify!($field));

                #[doc = concat!("Resolves `", stringify!($prefix), ".", stringify!($field), "`.")]
                pub fn $alias(&self) -> ::core::option::Option<$crate::__private::Value> {
                    self.0.resolve(Self::[<$alias:upper>])
                }

                #[doc = concat!("Overrides `", stringify!($prefix), ".", stringify!($field), "`.")]
                pub fn [<set_ $alias>](
                    &mut self,
                    value: impl ::core::convert::Into<::core::option::Option<$crate::__private::Value>>,
                ) {
                    self.0.set(Self::[<$alias:upper>], value.into());
                }

                #[doc = concat!("Resolves `", stringify!($prefix), ".", stringify!($field), "` or fails if it is missing.")]
                pub fn [<$alias _required>](
                    &self,
                ) -> $crate::ParamsResult<$crate::__private::Value> {
                    self.0.required(Self::[<$alias:upper>])
                }
            }
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $prefix:ident { $( $field:ident $(=> $alias:ident)? ),* $(,)? }
            )*
        }
    ) => {
        $(#[$meta])*
        $vis struct $name($crate::Resolver);

        impl $name {
            /// Every declared field, in declaration order.
            pub const FIELDS: &'static [$crate::Field] = &[
                $( $( $crate::Field::new(stringify!($prefix), stringify!($field)), )* )*
            ];

            /// Unwraps the resolver.
            pub fn into_inner(self) -> $crate::Resolver {
                self.0
            }
        }

        impl ::core::convert::From<$crate::Resolver> for $name {
            fn from(resolver: $crate::Resolver) -> Self {
                Self(resolver)
            }
        }

        impl ::core::ops::Deref for $name {
            type Target = $crate::Resolver;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl ::core::ops::DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.0).finish()
            }
        }

        $( $( $crate::resource_params!(@accessor $name, $prefix, $field $(, $alias)?); )* )*
    };
}
