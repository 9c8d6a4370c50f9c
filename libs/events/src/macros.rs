//! Macros for declaring optional string fields.

/// Generates the accessor, setter and builder method for optional string
/// fields of a struct.
///
/// For each `field` this generates:
/// - `field(&self) -> Option<&str>`
/// - `set_field(&mut self, Option<String>)`
/// - `with_field(self, impl Into<String>) -> Self`
///
/// # Example
///
/// ```ignore
/// impl PrincipalInformation {
///     string_fields! {
///         /// The school or department of the principal.
///         school, set_school, with_school;
///     }
/// }
/// ```
macro_rules! string_fields {
    ($($(#[$meta:meta])* $field:ident, $setter:ident, $builder:ident;)*) => {
        $(
            $(#[$meta])*
            #[must_use]
            pub fn $field(&self) -> Option<&str> {
                self.$field.as_deref()
            }

            #[doc = concat!("Sets `", stringify!($field), "`.")]
            pub fn $setter(&mut self, value: Option<String>) {
                self.$field = value;
            }

            #[doc = concat!("Returns `self` with `", stringify!($field), "` set.")]
            #[must_use]
            pub fn $builder(mut self, value: impl Into<String>) -> Self {
                self.$field = Some(value.into());
                self
            }
        )*
    };
}

pub(crate) use string_fields;
