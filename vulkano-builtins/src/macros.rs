// Copyright (c) 2016 The vulkano developers
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or https://opensource.org/licenses/MIT>,
// at your option. All files in the project carrying such
// notice may not be copied, modified, or distributed except
// according to those terms.

/// Declares a SPIR-V enumeration whose variants carry the numeric value from the grammar.
///
/// Aliases listed after `|` are accepted by `from_name`, but share the variant of the canonical
/// name since SPIR-V gives them the same value.
macro_rules! spirv_enum {
    {
        $(#[doc = $ty_doc:literal])*
        $ty:ident;

        $(
            $(#[doc = $variant_doc:literal])*
            $variant:ident = $value:literal $(| $alias:ident)*,
        )+
    } => {
        $(#[doc = $ty_doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(u32)]
        pub enum $ty {
            $(
                $(#[doc = $variant_doc])*
                $variant = $value,
            )+
        }

        impl $ty {
            #[allow(dead_code)]
            pub(crate) const COUNT: usize = [$($value),+].len();

            /// Returns the canonical name of the enumerant, as spelled in the SPIR-V grammar.
            #[inline]
            pub const fn name(self) -> &'static str {
                match self {
                    $(
                        Self::$variant => stringify!($variant),
                    )+
                }
            }

            /// Looks up an enumerant by its canonical name or by one of its aliases.
            pub fn from_name(name: &str) -> Option<Self> {
                $(
                    if name == stringify!($variant) $(|| name == stringify!($alias))* {
                        return Some(Self::$variant);
                    }
                )+

                None
            }
        }

        impl TryFrom<u32> for $ty {
            type Error = ();

            #[inline]
            fn try_from(val: u32) -> Result<Self, Self::Error> {
                Ok(match val {
                    $(
                        $value => Self::$variant,
                    )+
                    _ => return Err(()),
                })
            }
        }

        impl From<$ty> for u32 {
            #[inline]
            fn from(val: $ty) -> Self {
                val as u32
            }
        }

        impl std::fmt::Display for $ty {
            #[inline]
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

/// Builds the full identifier of a Vulkan valid usage rule attached to a built-in variable.
macro_rules! vuid {
    ($built_in:ident, $code:tt) => {
        concat!(
            "VUID-",
            stringify!($built_in),
            "-",
            stringify!($built_in),
            "-",
            stringify!($code),
        )
    };
}

pub(crate) use {spirv_enum, vuid};
