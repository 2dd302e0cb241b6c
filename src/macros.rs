//! Macros to reduce boilerplate in the codebase

/// Macro to generate Display and FromStr implementations for key enums
///
/// The error constructor receives the rejected input and must return a
/// `VistaError`.
///
/// # Usage
///
/// ```rust,ignore
/// enum_display_fromstr!(
///     MyEnum,
///     VistaError::invalid_group_by,
///     {
///         Variant1 => "variant1",
///         Variant2 => "variant_2",
///     }
/// );
/// ```
#[macro_export]
macro_rules! enum_display_fromstr {
    (
        $enum_name:ident,
        $error_ctor:path,
        { $($variant:ident => $str:literal),+ $(,)? }
    ) => {
        impl $enum_name {
            /// Wire name of this key.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($enum_name::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::error::VistaError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok($enum_name::$variant),)+
                    _ => Err($error_ctor(s.to_string())),
                }
            }
        }
    };
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use crate::error::{KeyKind, Result, VistaError};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestEnum {
        A,
        B,
        Dashed,
    }

    enum_display_fromstr!(TestEnum, VistaError::invalid_view_type, {
        A => "a",
        B => "b",
        Dashed => "-dashed_key",
    });

    #[test]
    fn test_display() {
        assert_eq!(TestEnum::A.to_string(), "a");
        assert_eq!(TestEnum::Dashed.to_string(), "-dashed_key");
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!(TestEnum::from_str("B").unwrap(), TestEnum::B);
        assert_eq!(TestEnum::from_str(" -Dashed_Key ").unwrap(), TestEnum::Dashed);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        match TestEnum::from_str("c") {
            Err(VistaError::InvalidKey { kind, value }) => {
                assert_eq!(kind, KeyKind::ViewType);
                assert_eq!(value, "c");
            }
            other => panic!("expected InvalidKey, got {other:?}"),
        }
    }

    // Invoked next to the crate's one-parameter `Result` alias.
    fn parse(raw: &str) -> Result<TestEnum> {
        raw.parse()
    }

    #[test]
    fn test_from_str_alongside_result_alias() {
        assert_eq!(parse("a").unwrap(), TestEnum::A);
        assert!(parse("z").is_err());
    }
}
