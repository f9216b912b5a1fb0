pub mod account;
pub mod action;
pub mod analyze;
pub mod fake;
pub mod proxy;
pub mod sub_server;
pub mod types;
pub mod user;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

/// Reads an ISO-8601 timestamp. Naive timestamps are taken as UTC.
pub(crate) fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub(crate) fn de_datetime<'de, D>(d: D) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(d)?;
    parse_datetime(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid datetime `{raw}`")))
}

pub(crate) fn maybe_de_datetime<'de, D>(d: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<String>::deserialize(d)? {
        Some(raw) => parse_datetime(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid datetime `{raw}`"))),
        None => Ok(None),
    }
}

pub(crate) mod macros {
    macro_rules! str_opt_ref {
        ($x:expr) => {
            $x.as_ref().map(|x| x.as_ref())
        };
    }

    /// Declares a closed string enum with a wire name and a display title per
    /// variant.
    macro_rules! titled_enum {
        (
            $(#[$meta:meta])*
            $name:ident, $kind:literal {
                $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, $title:literal; )+
            }
        ) => {
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
            pub enum $name {
                $(
                    $(#[$vmeta])*
                    #[serde(rename = $wire)]
                    $variant,
                )+
            }

            impl $name {
                /// Every variant, in declaration order.
                pub const ALL: &'static [$name] = &[$($name::$variant),+];

                /// The string used on the wire.
                pub fn as_str(self) -> &'static str {
                    match self {
                        $($name::$variant => $wire,)+
                    }
                }

                /// Localized title shown to operators.
                pub fn title(self) -> &'static str {
                    match self {
                        $($name::$variant => $title,)+
                    }
                }
            }

            impl std::str::FromStr for $name {
                type Err = $crate::error::Error;

                fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                    match s {
                        $($wire => Ok($name::$variant),)+
                        _ => Err($crate::error::Error::UnknownVariant {
                            kind: $kind,
                            value: s.to_string(),
                        }),
                    }
                }
            }

            impl std::fmt::Display for $name {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        };
    }

    pub(crate) use str_opt_ref;
    pub(crate) use titled_enum;
}
