//! Explicit variant ↔ API-token mapping shared by every enum that ends up in a
//! query string.
//!
//! Each enum gets an exhaustive `as_str` match, an `ALL` slice, `Display`,
//! `FromStr` and string-based serde impls, so adding a variant without a name
//! is a compile error rather than a silently shifted table.

macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[ $( $name::$variant ),+ ];

            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::WeatherError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let lower = value.trim().to_ascii_lowercase();

                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == lower)
                    .ok_or_else(|| $crate::WeatherError::UnknownName {
                        kind: $kind,
                        value: value.to_string(),
                    })
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::str::FromStr;

    use crate::{
        CellSelection, ForecastModel, PrecipitationUnit, TemperatureUnit, TimeFormat,
        WeatherVariable, WindSpeedUnit,
    };

    fn assert_table<T>(all: &[T])
    where
        T: Copy + PartialEq + std::fmt::Debug + std::fmt::Display + FromStr,
        <T as FromStr>::Err: std::fmt::Debug,
    {
        let mut seen = HashSet::new();
        for v in all {
            let name = v.to_string();
            assert!(!name.is_empty(), "{v:?} has an empty name");
            assert!(
                name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'),
                "{v:?} renders as {name:?}"
            );
            assert!(seen.insert(name.clone()), "duplicate name {name}");

            let parsed = T::from_str(&name).expect("name should parse back");
            assert_eq!(parsed, *v);
        }
    }

    #[test]
    fn every_name_table_is_complete_and_unique() {
        assert_table(WeatherVariable::ALL);
        assert_table(TemperatureUnit::ALL);
        assert_table(WindSpeedUnit::ALL);
        assert_table(PrecipitationUnit::ALL);
        assert_table(TimeFormat::ALL);
        assert_table(CellSelection::ALL);
        assert_table(ForecastModel::ALL);
    }

    #[test]
    fn parsing_is_case_insensitive_and_rejects_unknown() {
        assert_eq!(
            "Temperature_2m".parse::<WeatherVariable>().unwrap(),
            WeatherVariable::Temperature2m
        );

        let err = "kelvin".parse::<TemperatureUnit>().unwrap_err();
        assert!(err.to_string().contains("Unknown temperature unit 'kelvin'"));
    }

    #[test]
    fn serde_uses_api_tokens() {
        let json = serde_json::to_string(&WindSpeedUnit::Kn).unwrap();
        assert_eq!(json, "\"kn\"");

        let unit: PrecipitationUnit = serde_json::from_str("\"inch\"").unwrap();
        assert_eq!(unit, PrecipitationUnit::Inch);

        assert!(serde_json::from_str::<CellSelection>("\"lake\"").is_err());
    }
}
