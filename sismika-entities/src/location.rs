use std::{fmt, str::FromStr};

use num_derive::{FromPrimitive, ToPrimitive};
use thiserror::Error;

use crate::geo::{GeoBounds, MapPoint};

/// Identifier from the Philippine Standard Geographic Code publication,
/// ten ASCII digits encoding region down to barangay.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PsgcCode(String);

impl PsgcCode {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(Debug, Error)]
#[error("Invalid PSGC code")]
pub struct PsgcCodeParseError;

impl FromStr for PsgcCode {
    type Err = PsgcCodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 10 && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(s.to_owned()))
        } else {
            Err(PsgcCodeParseError)
        }
    }
}

impl From<PsgcCode> for String {
    fn from(from: PsgcCode) -> Self {
        from.0
    }
}

impl fmt::Display for PsgcCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Administrative granularity, ordered from coarsest to finest.
///
/// The string forms are the level codes of the PSGC publication.
#[rustfmt::skip]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    FromPrimitive, ToPrimitive, strum::Display, strum::EnumString,
)]
pub enum GeographicLevel {
    #[strum(serialize = "Reg")]    Region          = 0,
    #[strum(serialize = "Prov")]   Province        = 1,
    #[strum(serialize = "City")]   City            = 2,
    #[strum(serialize = "Mun")]    Municipality    = 3,
    #[strum(serialize = "SubMun")] SubMunicipality = 4,
    #[strum(serialize = "Bgy")]    Barangay        = 5,
}

/// Named place from the PSGC gazetteer.
///
/// Gazetteer entries are reference data: they are bulk-imported and never
/// created through the portal itself. `pos` and `bounds` are both optional
/// because the publication lacks coordinates for some places.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub psgc       : PsgcCode,
    pub name       : String,
    pub long_name  : String,
    pub level      : GeographicLevel,
    pub population : u64,
    pub pos        : Option<MapPoint>,
    pub bounds     : Option<GeoBounds>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_psgc_codes() {
        assert!("1380100000".parse::<PsgcCode>().is_ok());
        assert!("138010000".parse::<PsgcCode>().is_err());
        assert!("13801000000".parse::<PsgcCode>().is_err());
        assert!("13801x0000".parse::<PsgcCode>().is_err());
        assert!("".parse::<PsgcCode>().is_err());
    }

    #[test]
    fn levels_are_ordered_from_coarse_to_fine() {
        assert!(GeographicLevel::Region < GeographicLevel::Province);
        assert!(GeographicLevel::Province < GeographicLevel::City);
        assert!(GeographicLevel::Municipality < GeographicLevel::Barangay);
    }

    #[test]
    fn levels_round_trip_through_psgc_codes() {
        for level in [
            GeographicLevel::Region,
            GeographicLevel::Province,
            GeographicLevel::City,
            GeographicLevel::Municipality,
            GeographicLevel::SubMunicipality,
            GeographicLevel::Barangay,
        ] {
            let code = level.to_string();
            assert_eq!(level, code.parse().unwrap());
        }
        assert!("Village".parse::<GeographicLevel>().is_err());
    }
}
