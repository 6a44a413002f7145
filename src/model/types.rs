use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type Point = Point3<f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BondKind {
    Any,
    Single,
    Double,
    Triple,
    Aromatic,
}

impl BondKind {
    /// Stable single-byte code used by the `bond_types` column.
    pub fn code(&self) -> u8 {
        match self {
            BondKind::Any => 0,
            BondKind::Single => 1,
            BondKind::Double => 2,
            BondKind::Triple => 3,
            BondKind::Aromatic => 4,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(BondKind::Any),
            1 => Some(BondKind::Single),
            2 => Some(BondKind::Double),
            3 => Some(BondKind::Triple),
            4 => Some(BondKind::Aromatic),
            _ => None,
        }
    }
}

impl fmt::Display for BondKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            BondKind::Any => "Any",
            BondKind::Single => "Single",
            BondKind::Double => "Double",
            BondKind::Triple => "Triple",
            BondKind::Aromatic => "Aromatic",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for BondKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Any" | "0" => Ok(BondKind::Any),
            "Single" | "1" => Ok(BondKind::Single),
            "Double" | "2" => Ok(BondKind::Double),
            "Triple" | "3" => Ok(BondKind::Triple),
            "Aromatic" | "1.5" => Ok(BondKind::Aromatic),
            _ => Err(format!("Invalid bond kind: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bond_kind_codes_round_trip() {
        for kind in [
            BondKind::Any,
            BondKind::Single,
            BondKind::Double,
            BondKind::Triple,
            BondKind::Aromatic,
        ] {
            assert_eq!(BondKind::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn bond_kind_from_code_rejects_unknown_codes() {
        assert_eq!(BondKind::from_code(5), None);
        assert_eq!(BondKind::from_code(255), None);
    }

    #[test]
    fn bond_kind_from_str_accepts_names_and_numbers() {
        assert_eq!("Single".parse::<BondKind>(), Ok(BondKind::Single));
        assert_eq!("2".parse::<BondKind>(), Ok(BondKind::Double));
        assert_eq!("1.5".parse::<BondKind>(), Ok(BondKind::Aromatic));
        assert!("quadruple".parse::<BondKind>().is_err());
    }

    #[test]
    fn bond_kind_display_formats_name() {
        assert_eq!(format!("{}", BondKind::Aromatic), "Aromatic");
    }
}
