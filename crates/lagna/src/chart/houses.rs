//! Whole-sign house construction.
//!
//! House 1 is the Ascendant's sign and each following house is the next sign.
//! Bodies and angles land in the house whose sign matches their own, so the
//! placement is a partition, never a nearest-cusp search.

use crate::chart::data::{AngleMarker, BodyPosition, House};
use crate::geometry::AngleSet;
use crate::zodiac::Sign;

pub const HOUSE_COUNT: usize = 12;

/// Sign of house `number` (1..=12) for an Ascendant sign.
pub fn house_sign(ascendant_sign: Sign, number: u8) -> Sign {
    ascendant_sign.advance((number as usize + HOUSE_COUNT - 1) % HOUSE_COUNT)
}

/// House number (1..=12) holding `sign` when `ascendant_sign` rises.
pub fn house_number_for(ascendant_sign: Sign, sign: Sign) -> u8 {
    ((sign.index() + HOUSE_COUNT - ascendant_sign.index()) % HOUSE_COUNT) as u8 + 1
}

/// Build the twelve houses. An absent Ascendant yields twelve sign-less,
/// empty houses.
pub fn assign_houses(angles: &AngleSet, bodies: &[BodyPosition]) -> Vec<House> {
    let mut houses: Vec<House> = (1..=HOUSE_COUNT as u8)
        .map(|number| House {
            number,
            sign: None,
            bodies: Vec::new(),
            angles: Vec::new(),
        })
        .collect();

    let Some(ascendant_deg) = angles.ascendant_deg() else {
        return houses;
    };
    let asc_sign = Sign::from_longitude(ascendant_deg);

    for house in houses.iter_mut() {
        house.sign = Some(house_sign(asc_sign, house.number));
    }

    for position in bodies {
        if let Some(sign) = position.sign {
            let idx = house_number_for(asc_sign, sign) as usize - 1;
            houses[idx].bodies.push(position.body);
        }
    }

    let markers = [
        (AngleMarker::Asc, angles.ascendant_deg()),
        (AngleMarker::Mc, angles.midheaven_deg()),
        (AngleMarker::Ic, angles.imum_coeli_deg()),
    ];
    for (marker, longitude) in markers {
        if let Some(longitude) = longitude {
            let idx = house_number_for(asc_sign, Sign::from_longitude(longitude)) as usize - 1;
            houses[idx].angles.push(marker);
        }
    }

    houses
}
