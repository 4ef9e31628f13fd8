use crate::chart::data::{BodyPosition, Chart};
use crate::chart::houses::assign_houses;
use crate::ephemeris::{Body, EphemerisProvider};
use crate::error::ChartError;
use crate::geometry::{compute_angles, normalize_360};
use crate::input::BirthInput;
use crate::time::{self, Instant};

/// Compute a natal chart.
///
/// Fails only for malformed input, before the provider is consulted. Provider
/// failures produce a degraded chart that still has seven body slots and
/// twelve houses.
pub fn compute_chart<P>(input: &BirthInput, provider: &P) -> Result<Chart, ChartError>
where
    P: EphemerisProvider + ?Sized,
{
    input.validate()?;
    let instant = time::normalize(input)?;
    Ok(assemble(input, instant, provider))
}

fn assemble<P>(input: &BirthInput, instant: Instant, provider: &P) -> Chart
where
    P: EphemerisProvider + ?Sized,
{
    log::debug!(
        "Computing chart for {} {} (UTC {:+}) at lat {} lon {} -> {}",
        input.civil_date,
        input.civil_time,
        input.utc_offset_hours,
        input.latitude_deg,
        input.longitude_deg,
        instant
    );

    let bodies: Vec<BodyPosition> = Body::ALL
        .iter()
        .map(|&body| locate_body(provider, body, instant))
        .collect();

    let angles = compute_angles(
        provider.sidereal_time(instant),
        provider.true_obliquity(instant),
        input.latitude_deg,
        input.longitude_deg,
    );

    let houses = assign_houses(&angles, &bodies);

    Chart {
        angles,
        bodies,
        houses,
        computed_at_utc: instant,
    }
}

fn locate_body<P>(provider: &P, body: Body, instant: Instant) -> BodyPosition
where
    P: EphemerisProvider + ?Sized,
{
    match provider.body_longitude(body, instant) {
        Ok(longitude) if longitude.is_finite() => {
            BodyPosition::located(body, normalize_360(longitude))
        }
        Ok(longitude) => {
            log::warn!("{}: provider returned non-finite longitude {}", body, longitude);
            BodyPosition::unavailable(body, format!("non-finite longitude {}", longitude))
        }
        Err(e) => {
            log::warn!("{}: {}", body, e);
            BodyPosition::unavailable(body, e.to_string())
        }
    }
}
