use chrono::Utc;
use scalib::{Angle, CalendarDate, CelestialBody, GeoLocation, Moon, Star, Sun};

fn main() -> scalib::Result<()> {
    let date = CalendarDate::from_utc(Utc::now())?;
    let greenwich = GeoLocation::new(Angle::ZERO, Angle::from_dms(51, 28, 38, 0.0))?;

    let mut sirius = Star::new(
        Angle::from_hms(6, 45, 8, 917.0),
        Angle::from_dms(-16, 42, 58, 20.0),
        Angle::from_hms(0, 0, 0, -38.03),
        Angle::from_dms(0, 0, 1, -210.0),
    );
    let mut sun = Sun::new();
    let mut moon = Moon::new();
    let bodies: [(&str, &mut dyn CelestialBody); 3] =
        [("Sun", &mut sun), ("Moon", &mut moon), ("Sirius", &mut sirius)];

    println!("{date} ({})", date.to_julian_day()?);
    for (name, body) in bodies {
        let pos = *body.update(&date)?;
        let local = body.local_coordinates(&greenwich)?.with_refraction();
        let (h, m, s, ms) = pos.equatorial.right_ascension.normalized().to_hms();
        println!(
            "{name:>7}: α = {h:02}h{m:02}m{s:02}.{:03.0}s  δ = {}  az = {:.2}°  alt = {:.2}°",
            ms,
            pos.equatorial.declination,
            local.azimuth_from_north().value(),
            local.altitude.value()
        );
    }
    Ok(())
}
