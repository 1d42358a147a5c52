//! Commercial identifier formatting for the ICEYE constellation

/// ICEYE spacecraft complete roughly 15 orbits per day
const ORBITS_PER_DAY: f64 = 15.0;

/// Radar-band code assigned to ICEYE in the commercial coding scheme
const RADAR_CODE: &str = "NI";

/// Format the commercial identifier for an ICEYE collect, or `None`
/// when the collector is not an ICEYE sensor.
///
/// The identifier concatenates the collect date string, the radar code,
/// a two-character vehicle code (the trailing characters of an
/// `ICEYE-XN` style collector name, `UN` when the name carries no
/// vehicle suffix), a two-digit pass number derived from the collect
/// time of day, and a zero-padded three-digit product number.
pub fn commercial_id(
    collector: &str,
    cdate_str: &str,
    cdate_mins: f64,
    product_number: u32,
) -> Option<String> {
    let lower = collector.to_lowercase();
    if !lower.starts_with("iceye") {
        return None;
    }

    let cvehicle = if lower.starts_with("iceye-") {
        let chars: Vec<char> = collector.chars().collect();
        chars[chars.len() - 2..]
            .iter()
            .flat_map(|c| c.to_uppercase())
            .collect::<String>()
    } else {
        "UN".to_string()
    };
    let pass_number = (cdate_mins * ORBITS_PER_DAY / 1440.0).round() as i64;

    Some(format!(
        "{}{}{}{:02}{:03}",
        cdate_str, RADAR_CODE, cvehicle, pass_number, product_number
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iceye_collector_formatting() {
        // 720 minutes into the day is half the orbits: round(7.5) -> 8
        let id = commercial_id("ICEYE-X2", "20210101", 720.0, 5).unwrap();
        assert_eq!(id, "20210101NIX208005");
    }

    #[test]
    fn test_lowercase_collector_accepted() {
        let id = commercial_id("iceye-x4", "20200615", 0.0, 12).unwrap();
        assert_eq!(id, "20200615NIX400012");
    }

    #[test]
    fn test_missing_vehicle_suffix() {
        let id = commercial_id("ICEYE", "20210101", 1439.0, 1).unwrap();
        assert!(id.starts_with("20210101NIUN"));
    }

    #[test]
    fn test_pass_number_range() {
        // End of day rounds up to the full orbit count
        let id = commercial_id("ICEYE-X7", "20210101", 1440.0, 1).unwrap();
        assert_eq!(id, "20210101NIX715001");
    }

    #[test]
    fn test_non_iceye_collector() {
        assert_eq!(commercial_id("OtherSensor", "20210101", 720.0, 5), None);
        assert_eq!(commercial_id("CSK-1", "20210101", 720.0, 5), None);
    }
}
