pub mod iceye;

/// Derive the commercial product identifier for a collect, if the
/// collector belongs to a sensor family with a known coding scheme.
///
/// Each family module supplies its own formatter; the first one that
/// recognizes the collector wins. ICEYE is currently the only family
/// with a coding scheme defined here.
pub fn get_commercial_id(
    collector: &str,
    cdate_str: &str,
    cdate_mins: f64,
    product_number: u32,
) -> Option<String> {
    iceye::commercial_id(collector, cdate_str, cdate_mins, product_number)
}
