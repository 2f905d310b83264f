/// Compass label of a bearing in degrees, using 45° sectors centred on the
/// eight principal directions.
pub fn compass_direction(bearing: f64) -> &'static str {
    match bearing {
        b if b <= 22.5 => "N",
        b if b <= 67.5 => "NE",
        b if b <= 112.5 => "E",
        b if b <= 157.5 => "SE",
        b if b <= 202.5 => "S",
        b if b <= 247.5 => "SW",
        b if b <= 292.5 => "W",
        b if b <= 337.5 => "NW",
        _ => "N",
    }
}
