//! Per-invocation input, read once and never mutated.

use radio_geo::Coordinate;
use radio_identity::text::normalize_whitespace;
use radio_identity::IdentityRecord;

/// Name used when the sender has no label and no display names.
pub const FALLBACK_NAME: &str = "Sender";

/// Everything the caller tells us about one inbound message.
///
/// Text fields are whitespace-normalized; absent text is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvocationContext {
    pub message: String,
    pub sender_id: String,
    pub short_name: String,
    pub long_name: String,
    pub sender_lat: Option<f64>,
    pub sender_lon: Option<f64>,
    pub station_lat: Option<f64>,
    pub station_lon: Option<f64>,
}

/// Raw caller-supplied values, as found in the environment.
#[derive(Debug, Clone, Default)]
pub struct RawInvocation {
    pub message: Option<String>,
    pub from_id: Option<String>,
    pub from_node_id: Option<String>,
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub sender_lat: Option<String>,
    pub sender_lon: Option<String>,
    pub station_lat: Option<String>,
    pub station_lon: Option<String>,
}

impl InvocationContext {
    /// Normalize raw caller values.
    ///
    /// The sender id comes from `from_id`, or `from_node_id` when `from_id`
    /// is missing or blank. Coordinates that are blank, unparsable or not
    /// finite are treated as absent.
    pub fn from_raw(raw: &RawInvocation) -> Self {
        let text = |value: &Option<String>| normalize_whitespace(value.as_deref().unwrap_or(""));

        let mut sender_id = text(&raw.from_id);
        if sender_id.is_empty() {
            sender_id = text(&raw.from_node_id);
        }

        Self {
            message: text(&raw.message),
            sender_id,
            short_name: text(&raw.short_name),
            long_name: text(&raw.long_name),
            sender_lat: parse_coordinate(raw.sender_lat.as_deref()),
            sender_lon: parse_coordinate(raw.sender_lon.as_deref()),
            station_lat: parse_coordinate(raw.station_lat.as_deref()),
            station_lon: parse_coordinate(raw.station_lon.as_deref()),
        }
    }

    pub fn sender_position(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.sender_lat, self.sender_lon)
    }

    pub fn station_position(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.station_lat, self.station_lon)
    }

    /// Name to address the sender by.
    ///
    /// A saved identity wins; otherwise the first non-empty of short name,
    /// long name and sender id, then [`FALLBACK_NAME`].
    pub fn display_name(&self, saved: Option<&IdentityRecord>) -> String {
        if let Some(record) = saved {
            return record.label();
        }

        [&self.short_name, &self.long_name, &self.sender_id]
            .into_iter()
            .find(|name| !name.is_empty())
            .cloned()
            .unwrap_or_else(|| FALLBACK_NAME.to_string())
    }
}

/// Tolerant coordinate parse.
pub fn parse_coordinate(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use radio_identity::IdentityKind;

    fn some(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn from_raw_normalizes_text() {
        let ctx = InvocationContext::from_raw(&RawInvocation {
            message: some("  !id   ham\tW1ABC \n"),
            from_id: some(" !a1b2 "),
            short_name: some(" Max "),
            ..Default::default()
        });

        assert_eq!(ctx.message, "!id ham W1ABC");
        assert_eq!(ctx.sender_id, "!a1b2");
        assert_eq!(ctx.short_name, "Max");
        assert_eq!(ctx.long_name, "");
    }

    #[test]
    fn sender_id_falls_back_to_node_id() {
        let ctx = InvocationContext::from_raw(&RawInvocation {
            from_id: some("  "),
            from_node_id: some("!c3d4"),
            ..Default::default()
        });
        assert_eq!(ctx.sender_id, "!c3d4");

        let ctx = InvocationContext::from_raw(&RawInvocation::default());
        assert_eq!(ctx.sender_id, "");
    }

    #[test]
    fn coordinates_parse_tolerantly() {
        assert_eq!(parse_coordinate(Some(" 40.5 ")), Some(40.5));
        assert_eq!(parse_coordinate(Some("-105")), Some(-105.0));
        assert_eq!(parse_coordinate(Some("")), None);
        assert_eq!(parse_coordinate(Some("   ")), None);
        assert_eq!(parse_coordinate(Some("north")), None);
        assert_eq!(parse_coordinate(Some("NaN")), None);
        assert_eq!(parse_coordinate(Some("inf")), None);
        assert_eq!(parse_coordinate(None), None);
    }

    #[test]
    fn positions_need_both_halves() {
        let ctx = InvocationContext {
            sender_lat: Some(40.0),
            sender_lon: Some(-105.0),
            station_lat: Some(39.0),
            ..Default::default()
        };

        assert_eq!(ctx.sender_position(), Some(Coordinate::new(40.0, -105.0)));
        assert_eq!(ctx.station_position(), None);
    }

    #[test]
    fn display_name_prefers_saved_label() {
        let ctx = InvocationContext {
            short_name: "Max".into(),
            ..Default::default()
        };
        let record = IdentityRecord::new(IdentityKind::Ham, "W1ABC").unwrap();

        assert_eq!(ctx.display_name(Some(&record)), "HAM W1ABC");
        assert_eq!(ctx.display_name(None), "Max");
    }

    #[test]
    fn display_name_fallback_order() {
        let mut ctx = InvocationContext {
            long_name: "Maxwell Smart".into(),
            sender_id: "!a1b2".into(),
            ..Default::default()
        };
        assert_eq!(ctx.display_name(None), "Maxwell Smart");

        ctx.long_name.clear();
        assert_eq!(ctx.display_name(None), "!a1b2");

        ctx.sender_id.clear();
        assert_eq!(ctx.display_name(None), "Sender");
    }
}
