use {
    serde::{Deserialize, Serialize},
    serde_json::{Map, Value},
    tracing::debug,
};

use crate::{
    error::{Error, Result},
    wire::OptionalFields,
};

const RECORD: &str = "redirect";

/// Links a receiving peer can use to send the user back to the presenting app.
///
/// Fields are private: every instance has passed the link-mode check, whether
/// it was constructed locally or decoded from a peer.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RedirectWire")]
pub struct Redirect {
    #[serde(skip_serializing_if = "Option::is_none")]
    native: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    universal: Option<String>,
    link_mode: bool,
}

/// Unvalidated wire shape of a [`Redirect`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RedirectWire {
    native: Option<String>,
    universal: Option<String>,
    #[serde(default)]
    link_mode: bool,
}

impl TryFrom<RedirectWire> for Redirect {
    type Error = Error;

    fn try_from(wire: RedirectWire) -> Result<Self> {
        Self::new(wire.native, wire.universal, wire.link_mode)
    }
}

impl Redirect {
    /// Build a redirect, rejecting link mode without a universal link.
    pub fn new(native: Option<String>, universal: Option<String>, link_mode: bool) -> Result<Self> {
        let redirect = Self {
            native,
            universal,
            link_mode,
        };
        redirect.validate()?;
        Ok(redirect)
    }

    /// Native deep link only, link mode off.
    pub fn native_only(native: impl Into<String>) -> Self {
        Self {
            native: Some(native.into()),
            universal: None,
            link_mode: false,
        }
    }

    /// Universal link only, link mode off.
    pub fn universal_only(universal: impl Into<String>) -> Self {
        Self {
            native: None,
            universal: Some(universal.into()),
            link_mode: false,
        }
    }

    /// Universal link with link mode on.
    pub fn universal_link_mode(universal: impl Into<String>) -> Self {
        Self {
            native: None,
            universal: Some(universal.into()),
            link_mode: true,
        }
    }

    /// Returns a copy with the native deep link replaced.
    #[must_use]
    pub fn with_native(self, native: impl Into<String>) -> Self {
        Self {
            native: Some(native.into()),
            ..self
        }
    }

    pub fn native(&self) -> Option<&str> {
        self.native.as_deref()
    }

    pub fn universal(&self) -> Option<&str> {
        self.universal.as_deref()
    }

    pub fn link_mode(&self) -> bool {
        self.link_mode
    }

    /// Check the link-mode invariant.
    pub fn validate(&self) -> Result<()> {
        if self.link_mode && self.universal.is_none() {
            debug!(
                native = ?self.native,
                "rejecting redirect: link mode without universal link"
            );
            return Err(Error::InvalidLinkModeUniversalLink);
        }
        Ok(())
    }

    /// The link a peer should open to route back to the app.
    ///
    /// Link mode routes through the universal link only. Otherwise the native
    /// link wins over the universal link. Empty strings count as absent.
    pub fn target(&self) -> Option<&str> {
        let universal = self.universal().filter(|u| !u.is_empty());
        if self.link_mode {
            return universal;
        }
        self.native().filter(|n| !n.is_empty()).or(universal)
    }

    /// Encode with absent links omitted.
    pub fn encode(&self) -> Value {
        self.encode_with(OptionalFields::Omit)
    }

    pub fn encode_with(&self, fields: OptionalFields) -> Value {
        let mut map = Map::new();
        fields.insert(&mut map, "native", self.native.clone().map(Value::String));
        fields.insert(
            &mut map,
            "universal",
            self.universal.clone().map(Value::String),
        );
        map.insert("linkMode".to_owned(), Value::Bool(self.link_mode));
        Value::Object(map)
    }

    /// Decode and validate a redirect record.
    ///
    /// A missing `linkMode` decodes as `false`. Shape errors are reported as
    /// [`Error::MalformedRecord`]; a shape-valid record that breaks the
    /// link-mode rule fails with [`Error::InvalidLinkModeUniversalLink`].
    pub fn decode(data: &Value) -> Result<Self> {
        let wire = RedirectWire::deserialize(data).map_err(|e| {
            debug!(error = %e, "malformed redirect record");
            Error::malformed(RECORD, e)
        })?;
        Self::try_from(wire)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use {super::*, rstest::rstest, serde_json::json};

    #[rstest]
    #[case(None, None)]
    #[case(Some("app://"), None)]
    #[case(None, Some("https://example.com/app"))]
    #[case(Some("app://"), Some("https://example.com/app"))]
    fn link_mode_off_always_constructs(
        #[case] native: Option<&str>,
        #[case] universal: Option<&str>,
    ) {
        let redirect = Redirect::new(
            native.map(String::from),
            universal.map(String::from),
            false,
        )
        .unwrap();
        assert_eq!(redirect.native(), native);
        assert_eq!(redirect.universal(), universal);
        assert!(!redirect.link_mode());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("app://"))]
    fn link_mode_without_universal_is_rejected(#[case] native: Option<&str>) {
        let err = Redirect::new(native.map(String::from), None, true).unwrap_err();
        assert!(matches!(err, Error::InvalidLinkModeUniversalLink));
    }

    #[test]
    fn link_mode_with_universal_constructs() {
        let redirect = Redirect::new(
            Some("app://".into()),
            Some("https://example.com/app".into()),
            true,
        )
        .unwrap();
        assert!(redirect.link_mode());
        assert_eq!(
            redirect,
            Redirect::universal_link_mode("https://example.com/app").with_native("app://")
        );
    }

    #[test]
    fn default_is_valid_and_empty() {
        let redirect = Redirect::default();
        assert!(redirect.validate().is_ok());
        assert!(redirect.native().is_none());
        assert!(redirect.universal().is_none());
        assert!(!redirect.link_mode());
    }

    // ── Encoding ───────────────────────────────────────────────────────

    #[test]
    fn encode_omits_absent_links() {
        let json = Redirect::native_only("app://").encode();
        assert_eq!(json, json!({ "native": "app://", "linkMode": false }));
    }

    #[test]
    fn encode_with_explicit_null() {
        let json = Redirect::native_only("app://").encode_with(OptionalFields::ExplicitNull);
        assert_eq!(
            json,
            json!({ "native": "app://", "universal": null, "linkMode": false })
        );
    }

    #[test]
    fn encode_matches_serde_serialization() {
        let redirect = Redirect::universal_link_mode("https://example.com/app");
        assert_eq!(serde_json::to_value(&redirect).unwrap(), redirect.encode());
    }

    #[test]
    fn round_trips_under_both_conventions() {
        let redirects = [
            Redirect::default(),
            Redirect::native_only(""),
            Redirect::universal_only("https://example.com/app"),
            Redirect::universal_link_mode("https://example.com/app").with_native("app://"),
        ];
        for redirect in redirects {
            for fields in [OptionalFields::Omit, OptionalFields::ExplicitNull] {
                let decoded = Redirect::decode(&redirect.encode_with(fields)).unwrap();
                assert_eq!(decoded, redirect);
            }
        }
    }

    // ── Decoding ───────────────────────────────────────────────────────

    #[test]
    fn decode_defaults_missing_link_mode() {
        let redirect = Redirect::decode(&json!({ "native": "app://" })).unwrap();
        assert!(!redirect.link_mode());
        assert!(redirect.universal().is_none());
    }

    #[test]
    fn decode_empty_object() {
        let redirect = Redirect::decode(&json!({})).unwrap();
        assert_eq!(redirect, Redirect::default());
    }

    #[test]
    fn decode_link_mode_without_universal_is_invalid_not_malformed() {
        let err = Redirect::decode(&json!({ "native": "app://", "linkMode": true })).unwrap_err();
        assert!(matches!(err, Error::InvalidLinkModeUniversalLink));
    }

    #[test]
    fn decode_link_mode_with_null_universal_is_invalid() {
        let err = Redirect::decode(&json!({ "universal": null, "linkMode": true })).unwrap_err();
        assert!(matches!(err, Error::InvalidLinkModeUniversalLink));
    }

    #[rstest]
    #[case(json!({ "linkMode": "yes" }))]
    #[case(json!({ "linkMode": null }))]
    #[case(json!({ "native": 42 }))]
    #[case(json!({ "universal": ["https://example.com"] }))]
    #[case(json!("app://"))]
    fn decode_wrong_shape_is_malformed(#[case] input: Value) {
        let err = Redirect::decode(&input).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { record: "redirect", .. }));
    }

    #[test]
    fn serde_deserialize_enforces_link_mode() {
        let err = serde_json::from_value::<Redirect>(json!({ "linkMode": true })).unwrap_err();
        assert!(err.to_string().contains("link mode requires a universal link"));
    }

    // ── Routing target ─────────────────────────────────────────────────

    #[test]
    fn target_prefers_native_outside_link_mode() {
        let redirect = Redirect::universal_only("https://example.com/app").with_native("app://");
        assert_eq!(redirect.target(), Some("app://"));
    }

    #[test]
    fn target_uses_universal_in_link_mode() {
        let redirect =
            Redirect::universal_link_mode("https://example.com/app").with_native("app://");
        assert_eq!(redirect.target(), Some("https://example.com/app"));
    }

    #[test]
    fn target_skips_empty_native() {
        assert_eq!(Redirect::native_only("").target(), None);
        let redirect = Redirect::universal_only("https://example.com/app").with_native("");
        assert_eq!(redirect.target(), Some("https://example.com/app"));
    }
}
