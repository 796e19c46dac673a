use {
    serde::{Deserialize, Serialize},
    serde_json::{Map, Value},
    tracing::debug,
};

use crate::{
    error::{Error, Result},
    redirect::Redirect,
    wire::OptionalFields,
};

const RECORD: &str = "app metadata";

/// Identity of an app as presented to a peer during pairing.
///
/// Shown to the user on the other side (for example while they review a
/// session proposal), so it should make the app easy to recognise and verify.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AppMetadataWire")]
pub struct AppMetadata {
    name: String,
    description: String,
    url: String,
    icons: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<Redirect>,
}

#[derive(Debug, Deserialize)]
struct AppMetadataWire {
    name: String,
    description: String,
    url: String,
    icons: Vec<String>,
    redirect: Option<Value>,
}

impl TryFrom<AppMetadataWire> for AppMetadata {
    type Error = Error;

    fn try_from(wire: AppMetadataWire) -> Result<Self> {
        let redirect = wire
            .redirect
            .as_ref()
            .map(Redirect::decode)
            .transpose()?;
        Ok(Self {
            name: wire.name,
            description: wire.description,
            url: wire.url,
            icons: wire.icons,
            redirect,
        })
    }
}

impl AppMetadata {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        icons: Vec<String>,
        redirect: Option<Redirect>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
            icons,
            redirect,
        }
    }

    /// Returns a copy carrying the given redirect links.
    #[must_use]
    pub fn with_redirect(self, redirect: Redirect) -> Self {
        Self {
            redirect: Some(redirect),
            ..self
        }
    }

    /// Human-readable app name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Short description that can be displayed to peers.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// URL of the app's official domain.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Icon asset URLs, in preference order.
    pub fn icons(&self) -> &[String] {
        &self.icons
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        self.redirect.as_ref()
    }

    /// The link a peer should open to route the user back, if any.
    pub fn redirect_target(&self) -> Option<&str> {
        self.redirect.as_ref().and_then(Redirect::target)
    }

    /// Encode with an absent redirect (and absent links) omitted.
    pub fn encode(&self) -> Value {
        self.encode_with(OptionalFields::Omit)
    }

    pub fn encode_with(&self, fields: OptionalFields) -> Value {
        let mut map = Map::new();
        map.insert("name".to_owned(), Value::String(self.name.clone()));
        map.insert(
            "description".to_owned(),
            Value::String(self.description.clone()),
        );
        map.insert("url".to_owned(), Value::String(self.url.clone()));
        map.insert(
            "icons".to_owned(),
            Value::Array(self.icons.iter().cloned().map(Value::String).collect()),
        );
        fields.insert(
            &mut map,
            "redirect",
            self.redirect.as_ref().map(|r| r.encode_with(fields)),
        );
        Value::Object(map)
    }

    /// Decode and validate a metadata record.
    ///
    /// Missing or wrongly typed fields fail with [`Error::MalformedRecord`],
    /// naming the redirect as the failing record when the fault is nested
    /// there. A nested redirect that breaks the link-mode rule fails with
    /// [`Error::InvalidLinkModeUniversalLink`].
    pub fn decode(data: &Value) -> Result<Self> {
        let wire = AppMetadataWire::deserialize(data).map_err(|e| {
            debug!(error = %e, "malformed app metadata record");
            Error::malformed(RECORD, e)
        })?;
        Self::try_from(wire)
    }

    pub fn to_json_string(&self) -> String {
        self.encode().to_string()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json).map_err(|e| Error::malformed(RECORD, e))?;
        Self::decode(&value)
    }
}

#[cfg(any(test, feature = "stub"))]
impl AppMetadata {
    /// Fixture used by tests across the workspace.
    pub fn stub() -> Self {
        Self::new(
            "Wallet Connect",
            "A protocol to connect blockchain wallets to dapps.",
            "https://walletconnect.com/",
            Vec::new(),
            Some(Redirect::native_only("")),
        )
    }
}
