use std::borrow::Cow;

use quick_xml::events::BytesStart;

use crate::ImportError;

/// Attributes of one start tag, keyed by local name with values unescaped.
///
/// Getters follow the OOXML conventions: a missing or unparsable value
/// returns `None` and callers apply the schema default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList {
    entries: Vec<(String, String)>,
}

impl AttributeList {
    pub fn from_start(e: &BytesStart<'_>) -> Result<Self, ImportError> {
        let mut entries = Vec::new();
        for a in e.attributes().with_checks(false) {
            let a = a?;
            let key = String::from_utf8_lossy(a.key.local_name().as_ref()).into_owned();
            let value = a.unescape_value()?.into_owned();
            entries.push((key, value));
        }
        Ok(Self { entries })
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Like [`AttributeList::get_string`], additionally decoding `_xHHHH_` escapes
    /// used by SpreadsheetML for characters that cannot appear in XML.
    pub fn get_xstring(&self, key: &str) -> Option<Cow<'_, str>> {
        self.get_string(key).map(decode_xstring)
    }

    /// `xsd:boolean`, also accepting `on`/`off`.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get_string(key)?.trim() {
            "1" | "true" | "on" => Some(true),
            "0" | "false" | "off" => Some(false),
            _ => None,
        }
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get_string(key)?.trim().parse().ok()
    }

    pub fn get_u32(&self, key: &str) -> Option<u32> {
        self.get_string(key)?.trim().parse().ok()
    }
}

/// Decode SpreadsheetML `_xHHHH_` escapes (e.g. `_x000D_` for a carriage return).
fn decode_xstring(s: &str) -> Cow<'_, str> {
    if !s.contains("_x") {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(pos) = rest.find("_x") {
        out.push_str(&rest[..pos]);
        let candidate = &rest[pos..];
        let decoded = candidate
            .get(2..6)
            .filter(|_| candidate.as_bytes().get(6) == Some(&b'_'))
            .and_then(|hex| u32::from_str_radix(hex, 16).ok())
            .and_then(char::from_u32);
        match decoded {
            Some(ch) => {
                out.push(ch);
                rest = &candidate[7..];
            }
            None => {
                out.push_str("_x");
                rest = &candidate[2..];
            }
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}
