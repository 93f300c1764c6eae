use crate::{configuration::DEFAULT_TLS_PORT, products::unexpected::Unexpected};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};


#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
/// Host check entry, as stored in the sites file
pub struct HostTarget {
    /// Host name, used for connection and SNI
    pub sitename: String,

    /// TLS port, 443 when not given
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub port: Option<u16>,

    /// Alert and reminder recipient
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub contact: Option<String>,

    /// Host is checked only when enabled (default)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub enable: Option<bool>,

    /// Dedup marker: expiry date (YYYY-MM-DD) as of the last reminder sent
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub ending_date: Option<String>,

    /// Any other keys, kept untouched on rewrite
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}


/// Hosts type
pub type HostTargets = Vec<HostTarget>;


impl HostTarget {
    /// New enabled host target on default port
    pub fn new(sitename: &str) -> HostTarget {
        HostTarget {
            sitename: sitename.to_string(),
            ..HostTarget::default()
        }
    }


    /// Builder: set port
    pub fn with_port(mut self, port: u16) -> HostTarget {
        self.port = Some(port);
        self
    }


    /// Builder: set contact
    pub fn with_contact(mut self, contact: &str) -> HostTarget {
        self.contact = Some(contact.to_string());
        self
    }


    /// Builder: set enabled flag
    pub fn with_enable(mut self, enable: bool) -> HostTarget {
        self.enable = Some(enable);
        self
    }


    /// Builder: set stored dedup marker
    pub fn with_ending_date(mut self, ending_date: &str) -> HostTarget {
        self.ending_date = Some(ending_date.to_string());
        self
    }


    /// Host name without surrounding whitespace
    pub fn hostname(&self) -> &str {
        self.sitename.trim()
    }


    /// Port to connect to
    pub fn port(&self) -> u16 {
        match self.port {
            Some(port) if port > 0 => port,
            _ => DEFAULT_TLS_PORT,
        }
    }


    /// Whether the host takes part in a run
    pub fn enabled(&self) -> bool {
        self.enable.unwrap_or(true)
    }


    /// Non-empty contact address
    pub fn contact(&self) -> Option<&str> {
        self.contact
            .as_deref()
            .map(str::trim)
            .filter(|contact| !contact.is_empty())
    }


    /// Validate host target before it's checked
    pub fn validate(&self) -> Result<(), Unexpected> {
        if self.hostname().is_empty() {
            return Err(Unexpected::Configuration(String::from(
                "missing valid 'sitename'",
            )));
        }
        Ok(())
    }


    /// Build host target from a single sites file entry (1-based index used in messages)
    pub fn from_entry(index: usize, entry: Value) -> Result<HostTarget, Unexpected> {
        let mut fields = match entry {
            Value::Object(fields) => fields,
            _ => {
                return Err(Unexpected::Configuration(format!(
                    "Entry #{} is not an object",
                    index
                )))
            }
        };

        let sitename = match fields.remove("sitename") {
            Some(Value::String(name)) if !name.trim().is_empty() => name,
            _ => {
                return Err(Unexpected::Configuration(format!(
                    "Entry #{} missing valid 'sitename'",
                    index
                )))
            }
        };

        let enable = match fields.remove("enable") {
            None | Some(Value::Null) => None,
            Some(Value::Bool(enable)) => Some(enable),
            Some(_) => {
                return Err(Unexpected::Configuration(format!(
                    "Entry #{} 'enable' must be boolean",
                    index
                )))
            }
        };

        let port = match fields.remove("port") {
            None | Some(Value::Null) => None,
            Some(value) => {
                Some(parse_port(&value).ok_or_else(|| {
                    Unexpected::Configuration(format!(
                        "Entry #{} 'port' must be a port number, got: {}",
                        index, value
                    ))
                })?)
            }
        };

        let contact = take_string(&mut fields, "contact");
        let ending_date = take_string(&mut fields, "ending_date");

        Ok(HostTarget {
            sitename,
            port,
            contact,
            enable,
            ending_date,
            extra: fields,
        })
    }
}


/// Take a string field out, leave values of other types in place
fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(text)) => Some(text),
        Some(other) => {
            fields.insert(key.to_string(), other);
            None
        }
        None => None,
    }
}


/// Port from a number or numeric string. Zero or empty string means default
fn parse_port(value: &Value) -> Option<u16> {
    let port = match value {
        Value::Number(number) => number.as_u64().and_then(|port| u16::try_from(port).ok()),
        Value::String(text) if text.trim().is_empty() => Some(0),
        Value::String(text) => text.trim().parse::<u16>().ok(),
        _ => None,
    };
    port.map(|port| if port == 0 { DEFAULT_TLS_PORT } else { port })
}
