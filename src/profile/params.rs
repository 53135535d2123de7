use serde::Serialize;

pub const DEFAULT_URI: &str = "chrome://webrunner/locale/welcome.html";
pub const DEFAULT_ICON: &str = "webrunner";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Text,
    Flag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Flag(bool),
}

/// One settable parameter: its name (also its command-line flag) and how
/// a raw string is stored into it.
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    set: fn(&mut Parameters, &str),
    get: fn(&Parameters) -> ParamValue,
}

/// Every parameter the manifest or command line may set, in lookup order.
pub static PARAMETERS: [ParamSpec; 7] = [
    ParamSpec {
        name: "id",
        kind: ParamKind::Text,
        set: |p, v| p.id = v.to_string(),
        get: |p| ParamValue::Text(p.id.clone()),
    },
    ParamSpec {
        name: "uri",
        kind: ParamKind::Text,
        set: |p, v| p.uri = v.to_string(),
        get: |p| ParamValue::Text(p.uri.clone()),
    },
    ParamSpec {
        name: "icon",
        kind: ParamKind::Text,
        set: |p, v| p.icon = v.to_string(),
        get: |p| ParamValue::Text(p.icon.clone()),
    },
    ParamSpec {
        name: "status",
        kind: ParamKind::Flag,
        set: |p, v| p.status = parse_flag(v),
        get: |p| ParamValue::Flag(p.status),
    },
    ParamSpec {
        name: "location",
        kind: ParamKind::Flag,
        set: |p, v| p.location = parse_flag(v),
        get: |p| ParamValue::Flag(p.location),
    },
    ParamSpec {
        name: "sidebar",
        kind: ParamKind::Flag,
        set: |p, v| p.sidebar = parse_flag(v),
        get: |p| ParamValue::Flag(p.sidebar),
    },
    ParamSpec {
        name: "navigation",
        kind: ParamKind::Flag,
        set: |p, v| p.navigation = parse_flag(v),
        get: |p| ParamValue::Flag(p.navigation),
    },
];

/// `true` for "true" or "yes" in any case; everything else is `false`.
pub fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("yes")
}

pub fn spec(name: &str) -> Option<&'static ParamSpec> {
    PARAMETERS.iter().find(|spec| spec.name == name)
}

/// Display and chrome settings of a webapp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameters {
    pub id: String,
    pub uri: String,
    pub icon: String,
    pub status: bool,
    pub location: bool,
    pub sidebar: bool,
    pub navigation: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            id: String::new(),
            uri: DEFAULT_URI.to_string(),
            icon: DEFAULT_ICON.to_string(),
            status: true,
            location: false,
            sidebar: false,
            navigation: true,
        }
    }
}

impl Parameters {
    /// Store `value` into the parameter `name`, coercing it to the field's
    /// type. Names outside [`PARAMETERS`] are ignored; returns whether a
    /// field was written.
    pub fn set(&mut self, name: &str, value: &str) -> bool {
        let Some(spec) = spec(name) else {
            tracing::debug!(name, "ignoring unknown parameter");
            return false;
        };
        (spec.set)(self, value);
        true
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        spec(name).map(|spec| (spec.get)(self))
    }

    pub fn has_custom_icon(&self) -> bool {
        self.icon != DEFAULT_ICON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = Parameters::default();
        assert_eq!(params.get("id"), Some(ParamValue::Text(String::new())));
        assert_eq!(params.get("uri"), Some(ParamValue::Text(DEFAULT_URI.into())));
        assert_eq!(params.get("icon"), Some(ParamValue::Text("webrunner".into())));
        assert_eq!(params.get("status"), Some(ParamValue::Flag(true)));
        assert_eq!(params.get("location"), Some(ParamValue::Flag(false)));
        assert_eq!(params.get("sidebar"), Some(ParamValue::Flag(false)));
        assert_eq!(params.get("navigation"), Some(ParamValue::Flag(true)));
        assert!(!params.has_custom_icon());
    }

    #[test]
    fn flag_coercion() {
        for yes in ["TRUE", "true", "yes", "Yes", "YES"] {
            let mut params = Parameters::default();
            params.status = false;
            assert!(params.set("status", yes));
            assert!(params.status, "{yes} should be true");
        }

        for no in ["false", "banana", "1", "", "y"] {
            let mut params = Parameters::default();
            assert!(params.set("status", no));
            assert!(!params.status, "{no} should be false");
        }
    }

    #[test]
    fn text_fields_take_value_verbatim() {
        let mut params = Parameters::default();
        params.set("uri", "https://mail.example.org/?a=b;c");
        params.set("icon", "mail");
        assert_eq!(params.uri, "https://mail.example.org/?a=b;c");
        assert!(params.has_custom_icon());
    }

    #[test]
    fn unknown_names_are_ignored() {
        let mut params = Parameters::default();
        assert!(!params.set("bogusField", "x"));
        assert!(!params.set("fileTypes", "x"));
        assert!(!params.set("script", "x"));
        assert_eq!(params, Parameters::default());
        assert_eq!(params.get("bogusField"), None);
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut params = Parameters::default();
        assert!(!params.set("ICON", "mail"));
        assert_eq!(params.icon, DEFAULT_ICON);
    }

    #[test]
    fn table_kinds_match_field_types() {
        let params = Parameters::default();
        for spec in &PARAMETERS {
            let value = params.get(spec.name).unwrap();
            match spec.kind {
                ParamKind::Text => assert!(matches!(value, ParamValue::Text(_))),
                ParamKind::Flag => assert!(matches!(value, ParamValue::Flag(_))),
            }
        }
    }
}
