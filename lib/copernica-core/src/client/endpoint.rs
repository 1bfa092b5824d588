//! Endpoint name resolution.
//!
//! Every Copernica endpoint the client knows about is listed in [`EndpointKind`].
//! Resolving an endpoint turns its name and optional argument into the resource
//! path used in the request URI:
//!
//! ```text
//! profile   + 42    → profile/42
//! tags      + "vip" → tags/vip
//! database  + 0     → databases
//! database  + 17    → database/17
//! identity          → identity
//! ```

use std::fmt;
use std::str::FromStr;

use super::ApiClientError;

/// The endpoints exposed by the Copernica REST API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EndpointKind {
    /// `collection/{id}`
    Collection,
    /// `database/{id}`, or `databases` for id `0`
    Database,
    /// `datarequest/{id}`
    Datarequest,
    /// `email/{id}`
    Email,
    /// `emailingdocument/{id}`
    Emailingdocument,
    /// `identity`
    Identity,
    /// `logfiles/{name}`
    Logfiles,
    /// `message/{id}`
    Message,
    /// `minirule/{id}`
    Minirule,
    /// `miniview/{id}`
    Miniview,
    /// `profile/{id}`
    Profile,
    /// `rule/{id}`
    Rule,
    /// `subprofile/{id}`
    Subprofile,
    /// `tags/{tag}`
    Tags,
    /// `template/{id}`
    Template,
    /// `view/{id}`
    View,
}

impl EndpointKind {
    /// All known endpoints.
    pub const ALL: [Self; 16] = [
        Self::Collection,
        Self::Database,
        Self::Datarequest,
        Self::Email,
        Self::Emailingdocument,
        Self::Identity,
        Self::Logfiles,
        Self::Message,
        Self::Minirule,
        Self::Miniview,
        Self::Profile,
        Self::Rule,
        Self::Subprofile,
        Self::Tags,
        Self::Template,
        Self::View,
    ];

    /// The endpoint name, as used in resource paths.
    pub fn name(self) -> &'static str {
        match self {
            Self::Collection => "collection",
            Self::Database => "database",
            Self::Datarequest => "datarequest",
            Self::Email => "email",
            Self::Emailingdocument => "emailingdocument",
            Self::Identity => "identity",
            Self::Logfiles => "logfiles",
            Self::Message => "message",
            Self::Minirule => "minirule",
            Self::Miniview => "miniview",
            Self::Profile => "profile",
            Self::Rule => "rule",
            Self::Subprofile => "subprofile",
            Self::Tags => "tags",
            Self::Template => "template",
            Self::View => "view",
        }
    }

    /// Resolves the resource path for this endpoint and its optional argument.
    ///
    /// # Example
    ///
    /// ```rust
    /// use copernica_core::{EndpointArg, EndpointKind};
    ///
    /// let path = EndpointKind::Profile.resource_path(Some(&EndpointArg::Id(42)));
    /// assert_eq!(path, "profile/42");
    ///
    /// let path = EndpointKind::Database.resource_path(Some(&EndpointArg::Id(0)));
    /// assert_eq!(path, "databases");
    /// ```
    pub fn resource_path(self, arg: Option<&EndpointArg>) -> String {
        match (self, arg) {
            (Self::Database, None | Some(EndpointArg::Id(0))) => "databases".to_string(),
            (_, Some(arg)) => format!("{}/{arg}", self.name()),
            (_, None) => self.name().to_string(),
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EndpointKind {
    type Err = ApiClientError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ApiClientError::UnknownEndpoint {
                name: name.to_string(),
            })
    }
}

/// The identifying argument of an endpoint: a numeric id or a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display, derive_more::From)]
pub enum EndpointArg {
    /// Numeric identifier, e.g. a profile id.
    Id(u64),
    /// Textual identifier, e.g. a tag or a log file name.
    Name(String),
}

impl From<&str> for EndpointArg {
    fn from(value: &str) -> Self {
        Self::Name(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule_with_id() {
        let path = EndpointKind::Profile.resource_path(Some(&EndpointArg::Id(42)));
        assert_eq!(path, "profile/42");
    }

    #[test]
    fn test_default_rule_with_name() {
        let path = EndpointKind::Tags.resource_path(Some(&EndpointArg::from("newsletter")));
        assert_eq!(path, "tags/newsletter");
    }

    #[test]
    fn test_default_rule_without_argument() {
        let path = EndpointKind::Identity.resource_path(None);
        assert_eq!(path, "identity");
    }

    #[test]
    fn test_database_zero_lists_all() {
        let path = EndpointKind::Database.resource_path(Some(&EndpointArg::Id(0)));
        assert_eq!(path, "databases");
    }

    #[test]
    fn test_database_without_argument_lists_all() {
        let path = EndpointKind::Database.resource_path(None);
        assert_eq!(path, "databases");
    }

    #[test]
    fn test_database_with_id() {
        let path = EndpointKind::Database.resource_path(Some(&EndpointArg::Id(17)));
        assert_eq!(path, "database/17");
    }

    #[test]
    fn test_database_with_textual_zero_is_not_special() {
        let path = EndpointKind::Database.resource_path(Some(&EndpointArg::from("0")));
        assert_eq!(path, "database/0");
    }

    #[test]
    fn test_every_endpoint_name_round_trips() {
        for kind in EndpointKind::ALL {
            let parsed: EndpointKind = kind.name().parse().expect("known endpoint");
            assert_eq!(parsed, kind);
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn test_display_uses_endpoint_name() {
        let names = EndpointKind::ALL.map(|kind| format!("{kind}"));

        insta::assert_debug_snapshot!(names, @r#"
        [
            "collection",
            "database",
            "datarequest",
            "email",
            "emailingdocument",
            "identity",
            "logfiles",
            "message",
            "minirule",
            "miniview",
            "profile",
            "rule",
            "subprofile",
            "tags",
            "template",
            "view",
        ]
        "#);
    }

    #[test]
    fn test_parse_ignores_ascii_case() {
        let parsed: EndpointKind = "Profile".parse().expect("known endpoint");
        assert_eq!(parsed, EndpointKind::Profile);
    }

    #[test]
    fn test_unknown_endpoint() {
        let result = "newsletter".parse::<EndpointKind>();

        let Err(ApiClientError::UnknownEndpoint { name }) = result else {
            panic!("expected UnknownEndpoint, got {result:?}");
        };
        assert_eq!(name, "newsletter");
    }
}
