//! Permission requirements attached to protected resources.
//!
//! Every enforcement point (menu entry, route, UI element) carries a
//! [`RequiredPermission`]. The variant is matched exhaustively by the
//! policy; there is no runtime sniffing of "string or list".
//!
//! # Configuration Format
//!
//! | TOML value                      | Variant                 |
//! |---------------------------------|-------------------------|
//! | absent                          | `None`                  |
//! | `"order_view"`                  | `Single(order_view)`    |
//! | `["order_view", "order_edit"]`  | `All([..])`             |
//! | `[]`                            | `None`                  |

use gatekeep_types::{PermissionCode, Principal};
use serde::de::Deserializer;
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// What a principal must hold to access a resource.
///
/// `All` is logical AND: every listed code must be held. Order of the
/// listed codes does not affect the decision and duplicates have no effect.
///
/// # Example
///
/// ```
/// use gatekeep_auth::RequiredPermission;
/// use gatekeep_types::PermissionCode;
///
/// let open = RequiredPermission::all(Vec::new());
/// assert!(open.is_none());
///
/// let edit = RequiredPermission::all([PermissionCode::PRODUCT_VIEW, PermissionCode::PRODUCT_EDIT]);
/// assert_eq!(edit.codes().len(), 2);
/// assert!(edit.contains(&PermissionCode::PRODUCT_EDIT));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequiredPermission {
    /// No restriction beyond being signed in.
    #[default]
    None,
    /// Exactly one code must be held.
    Single(PermissionCode),
    /// Every code must be held. Never empty once built through [`all`](Self::all).
    All(Vec<PermissionCode>),
}

impl RequiredPermission {
    /// Builds a requirement from a list of codes.
    ///
    /// An empty list normalizes to [`RequiredPermission::None`].
    #[must_use]
    pub fn all(codes: impl IntoIterator<Item = PermissionCode>) -> Self {
        let codes: Vec<_> = codes.into_iter().collect();
        if codes.is_empty() {
            Self::None
        } else {
            Self::All(codes)
        }
    }

    /// Returns `true` if nothing is required.
    #[must_use]
    pub fn is_none(&self) -> bool {
        match self {
            Self::None => true,
            Self::Single(_) => false,
            Self::All(codes) => codes.is_empty(),
        }
    }

    /// Returns the required codes as a slice (empty for `None`).
    #[must_use]
    pub fn codes(&self) -> &[PermissionCode] {
        match self {
            Self::None => &[],
            Self::Single(code) => std::slice::from_ref(code),
            Self::All(codes) => codes,
        }
    }

    /// Returns `true` if `code` is one of the required codes.
    #[must_use]
    pub fn contains(&self, code: &PermissionCode) -> bool {
        self.codes().contains(code)
    }

    /// Returns the required codes `principal` does not hold, in
    /// requirement order with duplicates removed.
    ///
    /// Plain membership; admin bypass is the policy's concern.
    #[must_use]
    pub fn missing_from(&self, principal: &Principal) -> Vec<PermissionCode> {
        let mut missing: Vec<PermissionCode> = Vec::new();
        for code in self.codes() {
            if !principal.holds(code) && !missing.contains(code) {
                missing.push(code.clone());
            }
        }
        missing
    }
}

impl From<PermissionCode> for RequiredPermission {
    fn from(code: PermissionCode) -> Self {
        Self::Single(code)
    }
}

impl From<Vec<PermissionCode>> for RequiredPermission {
    fn from(codes: Vec<PermissionCode>) -> Self {
        Self::all(codes)
    }
}

impl From<Option<PermissionCode>> for RequiredPermission {
    fn from(code: Option<PermissionCode>) -> Self {
        code.map_or(Self::None, Self::Single)
    }
}

impl std::fmt::Display for RequiredPermission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => f.write_str("none"),
            Self::Single(code) => write!(f, "{code}"),
            Self::All(codes) => {
                f.write_str("[")?;
                for (i, code) in codes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{code}")?;
                }
                f.write_str("]")
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Repr {
    One(PermissionCode),
    Many(Vec<PermissionCode>),
}

impl<'de> Deserialize<'de> for RequiredPermission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<Repr>::deserialize(deserializer)? {
            None => Self::None,
            Some(Repr::One(code)) => Self::Single(code),
            Some(Repr::Many(codes)) => Self::all(codes),
        })
    }
}

impl Serialize for RequiredPermission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::None => serializer.serialize_none(),
            Self::Single(code) => code.serialize(serializer),
            Self::All(codes) => {
                let mut seq = serializer.serialize_seq(Some(codes.len()))?;
                for code in codes {
                    seq.serialize_element(code)?;
                }
                seq.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatekeep_types::{PrincipalId, Role};

    #[derive(Debug, Deserialize)]
    struct Holder {
        #[serde(default)]
        required: RequiredPermission,
    }

    fn parse(src: &str) -> RequiredPermission {
        toml::from_str::<Holder>(src).expect("parse").required
    }

    #[test]
    fn deserialize_absent_is_none() {
        assert_eq!(parse(""), RequiredPermission::None);
    }

    #[test]
    fn deserialize_string_is_single() {
        assert_eq!(
            parse(r#"required = "order_view""#),
            RequiredPermission::Single(PermissionCode::ORDER_VIEW)
        );
    }

    #[test]
    fn deserialize_list_is_all() {
        assert_eq!(
            parse(r#"required = ["order_view", "order_edit"]"#),
            RequiredPermission::All(vec![PermissionCode::ORDER_VIEW, PermissionCode::ORDER_EDIT])
        );
    }

    #[test]
    fn deserialize_empty_list_is_none() {
        assert!(parse("required = []").is_none());
    }

    #[test]
    fn json_null_is_none() {
        let parsed: RequiredPermission = serde_json::from_str("null").expect("parse");
        assert_eq!(parsed, RequiredPermission::None);
    }

    #[test]
    fn serialize_shapes() {
        let single = serde_json::to_string(&RequiredPermission::from(PermissionCode::USER_VIEW))
            .expect("serialize");
        assert_eq!(single, "\"user_view\"");

        let all = serde_json::to_string(&RequiredPermission::all([
            PermissionCode::USER_VIEW,
            PermissionCode::USER_EDIT,
        ]))
        .expect("serialize");
        assert_eq!(all, "[\"user_view\",\"user_edit\"]");
    }

    #[test]
    fn missing_is_ordered_and_deduplicated() {
        let principal = Principal::new(PrincipalId::named("dave"), "dave", Role::User)
            .with_permissions([PermissionCode::ORDER_VIEW]);
        let required = RequiredPermission::all([
            PermissionCode::ORDER_EDIT,
            PermissionCode::ORDER_VIEW,
            PermissionCode::ORDER_DELETE,
            PermissionCode::ORDER_EDIT,
        ]);

        assert_eq!(
            required.missing_from(&principal),
            vec![PermissionCode::ORDER_EDIT, PermissionCode::ORDER_DELETE]
        );
    }

    #[test]
    fn display() {
        assert_eq!(RequiredPermission::None.to_string(), "none");
        assert_eq!(
            RequiredPermission::all([PermissionCode::SYSTEM_VIEW, PermissionCode::SYSTEM_EDIT])
                .to_string(),
            "[system_view, system_edit]"
        );
    }
}
