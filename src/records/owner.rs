/// Owner id reserved for synthetic demonstration data.
pub const DEMO_OWNER_ID: &str = "seeded";

/// Who a query targets. Only `Demo` is subject to the retrieval transform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Owner {
    Real(String),
    Demo,
}

impl Owner {
    /// An absent or empty owner id falls back to the demo owner.
    pub fn resolve(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") | Some(DEMO_OWNER_ID) => Self::Demo,
            Some(id) => Self::Real(id.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Real(id) => id,
            Self::Demo => DEMO_OWNER_ID,
        }
    }

    pub fn is_demo(&self) -> bool {
        matches!(self, Self::Demo)
    }
}
