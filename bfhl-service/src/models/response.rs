use serde::Serialize;

/// Result payload of a successful operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BfhlData {
    /// Fibonacci terms.
    Sequence(Vec<u64>),
    /// Primes kept from the input, in input order.
    Numbers(Vec<i64>),
    /// LCM or HCF.
    Number(u64),
    /// First word of the AI reply.
    Word(String),
}

/// Body of every `/health` and `/bfhl` response.
#[derive(Debug, Clone, Serialize)]
pub struct BfhlResponse {
    pub is_success: bool,
    pub official_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<BfhlData>,
}

impl BfhlResponse {
    pub fn success(official_email: impl Into<String>, data: BfhlData) -> Self {
        Self {
            is_success: true,
            official_email: official_email.into(),
            data: Some(data),
        }
    }

    /// Success without a payload, as returned by the health check.
    pub fn ok(official_email: impl Into<String>) -> Self {
        Self {
            is_success: true,
            official_email: official_email.into(),
            data: None,
        }
    }

    pub fn failure(official_email: impl Into<String>) -> Self {
        Self {
            is_success: false,
            official_email: official_email.into(),
            data: None,
        }
    }
}
