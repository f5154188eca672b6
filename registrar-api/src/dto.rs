//! Request and response bodies for the HTTP surface.
//!
//! Public keys and signatures are base64 strings on the wire; addresses
//! are lowercase `0x`-prefixed hex.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use registrar_core::types::Record;
use registrar_service::RegistrationRequest;

/// `GET /name/:name` response.
#[derive(Debug, Serialize)]
pub struct NameResponse {
    /// The resolved name.
    pub name: String,
    /// The registered address.
    pub addr: String,
    /// Base64 public key, omitted for unsigned registrations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publickey: Option<String>,
    /// Base64 signature, omitted for unsigned registrations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
}

impl From<Record> for NameResponse {
    fn from(record: Record) -> Self {
        Self {
            name: record.name.as_str().to_string(),
            addr: record.addr.to_hex_string(),
            publickey: record.publickey.map(|pk| BASE64.encode(pk)),
            signature: record.signature.map(|sig| BASE64.encode(sig)),
        }
    }
}

/// `GET /name/:name/publickey` response.
#[derive(Debug, Serialize)]
pub struct PublicKeyResponse {
    /// The queried name.
    pub name: String,
    /// Base64 public key.
    pub publickey: String,
}

/// `GET /name/:name/signature` response.
#[derive(Debug, Serialize)]
pub struct SignatureResponse {
    /// The queried name.
    pub name: String,
    /// Base64 signature.
    pub signature: String,
}

/// `GET /name/:name/owner` response.
#[derive(Debug, Serialize)]
pub struct OwnerResponse {
    /// The queried name.
    pub name: String,
    /// Owning account address.
    pub owner: String,
}

/// `GET /addr/:addr` response.
#[derive(Debug, Serialize)]
pub struct AddressResponse {
    /// The name registered for the address.
    pub name: String,
}

/// `POST /name/:name` request body.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    /// Address the name should resolve to.
    pub addr: String,
    /// Account that will own the name.
    pub owner: String,
    /// Base64 public key; present iff `signature` is.
    #[serde(default)]
    pub publickey: Option<String>,
    /// Base64 signature over the name; present iff `publickey` is.
    #[serde(default)]
    pub signature: Option<String>,
}

impl From<RegisterBody> for RegistrationRequest {
    fn from(body: RegisterBody) -> Self {
        Self {
            addr: body.addr,
            owner: body.owner,
            publickey: body.publickey.filter(|s| !s.is_empty()),
            signature: body.signature.filter(|s| !s.is_empty()),
        }
    }
}

/// `POST /name/:name` success response.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Always true; failures use the error envelopes.
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_core::types::{Address, Name};

    #[test]
    fn test_name_response_omits_absent_credentials() {
        let record = Record::unsigned(
            Name::parse("alice").unwrap(),
            Address::from_array([0xAA; 20]),
        );
        let body = serde_json::to_value(NameResponse::from(record)).unwrap();

        assert_eq!(body["name"], "alice");
        assert_eq!(body["addr"], "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        assert!(body.get("publickey").is_none());
        assert!(body.get("signature").is_none());
    }

    #[test]
    fn test_name_response_encodes_credentials_base64() {
        let record = Record::signed(
            Name::parse("alice").unwrap(),
            Address::from_array([0xAA; 20]),
            vec![1; 32],
            vec![2; 64],
        );
        let body = serde_json::to_value(NameResponse::from(record)).unwrap();

        assert_eq!(body["publickey"], BASE64.encode(vec![1u8; 32]));
        assert_eq!(body["signature"], BASE64.encode(vec![2u8; 64]));
    }

    #[test]
    fn test_register_body_treats_empty_strings_as_absent() {
        let body: RegisterBody = serde_json::from_str(
            r#"{ "addr": "0xaa", "owner": "0xbb", "publickey": "", "signature": "" }"#,
        )
        .unwrap();
        let request = RegistrationRequest::from(body);

        assert!(request.publickey.is_none());
        assert!(request.signature.is_none());
    }
}
