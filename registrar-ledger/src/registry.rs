//! [`LedgerGateway`] implementation against the registrar contract.

use async_trait::async_trait;
use tracing::{debug, info};

use registrar_core::error::{RegistrarError, Result};
use registrar_core::traits::LedgerGateway;
use registrar_core::types::{Address, Name, TxHandle};

use crate::abi;
use crate::rpc::RpcClient;

// Contract function signatures, fixed by the deployed registrar.
const SIG_ADDR: &str = "addr(bytes32)";
const SIG_OWNER: &str = "owner(bytes32)";
const SIG_PUBLICKEY: &str = "publickey(bytes32)";
const SIG_SIGNATURE: &str = "signature(bytes32)";
const SIG_NAME: &str = "name(address)";
const SIG_RESERVE_FOR: &str = "reserveFor(bytes32,address,address,bytes,bytes)";

/// Gas limit for reservation transactions.
const RESERVE_GAS: u64 = 3_000_000;

/// JSON-RPC implementation of the [`LedgerGateway`] capability set.
///
/// Queries go through `eth_call` against the registrar contract;
/// reservations through `eth_sendTransaction` from the configured
/// transacting identity; inclusion checks through
/// `eth_getTransactionReceipt`.
pub struct RegistryClient {
    rpc: RpcClient,
    contract: Address,
    identity: Address,
}

impl RegistryClient {
    /// Creates a client for a deployed registrar contract.
    pub fn new(rpc: RpcClient, contract: Address, identity: Address) -> Self {
        Self {
            rpc,
            contract,
            identity,
        }
    }

    /// Verifies that contract code exists at the configured address.
    ///
    /// Deployment is outside this service; a missing contract is a startup
    /// error, not something to repair here.
    pub async fn ensure_deployed(&self) -> Result<()> {
        let code = self.rpc.code_at(&self.contract.to_hex_string()).await?;
        if code.is_empty() || code == "0x" || code == "0x0" {
            return Err(RegistrarError::ContractMissing(
                self.contract.to_hex_string(),
            ));
        }
        info!(contract = %self.contract, "registry contract found");
        Ok(())
    }

    /// Fetches the transacting identity's balance, as the node's hex quantity.
    pub async fn identity_balance(&self) -> Result<String> {
        self.rpc.balance_of(&self.identity.to_hex_string()).await
    }

    async fn call_word(&self, signature: &str, word: [u8; 32]) -> Result<[u8; 32]> {
        let data = abi::encode_query(signature, word);
        let result = self
            .rpc
            .eth_call(&self.contract.to_hex_string(), &data)
            .await?;
        abi::decode_word(&result)
    }

    async fn call_bytes(&self, signature: &str, word: [u8; 32]) -> Result<Option<Vec<u8>>> {
        let data = abi::encode_query(signature, word);
        let result = self
            .rpc
            .eth_call(&self.contract.to_hex_string(), &data)
            .await?;
        abi::decode_bytes(&result)
    }
}

#[async_trait]
impl LedgerGateway for RegistryClient {
    async fn query_address(&self, name: &Name) -> Result<Option<Address>> {
        let word = self.call_word(SIG_ADDR, name.to_word()).await?;
        Ok(Address::from_word(&word))
    }

    async fn query_public_key(&self, name: &Name) -> Result<Option<Vec<u8>>> {
        self.call_bytes(SIG_PUBLICKEY, name.to_word()).await
    }

    async fn query_signature(&self, name: &Name) -> Result<Option<Vec<u8>>> {
        self.call_bytes(SIG_SIGNATURE, name.to_word()).await
    }

    async fn query_owner(&self, name: &Name) -> Result<Option<Address>> {
        let word = self.call_word(SIG_OWNER, name.to_word()).await?;
        Ok(Address::from_word(&word))
    }

    async fn query_name_of(&self, addr: &Address) -> Result<Option<Name>> {
        let word = self.call_word(SIG_NAME, addr.to_word()).await?;
        Name::from_word(&word)
    }

    async fn submit_reservation(
        &self,
        name: &Name,
        owner: &Address,
        addr: &Address,
        publickey: &[u8],
        signature: &[u8],
    ) -> Result<TxHandle> {
        let data = abi::encode_reserve_for(
            SIG_RESERVE_FOR,
            name.to_word(),
            owner.to_word(),
            addr.to_word(),
            publickey,
            signature,
        );

        let hash = self
            .rpc
            .send_transaction(
                &self.identity.to_hex_string(),
                &self.contract.to_hex_string(),
                &data,
                RESERVE_GAS,
            )
            .await?;

        debug!(%name, %addr, tx = %hash, "reservation submitted");
        Ok(TxHandle::new(hash))
    }

    async fn transaction_included(&self, tx: &TxHandle) -> Result<bool> {
        match self.rpc.transaction_receipt(tx.as_str()).await? {
            Some(receipt) => Ok(receipt
                .get("transactionHash")
                .and_then(|h| h.as_str())
                .map(|h| h.eq_ignore_ascii_case(tx.as_str()))
                .unwrap_or(false)),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn rpc_result(value: serde_json::Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "result": value
        }))
    }

    fn client(server: &MockServer) -> RegistryClient {
        RegistryClient::new(
            RpcClient::new(server.uri()),
            Address::from_array([0x0C; 20]),
            Address::from_array([0x1D; 20]),
        )
    }

    fn word_result(word: [u8; 32]) -> serde_json::Value {
        json!(format!("0x{}", hex::encode(word)))
    }

    #[tokio::test]
    async fn test_query_address_present() {
        let server = MockServer::start().await;
        let mut word = [0u8; 32];
        word[12..].copy_from_slice(&[0xAA; 20]);
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "eth_call" })))
            .respond_with(rpc_result(word_result(word)))
            .mount(&server)
            .await;

        let addr = client(&server)
            .query_address(&Name::parse("alice").unwrap())
            .await
            .unwrap();
        assert_eq!(addr.unwrap(), Address::from_array([0xAA; 20]));
    }

    #[tokio::test]
    async fn test_query_address_zero_is_absent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(rpc_result(word_result([0u8; 32])))
            .mount(&server)
            .await;

        let addr = client(&server)
            .query_address(&Name::parse("ghost").unwrap())
            .await
            .unwrap();
        assert!(addr.is_none());
    }

    #[tokio::test]
    async fn test_query_name_of_decodes_padded_name() {
        let server = MockServer::start().await;
        let mut word = [0u8; 32];
        word[..5].copy_from_slice(b"alice");
        Mock::given(method("POST"))
            .respond_with(rpc_result(word_result(word)))
            .mount(&server)
            .await;

        let name = client(&server)
            .query_name_of(&Address::from_array([0xAA; 20]))
            .await
            .unwrap();
        assert_eq!(name.unwrap().as_str(), "alice");
    }

    #[tokio::test]
    async fn test_ensure_deployed_rejects_empty_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "eth_getCode" })))
            .respond_with(rpc_result(json!("0x")))
            .mount(&server)
            .await;

        let err = client(&server).ensure_deployed().await.unwrap_err();
        assert!(matches!(err, RegistrarError::ContractMissing(_)));
    }

    #[tokio::test]
    async fn test_submit_then_included() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "eth_sendTransaction" })))
            .respond_with(rpc_result(json!("0xfeedbeef")))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_partial_json(
                json!({ "method": "eth_getTransactionReceipt" }),
            ))
            .respond_with(rpc_result(json!({ "transactionHash": "0xfeedbeef" })))
            .mount(&server)
            .await;

        let client = client(&server);
        let tx = client
            .submit_reservation(
                &Name::parse("alice").unwrap(),
                &Address::from_array([0x1D; 20]),
                &Address::from_array([0xAA; 20]),
                &[],
                &[],
            )
            .await
            .unwrap();
        assert_eq!(tx.as_str(), "0xfeedbeef");
        assert!(client.transaction_included(&tx).await.unwrap());
    }
}
