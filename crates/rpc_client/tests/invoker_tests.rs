//! Invoker write path with an in-memory provider and signer.

use async_trait::async_trait;
use governor_core::{Address, BigInt, GOVERNANCE_SCORE_ADDRESS};
use governor_rpc_client::*;
use governor_wallets::{KeyWallet, TransactionSigner, SIGNATURE_SIZE};
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingProvider {
    estimated: Mutex<Vec<Transaction>>,
    sent: Mutex<Vec<SignedTransaction>>,
}

#[async_trait]
impl IconProvider for RecordingProvider {
    async fn call(&self, _call: &Call) -> RpcResult<Value> {
        Err(RpcError::invalid_params("reads are not expected"))
    }

    async fn send_transaction(&self, transaction: &SignedTransaction) -> RpcResult<[u8; 32]> {
        self.sent.lock().unwrap().push(transaction.clone());
        Ok(transaction.hash)
    }

    async fn estimate_step(&self, transaction: &Transaction) -> RpcResult<BigInt> {
        self.estimated.lock().unwrap().push(transaction.clone());
        Ok(BigInt::from(123_456))
    }

    async fn get_transaction_result(&self, _tx_hash: &[u8; 32]) -> RpcResult<TransactionResult> {
        Err(RpcError::invalid_params("results are not expected"))
    }

    async fn get_score_api(&self, _address: &Address) -> RpcResult<Value> {
        Err(RpcError::invalid_params("score api is not expected"))
    }
}

struct CountingSigner {
    wallet: KeyWallet,
    signatures: AtomicUsize,
}

impl CountingSigner {
    fn new() -> Self {
        Self {
            wallet: KeyWallet::from_private_key(&[0x21; 32]).unwrap(),
            signatures: AtomicUsize::new(0),
        }
    }
}

impl TransactionSigner for CountingSigner {
    fn address(&self) -> Address {
        self.wallet.address()
    }

    fn sign(&self, hash: &[u8; 32]) -> governor_wallets::Result<[u8; SIGNATURE_SIZE]> {
        self.signatures.fetch_add(1, Ordering::SeqCst);
        Ok(self.wallet.sign_recoverable(hash))
    }
}

struct Decline(AtomicUsize);

impl Confirmation for Decline {
    fn confirm(&self, _transaction: &Transaction) -> std::io::Result<bool> {
        self.0.fetch_add(1, Ordering::SeqCst);
        Ok(false)
    }
}

fn set_step_cost() -> CallTransactionBuilder {
    CallTransactionBuilder::new(GOVERNANCE_SCORE_ADDRESS, "setStepCost").params(
        CallParams::new()
            .with_str("stepType", StepType::ApiCall.as_str())
            .with_int("cost", &BigInt::from(10_000)),
    )
}

#[tokio::test]
async fn test_estimate_never_signs_or_sends() {
    let provider = Arc::new(RecordingProvider::default());
    let signer = Arc::new(CountingSigner::new());
    let decline = Box::new(Decline(AtomicUsize::new(0)));

    let invoker = Invoker::new(provider.clone(), signer.clone(), BigInt::from(3), decline)
        .with_estimate(true);
    let outcome = invoker.invoke(set_step_cost()).await.unwrap();

    assert_eq!(outcome, InvokeOutcome::Estimated(BigInt::from(123_456)));
    assert_eq!(signer.signatures.load(Ordering::SeqCst), 0);
    assert!(provider.sent.lock().unwrap().is_empty());

    let estimated = provider.estimated.lock().unwrap();
    assert_eq!(estimated.len(), 1);
    assert_eq!(estimated[0].step_limit, None);
    assert!(estimated[0].to_json().get("stepLimit").is_none());
}

#[tokio::test]
async fn test_confirmed_transaction_is_signed_and_sent() {
    let provider = Arc::new(RecordingProvider::default());
    let signer = Arc::new(CountingSigner::new());

    let invoker = Invoker::new(provider.clone(), signer.clone(), BigInt::from(0x53), Box::new(AutoConfirm))
        .with_step_limit(BigInt::from(2_000_000));
    let outcome = invoker.invoke(set_step_cost()).await.unwrap();

    assert_eq!(signer.signatures.load(Ordering::SeqCst), 1);
    let sent = provider.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(outcome, InvokeOutcome::TxHash(sent[0].hash));

    let json = sent[0].to_json();
    assert_eq!(json["stepLimit"], "0x1e8480");
    assert_eq!(json["nid"], "0x53");
    assert_eq!(json["from"], signer.address().to_string());
    assert_eq!(sent[0].hash, sent[0].transaction.hash());
}

#[tokio::test]
async fn test_declined_transaction_is_cancelled() {
    let provider = Arc::new(RecordingProvider::default());
    let signer = Arc::new(CountingSigner::new());

    let invoker = Invoker::new(
        provider.clone(),
        signer.clone(),
        BigInt::from(1),
        Box::new(Decline(AtomicUsize::new(0))),
    );
    let err = invoker.invoke(set_step_cost()).await.unwrap_err();

    assert!(matches!(err, RpcError::Cancelled));
    assert_eq!(signer.signatures.load(Ordering::SeqCst), 0);
    assert!(provider.sent.lock().unwrap().is_empty());
}
