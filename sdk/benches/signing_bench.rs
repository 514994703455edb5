// Signing, hashing and decoding benchmarks for the transaction core.
//
// Covers keypair generation under both schemes, transaction signing,
// verification, aggregate cosigning, and batch JSON decoding at various
// sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use sirius_tx::crypto::hash::Hash;
use sirius_tx::crypto::keys::{DerivationScheme, KeyPair};
use sirius_tx::model::{Account, Address, AssetId, Deadline, Message, Mosaic, NetworkType};
use sirius_tx::transaction::{
    sign_transaction, sign_with_cosignatures, verify_signed_transaction, AggregateTransaction,
    Transaction, TransactionBuilder, TransferTransaction,
};
use sirius_tx::map_transactions;

const XPX: u64 = 0x0DC6_7FBE_1CAD_29E3;

fn account(version: u8) -> Account {
    Account::generate(NetworkType::MijinTest, version, Some(Hash::new([7; 32]))).unwrap()
}

fn transfer(signer: &Account) -> Transaction {
    let recipient = Address::from_raw("SDRDGFTDLLCB67D4HPGIMIHPNSRYRJRT7DOBGWZY").unwrap();
    TransactionBuilder::new(NetworkType::MijinTest)
        .deadline(Deadline::from_network_timestamp(1_000))
        .signer(*signer.public_account())
        .build(TransferTransaction::new(
            recipient,
            vec![Mosaic::new(AssetId::from_u64(XPX), 10)],
            Message::plain("bench"),
        ))
        .unwrap()
}

fn bench_keypair_generation(c: &mut Criterion) {
    for scheme in [DerivationScheme::Ed25519Sha3, DerivationScheme::Ed25519Sha2] {
        c.bench_function(&format!("keys/generate/{scheme}"), |b| {
            b.iter(|| KeyPair::generate(scheme).unwrap());
        });
    }
}

fn bench_sign_transaction(c: &mut Criterion) {
    for version in [1, 2] {
        let signer = account(version);
        let tx = transfer(&signer);
        c.bench_function(&format!("transaction/sign/v{version}"), |b| {
            b.iter(|| sign_transaction(&tx, &signer).unwrap());
        });
    }
}

fn bench_verify_transaction(c: &mut Criterion) {
    let signer = account(1);
    let signed = sign_transaction(&transfer(&signer), &signer).unwrap();
    c.bench_function("transaction/verify", |b| {
        b.iter(|| verify_signed_transaction(&signed, signer.generation_hash()).unwrap());
    });
}

fn bench_aggregate_cosign(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate/cosign");

    for cosigners in [1usize, 5, 20] {
        let initiator = account(1);
        let others: Vec<Account> = (0..cosigners).map(|_| account(1)).collect();
        let inner = others.iter().map(transfer).collect();
        let aggregate = TransactionBuilder::new(NetworkType::MijinTest)
            .build(AggregateTransaction::complete(inner))
            .unwrap();
        let refs: Vec<&Account> = others.iter().collect();

        group.throughput(Throughput::Elements(cosigners as u64));
        group.bench_with_input(BenchmarkId::from_parameter(cosigners), &refs, |b, refs| {
            b.iter(|| sign_with_cosignatures(&aggregate, &initiator, refs).unwrap());
        });
    }

    group.finish();
}

fn bench_batch_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("dto/map_transactions");
    let signer = account(1);

    for size in [10usize, 100, 1_000] {
        let element = serde_json::json!({
            "meta": { "height": [1, 0], "index": 0 },
            "transaction": {
                "type": 0x4154,
                "version": 0x9001_0003u32,
                "signer": signer.public_key(),
                "maxFee": [0, 0],
                "deadline": [1000, 0],
                "recipient": "90E23316635AC41F7C7C3BCC8620EF6CA388A633F8DC135B38",
                "message": { "type": 0, "payload": "" },
                "mosaics": [{ "id": [481_110_499u32, 231_112_638u32], "amount": [10, 0] }]
            }
        });
        let json = serde_json::Value::Array(vec![element; size]).to_string();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &json, |b, json| {
            b.iter(|| map_transactions(json, None).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_keypair_generation,
    bench_sign_transaction,
    bench_verify_transaction,
    bench_aggregate_cosign,
    bench_batch_decode,
);
criterion_main!(benches);
