#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::BigInt;
use paillier_ext::{BigFraction, Paillier};

use std::sync::OnceLock;

static PAILLIER: OnceLock<Paillier> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    if data.len() < 16 {
        return;
    }
    let paillier = PAILLIER.get_or_init(|| Paillier::new(384).unwrap());

    // Arbitrary bytes must never panic the blob parsers.
    let _ = paillier.decrypt_data(data);
    let _ = paillier.add(data, data);

    let (a_bytes, b_bytes) = data.split_at(data.len() / 2);
    let a = BigFraction::from(BigInt::from_signed_bytes_be(&a_bytes[..a_bytes.len().min(13)]));
    let b = BigFraction::from(BigInt::from_signed_bytes_be(&b_bytes[..b_bytes.len().min(13)]));

    let Ok(ca) = paillier.encrypt_data(&a) else {
        return;
    };
    let Ok(cb) = paillier.encrypt_data(&b) else {
        return;
    };

    let sum = paillier.add(&ca, &cb).unwrap();
    assert_eq!(paillier.decrypt_data(&sum).unwrap(), &a + &b);

    let diff = paillier.subtract(&ca, &cb).unwrap();
    assert_eq!(paillier.decrypt_data(&diff).unwrap(), &a - &b);

    let k = BigInt::from(i16::from_be_bytes([data[0], data[1]]));
    let scaled = paillier.plaintext_multiply(&ca, &k).unwrap();
    assert_eq!(paillier.decrypt_data(&scaled).unwrap(), &a * &BigFraction::from(k));
});
