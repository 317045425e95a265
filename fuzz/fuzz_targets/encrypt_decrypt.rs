#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::{BigInt, Sign};
use paillier_ext::{BigFraction, Error, Paillier};
use std::sync::OnceLock;

static PAILLIER: OnceLock<Paillier> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let paillier = PAILLIER.get_or_init(|| Paillier::new(384).unwrap());

    // First byte picks sign and denominator scale, the rest is the magnitude.
    let sign = if data[0] & 1 == 1 { Sign::Minus } else { Sign::Plus };
    let places = usize::from(data[0] >> 1) % 16;
    let numerator = BigInt::from_bytes_be(sign, &data[1..]);
    let denominator = pow10(places);
    let Ok(message) = BigFraction::new(numerator, denominator) else {
        return;
    };

    match paillier.encrypt_data(&message) {
        Ok(blob) => {
            assert_eq!(blob.len(), paillier.ciphertext_length());
            let decrypted = paillier.decrypt_data(&blob).unwrap();

            let exp = BigFraction::from(paillier.plaintext_exp().clone());
            let truncated = BigFraction::from((&message * &exp).to_big_int()) / exp;
            assert_eq!(decrypted, truncated);
        }
        Err(e) => assert_eq!(e, Error::PlaintextTooLarge),
    }
});

fn pow10(places: usize) -> BigInt {
    (0..places).fold(BigInt::from(1), |acc, _| acc * BigInt::from(10))
}
