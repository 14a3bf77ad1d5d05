#![no_main]

use libfuzzer_sys::fuzz_target;

use factmod_core::modular::mul_mod;

fuzz_target!(|data: &[u8]| {
    if data.len() < 24 {
        return;
    }
    let word = |i: usize| u64::from_le_bytes(data[i..i + 8].try_into().unwrap());
    let (a, b, m) = (word(0), word(8), word(16));
    if m == 0 {
        return;
    }

    // Reduced operands, checked against 128-bit arithmetic
    let (a, b) = (a % m, b % m);
    let expected = (u128::from(a) * u128::from(b) % u128::from(m)) as u64;
    assert_eq!(mul_mod(a, b, m), expected);
});
