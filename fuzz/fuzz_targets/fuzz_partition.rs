#![no_main]

use libfuzzer_sys::fuzz_target;

use factmod_core::range::{partition, Range};

fuzz_target!(|data: &[u8]| {
    if data.len() < 18 {
        return;
    }
    let begin = u64::from_le_bytes(data[0..8].try_into().unwrap());
    let end = u64::from_le_bytes(data[8..16].try_into().unwrap());
    let parts = usize::from(u16::from_le_bytes([data[16], data[17]]) % 512) + 1;

    let range = Range::new(begin, end).normalized();
    let shards = partition(range, parts);
    assert_eq!(shards.len(), parts);

    // Non-empty shards are contiguous and cover the range exactly
    let mut next = range.begin;
    let mut covered: u128 = 0;
    for shard in shards.iter().filter(|s| !s.is_empty()) {
        assert_eq!(shard.begin, next);
        covered += shard.len();
        next = shard.end.wrapping_add(1);
    }
    assert_eq!(covered, range.len());
});
