/// Hashes a key with a seed into a 53-bit integer.
///
/// The seed is the depth of the trie level being indexed, so a key lands on
/// an independent slot at every level.
pub fn hash(key: &str, seed: u32) -> u64 {
    let mut first = 0xdead_beef ^ seed;
    let mut second = 0x41c6_ce57 ^ seed;

    for unit in key.encode_utf16() {
        let unit = u32::from(unit);

        first = (first ^ unit).wrapping_mul(2_654_435_761);
        second = (second ^ unit).wrapping_mul(1_597_334_677);
    }

    first = (first ^ (first >> 16)).wrapping_mul(2_246_822_507);
    first ^= (second ^ (second >> 13)).wrapping_mul(3_266_489_909);
    second = (second ^ (second >> 16)).wrapping_mul(2_246_822_507);
    second ^= (first ^ (first >> 13)).wrapping_mul(3_266_489_909);

    (u64::from(second & 0x1f_ffff) << 32) | u64::from(first)
}
