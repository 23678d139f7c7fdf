use atria_kernel::SAFE_ALPHABET;
use atria_kernel::array_key;

#[test]
fn generates_expected_length_and_charset() {
    let key = array_key!();
    assert_eq!(key.len(), 12);

    for ch in key.chars() {
        assert!(SAFE_ALPHABET.contains(&ch), "unexpected character in array key: {ch}");
    }
}

#[test]
fn custom_length() {
    assert_eq!(array_key!(20).len(), 20);
}

#[test]
fn keys_do_not_collide_in_practice() {
    let keys: std::collections::HashSet<String> = (0..500).map(|_| array_key!()).collect();
    assert_eq!(keys.len(), 500);
}
