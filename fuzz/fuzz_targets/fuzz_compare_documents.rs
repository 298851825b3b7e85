#![no_main]
use json_diff_tree::{compare_documents, DiffConfig};
use libfuzzer_sys::fuzz_target;

/// Fuzz decoding and comparison together.
///
/// The input is split at the first NUL byte into an old and a new document.
/// Both sides are compared once strictly and once with every relaxation
/// enabled, which also exercises the in-place array sort.
fuzz_target!(|data: &[u8]| {
    let (old, new) = match data.iter().position(|&b| b == 0) {
        Some(split) => (&data[..split], &data[split + 1..]),
        None => (data, data),
    };

    let _ = compare_documents(old, new, &DiffConfig::default());

    let relaxed = DiffConfig::builder()
        .global_ignore_array_order(true)
        .global_ignore_number_type(true)
        .omit_equal(true)
        .max_depth(64)
        .build();
    let _ = compare_documents(old, new, &relaxed);
});
