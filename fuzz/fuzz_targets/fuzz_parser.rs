#![no_main]

use arbitrary::Arbitrary;
use jsontree::{ErrorKind, ParserOptions, from_str, parse_with_options};
use libfuzzer_sys::fuzz_target;

/// Raw bytes plus the knobs that must not change the outcome.
#[derive(Arbitrary, Debug)]
struct Input {
    buffer_size: u8,
    data: Vec<u8>,
}

fn options(buffer_size: usize) -> ParserOptions {
    ParserOptions {
        buffer_size,
        max_depth: 100,
        ..ParserOptions::default()
    }
}

fuzz_target!(|input: Input| {
    let chunked = parse_with_options(&input.data[..], options(usize::from(input.buffer_size)));
    let whole = parse_with_options(&input.data[..], options(input.data.len()));

    match (&chunked, &whole) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        (Err(a), Err(b)) => {
            assert_eq!(a.kind(), b.kind());
            assert_eq!(a.position(), b.position());
            assert_ne!(a.kind(), ErrorKind::IoFailure);
        }
        _ => panic!("buffer size changed the outcome: {chunked:?} vs {whole:?}"),
    }

    let Ok(Some(value)) = chunked else {
        return;
    };

    // The compact and indented forms both read back as the same tree.
    let compact = value.to_string();
    assert_eq!(from_str(&compact).ok().flatten().as_ref(), Some(&value));
    let indented = format!("{value:#}");
    assert_eq!(from_str(&indented).ok().flatten().as_ref(), Some(&value));

    // Well-formed UTF-8 accepted here is valid JSON for serde_json too.
    // Lone surrogate escapes are replaced here but rejected there.
    if let Ok(text) = std::str::from_utf8(&input.data) {
        if !text.contains("\\u") {
            let oracle: Result<serde_json::Value, _> = serde_json::from_str(text);
            assert!(oracle.is_ok(), "serde_json rejected {text:?}: {oracle:?}");
        }
    }
});
