//! Fuzz target for the delimited text parser.
//!
//! Checks that parsing never panics and that every row has as many cells as
//! there are headers, for any input and delimiter.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tabload::parse_delimited;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    text: &'a str,
    delimiter: &'a str,
    excluded: Vec<&'a str>,
}

fuzz_target!(|input: Input<'_>| {
    // Only process reasonable-sized inputs to avoid OOM
    if input.text.len() > 100_000 {
        return;
    }

    let table = parse_delimited(Some(input.text), input.delimiter, &input.excluded);
    for row in &table.rows {
        assert_eq!(row.len(), table.headers.len());
    }
});
