#![no_main]

use gettext_catalog::Catalog;
use gettext_catalog_fuzz::{create_batch, FuzzMessage};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|batches: Vec<Vec<FuzzMessage>>| {
    let mut catalog = Catalog::new();
    for messages in batches {
        // Plural conflicts are expected, the catalog must stay
        // consistent regardless.
        let _ = catalog.merge(create_batch(messages));
    }

    for messages in catalog.messages().values() {
        for message in messages.values() {
            assert!(message.references.windows(2).all(|w| w[0] < w[1]));
            for (idx, comment) in message.extracted_comments.iter().enumerate() {
                assert!(!message.extracted_comments[..idx].contains(comment));
            }
        }
    }
});
