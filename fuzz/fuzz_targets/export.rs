#![no_main]

use gettext_catalog::Catalog;
use gettext_catalog_fuzz::{create_batch, FuzzMessage};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|messages: Vec<FuzzMessage>| {
    let mut catalog = Catalog::new();
    if catalog.merge(create_batch(messages)).is_err() {
        return;
    }

    let documents = catalog.export();
    assert!(documents.windows(2).all(|w| w[0].domain < w[1].domain));
    for document in &documents {
        assert!(document.items.windows(2).all(|w| {
            let a = (&w[0].id, w[0].context.as_deref().unwrap_or_default());
            let b = (&w[1].id, w[1].context.as_deref().unwrap_or_default());
            a <= b
        }));
        for item in &document.items {
            assert!(item.references.iter().all(|reference| !reference.is_empty()));
        }
    }
});
