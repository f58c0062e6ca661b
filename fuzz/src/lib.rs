use arbitrary::Arbitrary;
use gettext_catalog::{message_key, Batch, MessageEntry, Reference};

/// Wrapper struct for generating arbitrary `Reference`s.
#[derive(Arbitrary, Debug)]
pub struct FuzzReference {
    filename: Option<String>,
    first_line: Option<u16>,
    first_column: Option<u16>,
}

impl From<FuzzReference> for Reference {
    fn from(other: FuzzReference) -> Reference {
        Reference {
            filename: other.filename,
            first_line: other.first_line.map(usize::from),
            first_column: other.first_column.map(usize::from),
            ..Reference::default()
        }
    }
}

/// Wrapper struct for generating arbitrary messages.
#[derive(Arbitrary, Debug)]
pub struct FuzzMessage {
    domain: String,
    msgid: String,
    msgctxt: Option<String>,
    msgid_plural: Option<String>,
    references: Vec<FuzzReference>,
    comments: Vec<String>,
}

/// Build a batch, keying each message by its msgid and context.
pub fn create_batch(messages: Vec<FuzzMessage>) -> Batch {
    let mut batch = Batch::new();
    for message in messages {
        let entry = MessageEntry {
            id: message.msgid,
            plural_id: message.msgid_plural,
            context: message.msgctxt,
            references: message.references.into_iter().map(Reference::from).collect(),
            extracted_comments: message.comments,
        };
        let key = message_key(&entry.id, entry.context.as_deref());
        batch
            .entry(message.domain)
            .or_default()
            .insert(key, entry);
    }
    batch
}
