mod codec;

pub use codec::{EntrySnapshot, Snapshot, TabSnapshot};
